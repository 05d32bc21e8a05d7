//! Triage domain types
//!
//! The support-desk vocabulary shared by the pipeline crates:
//!
//! - [`TicketRecord`] — the single mutable record one run owns
//! - [`Intent`] / [`Priority`] / [`ReviewOutcome`] — the enumerated values
//!   routers turn into outcome keys
//! - [`TicketIdSequence`] — monotonic, replayable ticket id generation

#![deny(unsafe_code)]

pub mod ids;
pub mod ticket;

// Re-export main types
pub use ids::{SubjectId, TicketId, TicketIdSequence};
pub use ticket::{Intent, Priority, ReviewOutcome, TicketRecord};

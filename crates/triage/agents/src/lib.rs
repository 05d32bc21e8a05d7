//! The support-desk stages and routers that run on the flow engine
//!
//! Everything domain-specific about triage lives here: keyword
//! classification, the four specialist handlers and their response
//! templates, rule-based scoring, and the two routing decisions. The
//! engine underneath knows none of it; it just follows outcome keys.
//!
//! # Key principle
//!
//! **Stages write, routers read.** A stage may mutate the ticket record
//! and must leave one audit entry; a router maps the record it sees to an
//! outcome key and changes nothing. The escalation thresholds live in
//! [`routers::EscalationRouter`] alone.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use flow_engine::FlowExecutor;
//! use triage_agents::support_pipeline;
//! use triage_core::{SubjectId, TicketId, TicketRecord};
//! use triage_directory::InMemoryProvider;
//!
//! let provider = Arc::new(InMemoryProvider::with_demo_data());
//! let graph = support_pipeline(provider)?;
//!
//! let ticket = TicketRecord::new(
//!     TicketId::new("TKT10000"),
//!     SubjectId::new("CUST001"),
//!     "I want to return my laptop, it's the wrong item",
//! );
//! let run = FlowExecutor::new(&graph).run(ticket).map_err(|e| e.source)?;
//! assert!(run.state.final_response().is_some());
//! # Ok::<(), flow_types::FlowError>(())
//! ```

#![deny(unsafe_code)]

pub mod classify;
pub mod handlers;
pub mod pipeline;
pub mod review;
pub mod routers;
pub mod scoring;
pub mod templates;

pub use classify::{classify_query, detect_priority, ClassifyStage};
pub use handlers::{BillingStage, GeneralStage, ReturnsStage, TechStage};
pub use pipeline::support_pipeline;
pub use review::{FinalizeStage, HumanReviewStage, ScoreStage};
pub use routers::{DispatchRouter, EscalationRouter};
pub use scoring::{query_sentiment, response_quality};

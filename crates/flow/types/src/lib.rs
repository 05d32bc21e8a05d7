//! Flow domain types
//!
//! The building blocks of a staged decision pipeline:
//!
//! - [`FlowGraph`] — named stages wired by static and conditional edges
//! - [`Stage`] / [`Router`] — the contracts stage functions and branch
//!   deciders implement (closures qualify via blanket impls)
//! - [`AuditTrail`] — the append-only log each stage writes to
//! - [`FlowError`] — the build-time and run-time structural error taxonomy
//!
//! A graph is assembled once, validated, and then treated as read-only;
//! execution lives in the `flow-engine` crate.
//!
//! # Example
//!
//! ```rust
//! use flow_types::{FlowGraph, FlowState};
//!
//! #[derive(Default)]
//! struct Note {
//!     body: String,
//! }
//!
//! impl FlowState for Note {
//!     fn is_finalized(&self) -> bool {
//!         !self.body.is_empty()
//!     }
//! }
//!
//! let mut graph: FlowGraph<Note> = FlowGraph::new();
//! graph.register_stage("draft", |n: &mut Note| n.body.push_str("draft")).unwrap();
//! graph.register_stage("send", |n: &mut Note| n.body.push_str(", sent")).unwrap();
//! graph.register_edge("draft", "send").unwrap();
//! graph.set_entry("draft").unwrap();
//! graph.mark_terminal("send").unwrap();
//!
//! assert!(graph.validate().is_ok());
//! ```

#![deny(unsafe_code)]

pub mod audit;
pub mod error;
pub mod graph;
pub mod stage;

// Re-export main types
pub use audit::AuditTrail;
pub use error::{FlowError, FlowResult};
pub use graph::{BranchPoint, FlowGraph};
pub use stage::{FlowState, OutcomeKey, Router, Stage, StageKey};

//! Flow executor runtime
//!
//! Takes a validated [`flow_types::FlowGraph`] and threads a record through
//! it: entry stage first, then edge by edge until a terminal stage halts
//! the run. Each stage sees the record exactly once per run.
//!
//! # Key principle
//!
//! **The executor routes, it never decides.** Branch decisions belong to
//! the routers registered on the graph; the executor only resolves their
//! outcome keys against the branch maps and enforces the structural rules
//! (single pass, step bound, finalized terminals, optional time budget).
//!
//! # Example
//!
//! ```rust
//! use flow_engine::FlowExecutor;
//! use flow_types::{FlowGraph, FlowState};
//!
//! #[derive(Debug, Default)]
//! struct Job {
//!     output: String,
//! }
//!
//! impl FlowState for Job {
//!     fn is_finalized(&self) -> bool {
//!         !self.output.is_empty()
//!     }
//! }
//!
//! let mut graph: FlowGraph<Job> = FlowGraph::new();
//! graph.register_stage("work", |j: &mut Job| j.output.push_str("done")).unwrap();
//! graph.set_entry("work").unwrap();
//! graph.mark_terminal("work").unwrap();
//! graph.validate().unwrap();
//!
//! let run = FlowExecutor::new(&graph).run(Job::default()).unwrap();
//! assert_eq!(run.state.output, "done");
//! assert_eq!(run.steps(), 1);
//! ```

#![deny(unsafe_code)]

pub mod executor;

// Re-export main types
pub use executor::{FlowExecutor, FlowRun, RunError};

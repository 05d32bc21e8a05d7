//! Error taxonomy for flow graphs and their execution
//!
//! Build-time errors surface while a graph is being assembled, run-time
//! structural errors surface while a record is threaded through it. All of
//! them indicate a defective topology or a broken stage contract; none are
//! retried.

use crate::{OutcomeKey, StageKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used across the flow crates
pub type FlowResult<T> = Result<T, FlowError>;

/// Everything that can go wrong while building or walking a flow graph
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowError {
    // ── Build-time ───────────────────────────────────────────────────
    /// A stage key was registered twice
    #[error("stage '{0}' is already registered")]
    DuplicateStage(StageKey),

    /// An operation referenced a stage key that was never registered
    #[error("stage '{0}' is not registered")]
    UnknownStage(StageKey),

    /// A stage may carry at most one outgoing transition
    #[error("stage '{0}' already has an outgoing transition")]
    DuplicateEdge(StageKey),

    /// A conditional edge was registered with no branches
    #[error("conditional edge from '{0}' has an empty branch set")]
    EmptyBranchSet(StageKey),

    /// No entry stage has been designated
    #[error("no entry stage has been designated")]
    MissingEntry,

    /// No stage has been marked terminal
    #[error("graph has no terminal stage")]
    NoTerminalStage,

    /// A registered stage cannot be reached from the entry stage
    #[error("stage '{0}' is unreachable from the entry stage")]
    UnreachableStage(StageKey),

    // ── Run-time structural ──────────────────────────────────────────
    /// A non-terminal stage was reached that has no outgoing transition
    #[error("non-terminal stage '{0}' has no outgoing transition")]
    DeadEndStage(StageKey),

    /// A router produced an outcome key absent from its branch map
    #[error("router at '{stage}' produced outcome '{outcome}' with no registered branch")]
    UnroutableOutcome {
        stage: StageKey,
        outcome: OutcomeKey,
    },

    /// A stage was visited twice within one run, or the step bound tripped
    #[error("stage '{stage}' revisited after {steps} steps; the topology must be acyclic")]
    CycleDetected { stage: StageKey, steps: usize },

    /// A terminal stage finished without producing the final output
    #[error("terminal stage '{0}' finished without a final output")]
    IncompleteTerminal(StageKey),

    /// The run exceeded its wall-clock budget
    #[error("run exceeded its {budget_ms} ms budget at stage '{stage}'")]
    RunTimeout { stage: StageKey, budget_ms: u64 },
}

impl FlowError {
    /// The stage this error points at, when there is one
    pub fn stage(&self) -> Option<&StageKey> {
        match self {
            Self::DuplicateStage(key)
            | Self::UnknownStage(key)
            | Self::DuplicateEdge(key)
            | Self::EmptyBranchSet(key)
            | Self::UnreachableStage(key)
            | Self::DeadEndStage(key)
            | Self::IncompleteTerminal(key) => Some(key),
            Self::UnroutableOutcome { stage, .. }
            | Self::CycleDetected { stage, .. }
            | Self::RunTimeout { stage, .. } => Some(stage),
            Self::MissingEntry | Self::NoTerminalStage => None,
        }
    }

    /// True for errors that can only surface while assembling a graph
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateStage(_)
                | Self::UnknownStage(_)
                | Self::DuplicateEdge(_)
                | Self::EmptyBranchSet(_)
                | Self::MissingEntry
                | Self::NoTerminalStage
                | Self::UnreachableStage(_)
        )
    }
}

//! Flow executor: walks a record from the entry stage to a terminal stage
//!
//! The executor owns the record for the duration of a run and hands each
//! stage an exclusive reference, so stages cannot alias each other's
//! writes. Routing is resolved after every non-terminal stage: the
//! unconditional edge if one exists, otherwise the stage's branch point.
//!
//! Single-pass is enforced directly: reaching a stage twice within one run
//! fails with `CycleDetected` on the spot, and a hard step bound (stage
//! count + 1 unless overridden) backstops it.

use chrono::{DateTime, Utc};
use flow_types::{FlowError, FlowGraph, FlowState, StageKey};
use serde::Serialize;
use std::time::{Duration, Instant};

// ── Run Report ───────────────────────────────────────────────────────

/// A completed run: the final state plus how the executor got there
#[derive(Clone, Debug, Serialize)]
pub struct FlowRun<S> {
    /// The state as left by the terminal stage
    pub state: S,
    /// Stages in visit order; the terminal stage is last
    pub visited: Vec<StageKey>,
    /// The terminal stage that halted the run
    pub terminal: StageKey,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl<S> FlowRun<S> {
    /// Number of stage invocations in this run
    pub fn steps(&self) -> usize {
        self.visited.len()
    }
}

// ── Run Error ────────────────────────────────────────────────────────

/// A failed run: the structural error plus the state snapshot at failure
#[derive(Debug)]
pub struct RunError<S> {
    /// What went wrong; names the offending stage where there is one
    pub source: FlowError,
    /// The record as it stood when the run failed
    pub state: S,
}

impl<S> RunError<S> {
    fn new(source: FlowError, state: S) -> Self {
        Self { source, state }
    }
}

impl<S> std::fmt::Display for RunError<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "run failed: {}", self.source)
    }
}

impl<S: std::fmt::Debug> std::error::Error for RunError<S> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

// ── Executor ─────────────────────────────────────────────────────────

/// Drives one record at a time through a shared, read-only graph
pub struct FlowExecutor<'g, S> {
    graph: &'g FlowGraph<S>,
    step_bound: usize,
    timeout: Option<Duration>,
}

impl<'g, S: FlowState> FlowExecutor<'g, S> {
    /// Create an executor over a built graph. The default step bound is
    /// the number of registered stages plus one.
    pub fn new(graph: &'g FlowGraph<S>) -> Self {
        Self {
            graph,
            step_bound: graph.stage_count() + 1,
            timeout: None,
        }
    }

    /// Override the hard step bound
    pub fn with_step_bound(mut self, bound: usize) -> Self {
        self.step_bound = bound;
        self
    }

    /// Give each run a wall-clock budget
    pub fn with_timeout(mut self, budget: Duration) -> Self {
        self.timeout = Some(budget);
        self
    }

    /// Thread one record from the entry stage to a terminal stage
    pub fn run(&self, mut state: S) -> Result<FlowRun<S>, RunError<S>> {
        let started_at = Utc::now();
        let clock = Instant::now();

        let mut current = match self.graph.entry() {
            Some(entry) => entry.clone(),
            None => return Err(RunError::new(FlowError::MissingEntry, state)),
        };
        let mut visited: Vec<StageKey> = Vec::new();

        loop {
            if visited.len() >= self.step_bound {
                return Err(RunError::new(
                    FlowError::CycleDetected {
                        stage: current,
                        steps: visited.len(),
                    },
                    state,
                ));
            }
            if visited.contains(&current) {
                return Err(RunError::new(
                    FlowError::CycleDetected {
                        stage: current,
                        steps: visited.len(),
                    },
                    state,
                ));
            }
            if let Some(budget) = self.timeout {
                if clock.elapsed() >= budget {
                    return Err(RunError::new(
                        FlowError::RunTimeout {
                            stage: current,
                            budget_ms: budget.as_millis() as u64,
                        },
                        state,
                    ));
                }
            }

            let stage = match self.graph.stage(&current) {
                Some(stage) => stage,
                None => return Err(RunError::new(FlowError::UnknownStage(current), state)),
            };
            stage.run(&mut state);
            visited.push(current.clone());
            tracing::debug!(stage = %current, step = visited.len(), "Stage completed");

            if self.graph.is_terminal(&current) {
                if !state.is_finalized() {
                    return Err(RunError::new(FlowError::IncompleteTerminal(current), state));
                }
                let finished_at = Utc::now();
                tracing::info!(
                    terminal = %current,
                    steps = visited.len(),
                    "Run completed"
                );
                return Ok(FlowRun {
                    state,
                    visited,
                    terminal: current,
                    started_at,
                    finished_at,
                });
            }

            current = if let Some(target) = self.graph.edge(&current) {
                target.clone()
            } else if let Some(branch) = self.graph.branch(&current) {
                let outcome = branch.route(&state);
                match branch.target(&outcome) {
                    Some(target) => target.clone(),
                    None => {
                        return Err(RunError::new(
                            FlowError::UnroutableOutcome {
                                stage: current,
                                outcome,
                            },
                            state,
                        ))
                    }
                }
            } else {
                return Err(RunError::new(FlowError::DeadEndStage(current), state));
            };
        }
    }
}

//! Sequential batch execution over the triage pipeline
//!
//! One executor run per input, each with a fresh ticket record from the
//! monotonic id sequence. A run that fails structurally is logged with
//! its record snapshot and counted; the rest of the batch still runs.

use flow_engine::{FlowExecutor, FlowRun};
use flow_types::{FlowError, FlowGraph};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use triage_core::{SubjectId, TicketIdSequence, TicketRecord};

/// One unit of work: who is asking, and what they asked
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct QueryInput {
    pub subject_id: String,
    pub query: String,
}

/// A run that errored out before reaching a terminal stage
#[derive(Debug)]
pub struct FailedRun {
    pub error: FlowError,
    /// The record as it stood when the run stopped
    pub record: TicketRecord,
}

/// What became of one batch entry
#[derive(Debug)]
pub enum RunOutcome {
    Completed(FlowRun<TicketRecord>),
    Failed(FailedRun),
}

impl RunOutcome {
    pub fn record(&self) -> &TicketRecord {
        match self {
            RunOutcome::Completed(run) => &run.state,
            RunOutcome::Failed(failed) => &failed.record,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }
}

/// Everything a batch produced, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub runs: Vec<RunOutcome>,
}

impl BatchReport {
    pub fn completed(&self) -> impl Iterator<Item = &FlowRun<TicketRecord>> {
        self.runs.iter().filter_map(|outcome| match outcome {
            RunOutcome::Completed(run) => Some(run),
            RunOutcome::Failed(_) => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = &FailedRun> {
        self.runs.iter().filter_map(|outcome| match outcome {
            RunOutcome::Completed(_) => None,
            RunOutcome::Failed(failed) => Some(failed),
        })
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Drives tickets through a graph one at a time
pub struct BatchRunner<'g> {
    executor: FlowExecutor<'g, TicketRecord>,
    ids: TicketIdSequence,
}

impl<'g> BatchRunner<'g> {
    pub fn new(graph: &'g FlowGraph<TicketRecord>) -> Self {
        Self {
            executor: FlowExecutor::new(graph),
            ids: TicketIdSequence::new(),
        }
    }

    /// Replace the id sequence, e.g. to continue a previous batch
    pub fn with_sequence(mut self, ids: TicketIdSequence) -> Self {
        self.ids = ids;
        self
    }

    /// Run a single input through the graph
    pub fn run_one(&mut self, input: &QueryInput) -> RunOutcome {
        let ticket = TicketRecord::new(
            self.ids.next_id(),
            SubjectId::new(input.subject_id.as_str()),
            input.query.as_str(),
        );
        tracing::info!(ticket = %ticket.id(), subject = %ticket.subject(), "Processing ticket");

        match self.executor.run(ticket) {
            Ok(run) => RunOutcome::Completed(run),
            Err(failed) => {
                tracing::error!(
                    ticket = %failed.state.id(),
                    error = %failed.source,
                    record = ?failed.state,
                    "Ticket run failed"
                );
                RunOutcome::Failed(FailedRun {
                    error: failed.source,
                    record: failed.state,
                })
            }
        }
    }

    /// Run the whole batch, in order
    pub fn run_all(&mut self, inputs: &[QueryInput]) -> BatchReport {
        let mut report = BatchReport::default();
        for input in inputs {
            report.runs.push(self.run_one(input));
        }
        report
    }
}

/// Aggregate numbers over one batch
#[derive(Clone, Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub escalated: usize,
    pub auto_resolved: usize,
    pub failed: usize,
    /// Completed runs per intent, alphabetical by intent key
    pub intent_counts: BTreeMap<String, usize>,
    /// Mean quality over completed runs; 0.0 when none completed
    pub average_quality: f64,
}

impl BatchSummary {
    pub fn from_report(report: &BatchReport) -> Self {
        let mut escalated = 0;
        let mut auto_resolved = 0;
        let mut failed = 0;
        let mut intent_counts = BTreeMap::new();
        let mut quality_sum = 0.0;
        let mut completed = 0usize;

        for outcome in &report.runs {
            match outcome {
                RunOutcome::Completed(run) => {
                    completed += 1;
                    let record = &run.state;
                    if record.escalated().unwrap_or(false) {
                        escalated += 1;
                    } else {
                        auto_resolved += 1;
                    }
                    if let Some(intent) = record.classification() {
                        *intent_counts.entry(intent.as_str().to_owned()).or_insert(0) += 1;
                    }
                    quality_sum += record.quality().unwrap_or(0.0);
                }
                RunOutcome::Failed(_) => failed += 1,
            }
        }

        let average_quality = if completed > 0 {
            quality_sum / completed as f64
        } else {
            0.0
        };

        Self {
            total: report.runs.len(),
            escalated,
            auto_resolved,
            failed,
            intent_counts,
            average_quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::demo_batch;
    use std::sync::Arc;
    use triage_agents::support_pipeline;
    use triage_directory::InMemoryProvider;

    fn demo_graph() -> FlowGraph<TicketRecord> {
        support_pipeline(Arc::new(InMemoryProvider::with_demo_data())).unwrap()
    }

    #[test]
    fn test_demo_batch_all_complete() {
        let graph = demo_graph();
        let report = BatchRunner::new(&graph).run_all(&demo_batch());

        assert_eq!(report.len(), 8);
        assert_eq!(report.completed().count(), 8);
        assert_eq!(report.failed().count(), 0);
        for run in report.completed() {
            assert!(run.state.final_response().is_some_and(|text| !text.is_empty()));
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let graph = demo_graph();
        let report = BatchRunner::new(&graph).run_all(&demo_batch());

        let ids: Vec<&str> = report.runs.iter().map(|o| o.record().id().as_str()).collect();
        assert_eq!(
            ids,
            [
                "TKT10000", "TKT10001", "TKT10002", "TKT10003", "TKT10004", "TKT10005",
                "TKT10006", "TKT10007"
            ]
        );
    }

    #[test]
    fn test_demo_batch_summary() {
        let graph = demo_graph();
        let report = BatchRunner::new(&graph).run_all(&demo_batch());
        let summary = BatchSummary::from_report(&report);

        assert_eq!(summary.total, 8);
        // every demo draft clears the escalation thresholds
        assert_eq!(summary.escalated, 0);
        assert_eq!(summary.auto_resolved, 8);
        assert_eq!(summary.failed, 0);

        let counts: Vec<(&str, usize)> = summary
            .intent_counts
            .iter()
            .map(|(intent, count)| (intent.as_str(), *count))
            .collect();
        assert_eq!(
            counts,
            [
                ("billing", 2),
                ("general", 1),
                ("order_status", 2),
                ("returns", 1),
                ("tech_support", 2)
            ]
        );
        assert!((summary.average_quality - 0.8875).abs() < 1e-9);
    }

    #[test]
    fn test_custom_sequence_continues_numbering() {
        let graph = demo_graph();
        let mut runner =
            BatchRunner::new(&graph).with_sequence(TicketIdSequence::starting_at(42));
        let outcome = runner.run_one(&QueryInput {
            subject_id: "CUST001".to_owned(),
            query: "Where is my order?".to_owned(),
        });
        assert_eq!(outcome.record().id().as_str(), "TKT42");
        assert!(outcome.is_completed());
    }

    #[test]
    fn test_empty_batch_summary() {
        let report = BatchReport::default();
        let summary = BatchSummary::from_report(&report);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_quality, 0.0);
        assert!(summary.intent_counts.is_empty());
    }

    #[test]
    fn test_query_input_round_trips_through_json() {
        let json = r#"[{"subject_id": "CUST001", "query": "Where is my order?"}]"#;
        let inputs: Vec<QueryInput> = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].subject_id, "CUST001");
    }
}

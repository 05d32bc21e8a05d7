//! Scoring stage and the two terminal review stages
//!
//! `score` grades the drafted response and records the quality number the
//! escalation router reads. The terminal stages own the escalation flag:
//! `human_review` sets it, `finalize` clears it. Exactly one of them runs,
//! so a completed record always says which path it took.

use crate::scoring::{query_sentiment, response_quality};
use flow_types::Stage;
use triage_core::TicketRecord;

/// Grades the drafted response and writes the quality score.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreStage;

impl Stage<TicketRecord> for ScoreStage {
    fn run(&self, record: &mut TicketRecord) {
        let sentiment = query_sentiment(record.query());
        let quality = response_quality(record.response().unwrap_or(""), sentiment);

        record.record_quality(quality);
        record.note(format!(
            "Response quality scored at {quality:.2} (query sentiment: {sentiment:.2})"
        ));
        tracing::debug!(ticket = %record.id(), quality, sentiment, "Response scored");
    }
}

/// Escalation-path terminal. Holds the draft for a human and flags the
/// record as escalated.
#[derive(Clone, Copy, Debug, Default)]
pub struct HumanReviewStage;

impl Stage<TicketRecord> for HumanReviewStage {
    fn run(&self, record: &mut TicketRecord) {
        record.mark_escalated(true);
        let held = format!("[PENDING HUMAN REVIEW]\n\n{}", record.response().unwrap_or(""));
        record.resolve(held);
        record.note("Escalated: human agent reviewing before sending");
        tracing::info!(ticket = %record.id(), "Ticket escalated for human review");
    }
}

/// Direct-path terminal. Approves the draft as the final response.
#[derive(Clone, Copy, Debug, Default)]
pub struct FinalizeStage;

impl Stage<TicketRecord> for FinalizeStage {
    fn run(&self, record: &mut TicketRecord) {
        record.mark_escalated(false);
        let approved = record.response().unwrap_or("").to_owned();
        record.resolve(approved);
        record.note("Response approved and sent to customer");
        tracing::debug!(ticket = %record.id(), "Response approved");
    }
}

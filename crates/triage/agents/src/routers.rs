//! Routing decisions for the two branch points
//!
//! Routers read the record, never write it. The escalation thresholds
//! live here and nowhere else; the scoring stage produces numbers, the
//! executor follows outcome keys, and only this module says what the
//! numbers mean.

use flow_types::{OutcomeKey, Router};
use triage_core::{Intent, ReviewOutcome, TicketRecord};

/// Post-classification dispatch. Maps the recorded classification to its
/// outcome key; a record with no classification dispatches as general.
#[derive(Clone, Copy, Debug, Default)]
pub struct DispatchRouter;

impl Router<TicketRecord> for DispatchRouter {
    fn route(&self, record: &TicketRecord) -> OutcomeKey {
        record.classification().unwrap_or(Intent::General).into()
    }
}

/// Quality below this escalates regardless of priority
const QUALITY_FLOOR: f64 = 0.6;
/// High-priority tickets additionally escalate below this
const HIGH_PRIORITY_FLOOR: f64 = 0.8;

/// Post-scoring escalation check.
///
/// Escalates when the quality score falls below 0.6, or when the ticket
/// is high priority and the score falls below 0.8. An unscored record
/// counts as quality 0.0 and therefore escalates.
#[derive(Clone, Copy, Debug, Default)]
pub struct EscalationRouter;

impl EscalationRouter {
    /// The decision as a domain value, for callers that want to branch on
    /// it without going through outcome keys.
    pub fn decide(&self, record: &TicketRecord) -> ReviewOutcome {
        let quality = record.quality().unwrap_or(0.0);
        if quality < QUALITY_FLOOR
            || (record.is_high_priority() && quality < HIGH_PRIORITY_FLOOR)
        {
            ReviewOutcome::Escalate
        } else {
            ReviewOutcome::Finalize
        }
    }
}

impl Router<TicketRecord> for EscalationRouter {
    fn route(&self, record: &TicketRecord) -> OutcomeKey {
        self.decide(record).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{Priority, SubjectId, TicketId};

    fn scored_record(quality: f64, priority: Priority) -> TicketRecord {
        let mut record =
            TicketRecord::new(TicketId::new("TKT1"), SubjectId::new("CUST001"), "query");
        record.classify(Intent::General, priority);
        record.record_quality(quality);
        record
    }

    #[test]
    fn test_low_quality_escalates_at_any_priority() {
        let record = scored_record(0.55, Priority::Normal);
        assert_eq!(EscalationRouter.decide(&record), ReviewOutcome::Escalate);
        assert_eq!(EscalationRouter.route(&record), OutcomeKey::new("escalate"));
    }

    #[test]
    fn test_good_quality_finalizes_even_high_priority() {
        let record = scored_record(0.85, Priority::High);
        assert_eq!(EscalationRouter.decide(&record), ReviewOutcome::Finalize);
        assert_eq!(EscalationRouter.route(&record), OutcomeKey::new("finalize"));
    }

    #[test]
    fn test_middling_quality_escalates_only_high_priority() {
        let high = scored_record(0.75, Priority::High);
        assert_eq!(EscalationRouter.decide(&high), ReviewOutcome::Escalate);

        let normal = scored_record(0.75, Priority::Normal);
        assert_eq!(EscalationRouter.decide(&normal), ReviewOutcome::Finalize);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        assert_eq!(
            EscalationRouter.decide(&scored_record(0.6, Priority::Normal)),
            ReviewOutcome::Finalize
        );
        assert_eq!(
            EscalationRouter.decide(&scored_record(0.8, Priority::High)),
            ReviewOutcome::Finalize
        );
    }

    #[test]
    fn test_unscored_record_escalates() {
        let mut record =
            TicketRecord::new(TicketId::new("TKT1"), SubjectId::new("CUST001"), "query");
        record.classify(Intent::General, Priority::Normal);
        assert_eq!(EscalationRouter.decide(&record), ReviewOutcome::Escalate);
    }

    #[test]
    fn test_dispatch_follows_classification() {
        let mut record =
            TicketRecord::new(TicketId::new("TKT1"), SubjectId::new("CUST001"), "query");
        record.classify(Intent::Billing, Priority::Normal);
        assert_eq!(DispatchRouter.route(&record), OutcomeKey::new("billing"));
    }

    #[test]
    fn test_dispatch_defaults_to_general() {
        let record =
            TicketRecord::new(TicketId::new("TKT1"), SubjectId::new("CUST001"), "query");
        assert_eq!(DispatchRouter.route(&record), OutcomeKey::new("general"));
    }
}

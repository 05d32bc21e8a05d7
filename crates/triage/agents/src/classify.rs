//! Intent classification and priority detection
//!
//! Keyword scan over the lowercased query text. Intent categories are
//! checked in a fixed order and the first hit wins, so a query that
//! mentions both a refund and a late fee still lands with the returns
//! handler. Unmatched queries fall through to [`Intent::General`].

use flow_types::Stage;
use triage_core::{Intent, Priority, TicketRecord};

// Checked in this order; earlier lists shadow later ones.
const RETURNS_WORDS: &[&str] = &["return", "refund", "send back", "wrong item"];
const BILLING_WORDS: &[&str] = &["charge", "bill", "payment", "balance", "fee"];
const TECH_WORDS: &[&str] = &[
    "not working",
    "broken",
    "crash",
    "error",
    "fix",
    "help",
    "troubleshoot",
    "wifi",
    "disconnect",
];
const ORDER_WORDS: &[&str] = &["where", "status", "tracking", "order", "arrived", "delivery"];

/// Any of these bumps the ticket to high priority
const HIGH_PRIORITY_WORDS: &[&str] = &["immediately", "urgent", "angry", "ridiculous", "terrible"];

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

/// Assign an intent category from the query wording
pub fn classify_query(query: &str) -> Intent {
    let query = query.to_lowercase();
    if contains_any(&query, RETURNS_WORDS) {
        Intent::Returns
    } else if contains_any(&query, BILLING_WORDS) {
        Intent::Billing
    } else if contains_any(&query, TECH_WORDS) {
        Intent::TechSupport
    } else if contains_any(&query, ORDER_WORDS) {
        Intent::OrderStatus
    } else {
        Intent::General
    }
}

/// Read the priority level from the query wording
pub fn detect_priority(query: &str) -> Priority {
    if contains_any(&query.to_lowercase(), HIGH_PRIORITY_WORDS) {
        Priority::High
    } else {
        Priority::Normal
    }
}

/// Entry stage. Writes classification and priority onto the record and
/// leaves one audit entry naming both.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassifyStage;

impl Stage<TicketRecord> for ClassifyStage {
    fn run(&self, record: &mut TicketRecord) {
        let intent = classify_query(record.query());
        let priority = detect_priority(record.query());
        record.classify(intent, priority);
        record.note(format!(
            "Intent classified as: {intent} (Priority: {priority})"
        ));
        tracing::debug!(ticket = %record.id(), %intent, %priority, "Query classified");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{SubjectId, TicketId};

    #[test]
    fn test_intent_keywords() {
        assert_eq!(classify_query("I want a refund"), Intent::Returns);
        assert_eq!(classify_query("Why was my card charged twice?"), Intent::Billing);
        assert_eq!(classify_query("The app keeps crashing"), Intent::TechSupport);
        assert_eq!(classify_query("Where is my delivery?"), Intent::OrderStatus);
        assert_eq!(classify_query("Do you sell gift cards?"), Intent::General);
    }

    #[test]
    fn test_first_category_wins() {
        // mentions both a return and a fee; returns is checked first
        assert_eq!(
            classify_query("I want to return this and get the fee refunded"),
            Intent::Returns
        );
        // billing beats tech support
        assert_eq!(
            classify_query("The payment page is broken"),
            Intent::Billing
        );
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(classify_query("WHERE IS MY ORDER?"), Intent::OrderStatus);
        assert_eq!(detect_priority("This is URGENT"), Priority::High);
    }

    #[test]
    fn test_priority_detection() {
        assert_eq!(detect_priority("This is ridiculous!"), Priority::High);
        assert_eq!(detect_priority("I need this fixed immediately"), Priority::High);
        assert_eq!(detect_priority("Just checking in on my order"), Priority::Normal);
    }

    #[test]
    fn test_stage_writes_record_and_audit() {
        let mut record = TicketRecord::new(
            TicketId::new("TKT1"),
            SubjectId::new("CUST001"),
            "My wifi is not working, help!",
        );
        ClassifyStage.run(&mut record);

        assert_eq!(record.classification(), Some(Intent::TechSupport));
        assert_eq!(record.priority(), Some(Priority::Normal));
        assert_eq!(
            record.audit().last(),
            Some("Intent classified as: tech_support (Priority: normal)")
        );
    }
}

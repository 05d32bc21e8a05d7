//! The ticket record threaded through the triage pipeline
//!
//! One record per run. Identity fields are set at construction and never
//! change; each mutable field has exactly one writer method, and the stage
//! that owns the field is the only one that calls it. The audit trail can
//! only grow.

use crate::{SubjectId, TicketId};
use flow_types::{AuditTrail, FlowState, OutcomeKey};
use serde::{Deserialize, Serialize};

// ── Intent ───────────────────────────────────────────────────────────

/// What the requester is asking for, as read from the query text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Returns,
    Billing,
    TechSupport,
    OrderStatus,
    General,
}

impl Intent {
    /// Every intent, in classification precedence order
    pub const ALL: [Intent; 5] = [
        Intent::Returns,
        Intent::Billing,
        Intent::TechSupport,
        Intent::OrderStatus,
        Intent::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Returns => "returns",
            Intent::Billing => "billing",
            Intent::TechSupport => "tech_support",
            Intent::OrderStatus => "order_status",
            Intent::General => "general",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Intent> for OutcomeKey {
    fn from(intent: Intent) -> Self {
        OutcomeKey::new(intent.as_str())
    }
}

// ── Priority ─────────────────────────────────────────────────────────

/// Urgency of the ticket, read from the query wording
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Normal,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Review Outcome ───────────────────────────────────────────────────

/// The two ways a scored ticket can leave review
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    Escalate,
    Finalize,
}

impl ReviewOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewOutcome::Escalate => "escalate",
            ReviewOutcome::Finalize => "finalize",
        }
    }
}

impl std::fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ReviewOutcome> for OutcomeKey {
    fn from(outcome: ReviewOutcome) -> Self {
        OutcomeKey::new(outcome.as_str())
    }
}

// ── Ticket Record ────────────────────────────────────────────────────

/// The single mutable record one run owns
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketRecord {
    id: TicketId,
    subject: SubjectId,
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    classification: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    escalated: Option<bool>,
    audit: AuditTrail,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_response: Option<String>,
}

impl TicketRecord {
    /// Open a fresh record. Id, subject and query are fixed for its lifetime.
    pub fn new(id: TicketId, subject: SubjectId, query: impl Into<String>) -> Self {
        Self {
            id,
            subject,
            query: query.into(),
            classification: None,
            priority: None,
            response: None,
            quality: None,
            escalated: None,
            audit: AuditTrail::new(),
            final_response: None,
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn id(&self) -> &TicketId {
        &self.id
    }

    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn classification(&self) -> Option<Intent> {
        self.classification
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn is_high_priority(&self) -> bool {
        self.priority == Some(Priority::High)
    }

    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn quality(&self) -> Option<f64> {
        self.quality
    }

    pub fn escalated(&self) -> Option<bool> {
        self.escalated
    }

    pub fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    pub fn final_response(&self) -> Option<&str> {
        self.final_response.as_deref()
    }

    // ── Writes (one stage, one field) ────────────────────────────────

    /// Written by the classification stage
    pub fn classify(&mut self, intent: Intent, priority: Priority) {
        self.classification = Some(intent);
        self.priority = Some(priority);
    }

    /// Written by the handler stage that served the ticket
    pub fn attach_response(&mut self, text: impl Into<String>) {
        self.response = Some(text.into());
    }

    /// Written by the scoring stage. Scores are clamped to `[0.0, 1.0]`.
    pub fn record_quality(&mut self, score: f64) {
        self.quality = Some(score.clamp(0.0, 1.0));
    }

    /// Written by whichever terminal-adjacent stage the router picked
    pub fn mark_escalated(&mut self, escalated: bool) {
        self.escalated = Some(escalated);
    }

    /// Written by a terminal stage; finalizes the record
    pub fn resolve(&mut self, text: impl Into<String>) {
        self.final_response = Some(text.into());
    }

    /// Append one audit entry
    pub fn note(&mut self, entry: impl Into<String>) {
        self.audit.append(entry);
    }
}

impl FlowState for TicketRecord {
    fn is_finalized(&self) -> bool {
        self.final_response
            .as_deref()
            .is_some_and(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record() -> TicketRecord {
        TicketRecord::new(
            TicketId::new("TKT10000"),
            SubjectId::new("CUST001"),
            "Where is my order?",
        )
    }

    #[test]
    fn test_fresh_record_is_unset() {
        let record = make_record();
        assert_eq!(record.query(), "Where is my order?");
        assert!(record.classification().is_none());
        assert!(record.priority().is_none());
        assert!(record.response().is_none());
        assert!(record.quality().is_none());
        assert!(record.escalated().is_none());
        assert!(record.audit().is_empty());
        assert!(!record.is_finalized());
    }

    #[test]
    fn test_classify_sets_intent_and_priority() {
        let mut record = make_record();
        record.classify(Intent::OrderStatus, Priority::Normal);
        assert_eq!(record.classification(), Some(Intent::OrderStatus));
        assert_eq!(record.priority(), Some(Priority::Normal));
        assert!(!record.is_high_priority());
    }

    #[test]
    fn test_quality_is_clamped() {
        let mut record = make_record();
        record.record_quality(1.7);
        assert_eq!(record.quality(), Some(1.0));
        record.record_quality(-0.3);
        assert_eq!(record.quality(), Some(0.0));
        record.record_quality(0.85);
        assert_eq!(record.quality(), Some(0.85));
    }

    #[test]
    fn test_resolve_finalizes() {
        let mut record = make_record();
        assert!(!record.is_finalized());
        record.resolve("");
        assert!(!record.is_finalized());
        record.resolve("Dear customer, ...");
        assert!(record.is_finalized());
    }

    #[test]
    fn test_notes_accumulate_in_order() {
        let mut record = make_record();
        record.note("classified");
        record.note("handled");
        assert_eq!(record.audit().len(), 2);
        assert_eq!(record.audit().last(), Some("handled"));
    }

    #[test]
    fn test_intent_outcome_keys() {
        assert_eq!(OutcomeKey::from(Intent::TechSupport).as_str(), "tech_support");
        assert_eq!(OutcomeKey::from(ReviewOutcome::Escalate).as_str(), "escalate");
        assert_eq!(OutcomeKey::from(ReviewOutcome::Finalize).as_str(), "finalize");
    }

    #[test]
    fn test_record_serializes_without_unset_fields() {
        let record = make_record();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"TKT10000\""));
        assert!(!json.contains("classification"));

        let mut record = make_record();
        record.classify(Intent::Billing, Priority::High);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"billing\""));
        assert!(json.contains("\"high\""));
    }
}

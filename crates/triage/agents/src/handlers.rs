//! Specialist handler stages
//!
//! One stage per intent family. Each looks up what it needs through the
//! shared [`DataProvider`], drafts a response from the matching template,
//! and leaves one audit entry. Lookups degrade to defaults, so a handler
//! never fails a run.

use crate::templates;
use flow_types::Stage;
use std::sync::Arc;
use triage_core::TicketRecord;
use triage_directory::{DataProvider, PolicyKind};

/// Offered when no known-issue key matches the query
const FALLBACK_REMEDY: &str = "1. Check if the issue occurs on other devices\n\
                               2. Restart the device/application\n\
                               3. Check for software updates\n\
                               4. Contact support if the issue persists";

/// Handles billing questions against the subject's account balance.
pub struct BillingStage {
    provider: Arc<dyn DataProvider>,
}

impl BillingStage {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }
}

impl Stage<TicketRecord> for BillingStage {
    fn run(&self, record: &mut TicketRecord) {
        let subject = self.provider.lookup_subject(record.subject());
        let policy = self.provider.lookup_policy(PolicyKind::Billing).into_billing();

        record.attach_response(templates::billing_response(&subject, &policy));
        record.note(format!(
            "Billing agent handled query. Balance: ${:.2}",
            subject.balance
        ));
        tracing::debug!(ticket = %record.id(), balance = subject.balance, "Billing handler drafted response");
    }
}

/// Handles technical issues. Picks the first known-issue remedy whose key
/// appears in the query, in provider order.
pub struct TechStage {
    provider: Arc<dyn DataProvider>,
}

impl TechStage {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }

    fn remedy_for(&self, query: &str) -> String {
        let query = query.to_lowercase();
        self.provider
            .known_issue_keys()
            .iter()
            .find(|key| query.contains(key.as_str()))
            .and_then(|key| self.provider.lookup_known_issue(key))
            .unwrap_or_else(|| FALLBACK_REMEDY.to_string())
    }
}

impl Stage<TicketRecord> for TechStage {
    fn run(&self, record: &mut TicketRecord) {
        let subject = self.provider.lookup_subject(record.subject());
        let policy = self.provider.lookup_policy(PolicyKind::TechSupport).into_support();
        let remedy = self.remedy_for(record.query());

        record.attach_response(templates::tech_response(&subject, &remedy, &policy));
        record.note("Tech support agent provided troubleshooting steps");
        tracing::debug!(ticket = %record.id(), "Tech handler drafted response");
    }
}

/// Handles returns and refunds.
pub struct ReturnsStage {
    provider: Arc<dyn DataProvider>,
}

impl ReturnsStage {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }
}

impl Stage<TicketRecord> for ReturnsStage {
    fn run(&self, record: &mut TicketRecord) {
        let subject = self.provider.lookup_subject(record.subject());
        let policy = self.provider.lookup_policy(PolicyKind::Returns).into_returns();

        record.attach_response(templates::returns_response(&subject, &policy));
        record.note("Returns agent initiated return process");
        tracing::debug!(ticket = %record.id(), "Returns handler drafted response");
    }
}

/// Handles order-status and anything unclassified. If the query carries an
/// `ORD`-prefixed token that matches an order on file, the response reports
/// that order.
pub struct GeneralStage {
    provider: Arc<dyn DataProvider>,
}

impl GeneralStage {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider }
    }
}

impl Stage<TicketRecord> for GeneralStage {
    fn run(&self, record: &mut TicketRecord) {
        let subject = self.provider.lookup_subject(record.subject());
        // tokens are looked up verbatim, "ORD12346?" is not an order id
        let order = record
            .query()
            .split_whitespace()
            .find(|token| token.starts_with("ORD"))
            .and_then(|token| self.provider.lookup_order(token));

        record.attach_response(templates::general_response(&subject, order.as_ref()));
        record.note("General agent handled query");
        tracing::debug!(ticket = %record.id(), order_found = order.is_some(), "General handler drafted response");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{SubjectId, TicketId};
    use triage_directory::InMemoryProvider;

    fn demo_provider() -> Arc<dyn DataProvider> {
        Arc::new(InMemoryProvider::with_demo_data())
    }

    fn record_for(subject: &str, query: &str) -> TicketRecord {
        TicketRecord::new(TicketId::new("TKT1"), SubjectId::new(subject), query)
    }

    #[test]
    fn test_billing_reports_amount_owed() {
        let mut record = record_for("CUST004", "Why am I being charged late fees?");
        BillingStage::new(demo_provider()).run(&mut record);

        let response = record.response().unwrap();
        assert!(response.contains("Dear David Brown"));
        assert!(response.contains("Account Balance: $120.50 (amount owed)"));
        assert_eq!(
            record.audit().last(),
            Some("Billing agent handled query. Balance: $-120.50")
        );
    }

    #[test]
    fn test_tech_matches_known_issue() {
        let mut record = record_for("CUST003", "My WiFi keeps disconnecting");
        TechStage::new(demo_provider()).run(&mut record);

        let response = record.response().unwrap();
        assert!(response.contains("Restart router, check if other devices connect"));
        // premium subject gets the premium response time
        assert!(response.contains("with 2 hours response time"));
    }

    #[test]
    fn test_tech_falls_back_to_generic_remedy() {
        let mut record = record_for("CUST002", "My printer is broken");
        TechStage::new(demo_provider()).run(&mut record);

        let response = record.response().unwrap();
        assert!(response.contains("1. Check if the issue occurs on other devices"));
        assert!(response.contains("4. Contact support if the issue persists"));
    }

    #[test]
    fn test_known_issue_precedence_is_provider_order() {
        // both "wifi" and "login" appear; "wifi" is registered first
        let mut record = record_for("CUST002", "After the wifi drops I cannot login");
        TechStage::new(demo_provider()).run(&mut record);

        let response = record.response().unwrap();
        assert!(response.contains("Restart router"));
        assert!(!response.contains("Reset password via email"));
    }

    #[test]
    fn test_returns_uses_subject_tier() {
        let mut record = record_for("CUST001", "I want to return my laptop");
        ReturnsStage::new(demo_provider()).run(&mut record);

        let response = record.response().unwrap();
        assert!(response.contains("Dear Alice Johnson"));
        assert!(response.contains("Return shipping: free for premium members"));
        assert_eq!(record.audit().last(), Some("Returns agent initiated return process"));
    }

    #[test]
    fn test_general_reports_matching_order() {
        let mut record = record_for("CUST002", "Where is ORD12346 right now");
        GeneralStage::new(demo_provider()).run(&mut record);

        let response = record.response().unwrap();
        assert!(response.contains("- Item: Headphones"));
        assert!(response.contains("- Status: In Transit"));
    }

    #[test]
    fn test_general_token_with_punctuation_misses() {
        let mut record = record_for("CUST002", "Where is my order ORD12346?");
        GeneralStage::new(demo_provider()).run(&mut record);

        let response = record.response().unwrap();
        assert!(response.contains("could you please provide"));
        assert!(!response.contains("Headphones"));
    }

    #[test]
    fn test_unknown_subject_degrades_to_default() {
        let mut record = record_for("CUST999", "I want a refund");
        ReturnsStage::new(demo_provider()).run(&mut record);

        let response = record.response().unwrap();
        assert!(response.contains("Dear Unknown"));
        assert!(response.contains("$5.99 for standard members"));
    }
}

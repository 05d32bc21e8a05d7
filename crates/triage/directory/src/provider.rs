//! The data-provider boundary and its in-memory implementation
//!
//! Handler stages only read through [`DataProvider`]; nothing in the
//! pipeline mutates it during a run. The provider is injected where the
//! pipeline is assembled, so tests and callers can swap datasets freely.

use crate::{
    BillingPolicy, OrderRecord, OrderStatus, PolicyKind, PolicyRecord, ReturnPolicy,
    SubjectRecord, SupportPolicy, Tier,
};
use std::collections::HashMap;
use triage_core::SubjectId;

/// Read-only lookups the handler stages depend on. Misses return defaults,
/// never errors.
pub trait DataProvider: Send + Sync {
    /// Account record for a subject; unknown ids yield the default record
    fn lookup_subject(&self, id: &SubjectId) -> SubjectRecord;

    /// Order on file, if any
    fn lookup_order(&self, order_id: &str) -> Option<OrderRecord>;

    /// Policy document for a kind; always resolves, defaults included
    fn lookup_policy(&self, kind: PolicyKind) -> PolicyRecord;

    /// Remedy text for a known-issue key, if the key is on file
    fn lookup_known_issue(&self, key: &str) -> Option<String>;

    /// Known-issue keys in match-precedence order
    fn known_issue_keys(&self) -> Vec<String>;
}

/// In-memory provider backed by plain maps. The demo dataset mirrors a
/// small retail support desk.
#[derive(Clone, Debug, Default)]
pub struct InMemoryProvider {
    subjects: HashMap<SubjectId, SubjectRecord>,
    orders: HashMap<String, OrderRecord>,
    return_policy: ReturnPolicy,
    billing_policy: BillingPolicy,
    support_policy: SupportPolicy,
    // insertion order decides which issue a query matches first
    known_issues: Vec<(String, String)>,
}

impl InMemoryProvider {
    /// Empty provider with default policies
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider seeded with the demo support-desk dataset
    pub fn with_demo_data() -> Self {
        let mut provider = Self::new();

        let subjects = [
            ("CUST001", "Alice Johnson", Tier::Premium, -45.99),
            ("CUST002", "Bob Smith", Tier::Standard, 0.0),
            ("CUST003", "Carol White", Tier::Premium, 150.00),
            ("CUST004", "David Brown", Tier::Standard, -120.50),
            ("CUST005", "Emma Davis", Tier::Premium, 25.00),
            ("CUST006", "Frank Miller", Tier::Standard, -75.00),
            ("CUST007", "Grace Wilson", Tier::Premium, 0.0),
            ("CUST008", "Henry Taylor", Tier::Standard, -200.00),
        ];
        for (id, name, tier, balance) in subjects {
            provider.insert_subject(SubjectId::new(id), SubjectRecord::new(name, tier, balance));
        }

        let orders = [
            ("ORD12345", "CUST001", OrderStatus::Delivered, "Laptop", "2024-11-15"),
            ("ORD12346", "CUST002", OrderStatus::InTransit, "Headphones", "2024-12-10"),
            ("ORD12347", "CUST003", OrderStatus::Delivered, "Keyboard", "2024-12-01"),
            ("ORD12348", "CUST005", OrderStatus::Processing, "Monitor", "2024-12-15"),
            ("ORD12349", "CUST006", OrderStatus::Delivered, "Mouse", "2024-11-20"),
            ("ORD12350", "CUST007", OrderStatus::InTransit, "Webcam", "2024-12-12"),
            ("ORD12351", "CUST008", OrderStatus::Delivered, "Speakers", "2024-11-10"),
        ];
        for (order_id, subject, status, item, date) in orders {
            provider.insert_order(
                order_id,
                OrderRecord::new(SubjectId::new(subject), status, item, date),
            );
        }

        let issues = [
            (
                "wifi",
                "Restart router, check if other devices connect, verify password",
            ),
            (
                "app",
                "Clear cache, update app to latest version, reinstall if needed",
            ),
            (
                "slow",
                "Close background apps, check storage space, restart device",
            ),
            (
                "login",
                "Reset password via email, clear browser cookies, check caps lock",
            ),
        ];
        for (key, remedy) in issues {
            provider.insert_known_issue(key, remedy);
        }

        provider
    }

    pub fn insert_subject(&mut self, id: SubjectId, record: SubjectRecord) {
        self.subjects.insert(id, record);
    }

    pub fn insert_order(&mut self, order_id: impl Into<String>, record: OrderRecord) {
        self.orders.insert(order_id.into(), record);
    }

    /// Register a known issue. Keys are matched in insertion order.
    pub fn insert_known_issue(&mut self, key: impl Into<String>, remedy: impl Into<String>) {
        self.known_issues.push((key.into(), remedy.into()));
    }

    pub fn set_return_policy(&mut self, policy: ReturnPolicy) {
        self.return_policy = policy;
    }

    pub fn set_billing_policy(&mut self, policy: BillingPolicy) {
        self.billing_policy = policy;
    }

    pub fn set_support_policy(&mut self, policy: SupportPolicy) {
        self.support_policy = policy;
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl DataProvider for InMemoryProvider {
    fn lookup_subject(&self, id: &SubjectId) -> SubjectRecord {
        self.subjects
            .get(id)
            .cloned()
            .unwrap_or_else(SubjectRecord::unknown)
    }

    fn lookup_order(&self, order_id: &str) -> Option<OrderRecord> {
        self.orders.get(order_id).cloned()
    }

    fn lookup_policy(&self, kind: PolicyKind) -> PolicyRecord {
        match kind {
            PolicyKind::Returns => PolicyRecord::Returns(self.return_policy.clone()),
            PolicyKind::Billing => PolicyRecord::Billing(self.billing_policy.clone()),
            PolicyKind::TechSupport => PolicyRecord::TechSupport(self.support_policy.clone()),
        }
    }

    fn lookup_known_issue(&self, key: &str) -> Option<String> {
        self.known_issues
            .iter()
            .find(|(known, _)| known == key)
            .map(|(_, remedy)| remedy.clone())
    }

    fn known_issue_keys(&self) -> Vec<String> {
        self.known_issues.iter().map(|(key, _)| key.clone()).collect()
    }
}

//! Records served by the data provider
//!
//! Lookups never fail: a miss yields the documented default for the record
//! kind, so handler stages can always produce a response.

use serde::{Deserialize, Serialize};
use triage_core::SubjectId;

// ── Subjects ─────────────────────────────────────────────────────────

/// Membership tier of a subject
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Standard,
    Premium,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Standard => "standard",
            Tier::Premium => "premium",
        }
    }

    /// Capitalized form used in customer-facing text
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Standard => "Standard",
            Tier::Premium => "Premium",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account record of one requester. Negative balance means amount owed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub name: String,
    pub tier: Tier,
    pub balance: f64,
}

impl SubjectRecord {
    pub fn new(name: impl Into<String>, tier: Tier, balance: f64) -> Self {
        Self {
            name: name.into(),
            tier,
            balance,
        }
    }

    /// The record returned for ids the provider has never seen
    pub fn unknown() -> Self {
        Self::new("Unknown", Tier::Standard, 0.0)
    }

    pub fn owes_money(&self) -> bool {
        self.balance < 0.0
    }
}

// ── Orders ───────────────────────────────────────────────────────────

/// Fulfilment state of an order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Delivered,
    InTransit,
    Processing,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Delivered => "delivered",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Processing => "processing",
        }
    }

    /// Title-case form used in customer-facing text
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Delivered => "Delivered",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::Processing => "Processing",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One order on file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub subject: SubjectId,
    pub status: OrderStatus,
    pub item: String,
    pub date: String,
}

impl OrderRecord {
    pub fn new(
        subject: SubjectId,
        status: OrderStatus,
        item: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            subject,
            status,
            item: item.into(),
            date: date.into(),
        }
    }
}

// ── Policies ─────────────────────────────────────────────────────────

/// Which policy document a handler is asking for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Returns,
    Billing,
    TechSupport,
}

/// Return handling terms. Defaults are the documented fallback values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReturnPolicy {
    pub window: String,
    pub conditions: String,
    pub refund_time: String,
    pub premium_shipping: String,
    pub standard_shipping: String,
}

impl ReturnPolicy {
    pub fn shipping_for(&self, tier: Tier) -> &str {
        match tier {
            Tier::Premium => &self.premium_shipping,
            Tier::Standard => &self.standard_shipping,
        }
    }
}

impl Default for ReturnPolicy {
    fn default() -> Self {
        Self {
            window: "30 days".into(),
            conditions: "unused and in original packaging".into(),
            refund_time: "5-7 business days".into(),
            premium_shipping: "free".into(),
            standard_shipping: "$5.99".into(),
        }
    }
}

/// Invoice terms. Fee amounts are whole dollars.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPolicy {
    pub due_days: u32,
    pub initial_late_fee: u32,
    pub recurring_late_fee: u32,
    pub payment_plan_threshold: u32,
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            due_days: 15,
            initial_late_fee: 10,
            recurring_late_fee: 5,
            payment_plan_threshold: 100,
        }
    }
}

/// Response-time commitments per tier
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportPolicy {
    pub premium_response: String,
    pub standard_response: String,
}

impl SupportPolicy {
    pub fn response_time_for(&self, tier: Tier) -> &str {
        match tier {
            Tier::Premium => &self.premium_response,
            Tier::Standard => &self.standard_response,
        }
    }
}

impl Default for SupportPolicy {
    fn default() -> Self {
        Self {
            premium_response: "2 hours".into(),
            standard_response: "24 hours".into(),
        }
    }
}

/// A policy lookup result, tagged by kind
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PolicyRecord {
    Returns(ReturnPolicy),
    Billing(BillingPolicy),
    TechSupport(SupportPolicy),
}

impl PolicyRecord {
    /// Unwrap as a return policy; a mismatched kind falls back to defaults
    pub fn into_returns(self) -> ReturnPolicy {
        match self {
            PolicyRecord::Returns(policy) => policy,
            _ => ReturnPolicy::default(),
        }
    }

    /// Unwrap as a billing policy; a mismatched kind falls back to defaults
    pub fn into_billing(self) -> BillingPolicy {
        match self {
            PolicyRecord::Billing(policy) => policy,
            _ => BillingPolicy::default(),
        }
    }

    /// Unwrap as a support policy; a mismatched kind falls back to defaults
    pub fn into_support(self) -> SupportPolicy {
        match self {
            PolicyRecord::TechSupport(policy) => policy,
            _ => SupportPolicy::default(),
        }
    }
}

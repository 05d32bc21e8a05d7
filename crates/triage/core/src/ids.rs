//! Ticket and subject identifiers
//!
//! Ticket ids are handed out by a monotonic sequence owned by the caller,
//! so a batch replayed with the same inputs produces the same ids.

use serde::{Deserialize, Serialize};

/// Identifier of one support ticket
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId(pub String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of the requester (customer id in the demo dataset)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic ticket id generator: `TKT10000`, `TKT10001`, ...
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketIdSequence {
    next: u32,
}

impl TicketIdSequence {
    pub fn new() -> Self {
        Self::starting_at(10_000)
    }

    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Hand out the next id in the sequence
    pub fn next_id(&mut self) -> TicketId {
        let id = TicketId::new(format!("TKT{}", self.next));
        self.next += 1;
        id
    }

    /// The numeric value the next id will carry
    pub fn peek(&self) -> u32 {
        self.next
    }
}

impl Default for TicketIdSequence {
    fn default() -> Self {
        Self::new()
    }
}

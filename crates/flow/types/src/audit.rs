//! Append-only audit trail
//!
//! Every stage that touches a record leaves at least one entry here, so a
//! finished trail reads as the resolution history of the run. Entries can
//! be appended and read, never removed or rewritten.

use serde::{Deserialize, Serialize};

/// Ordered, append-only log of human-readable audit entries
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrail {
    entries: Vec<String>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry. Order of appends is preserved.
    pub fn append(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a AuditTrail {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

//! Stage and router contracts
//!
//! A stage transforms the threaded state in place; a router inspects it and
//! names the branch to take. Stages are infallible by contract: one that
//! cannot compute a value degrades to a documented default instead of
//! aborting the run. Routers must be deterministic and must not mutate.

use serde::{Deserialize, Serialize};

// ── Keys ─────────────────────────────────────────────────────────────

/// Name of a processing stage within a graph
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StageKey(pub String);

impl StageKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StageKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for StageKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Value a router returns at a branch point, matched against the branch map
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutcomeKey(pub String);

impl OutcomeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OutcomeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OutcomeKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for OutcomeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

// ── Contracts ────────────────────────────────────────────────────────

/// A processing stage: receives the state exactly once per run and mutates
/// it in place. Must append at least one audit entry describing what it did.
pub trait Stage<S>: Send + Sync {
    fn run(&self, state: &mut S);
}

impl<S, F> Stage<S> for F
where
    F: Fn(&mut S) + Send + Sync,
{
    fn run(&self, state: &mut S) {
        self(state)
    }
}

/// A routing decision at a branch point. Pure: same state, same outcome.
pub trait Router<S>: Send + Sync {
    fn route(&self, state: &S) -> OutcomeKey;
}

impl<S, F> Router<S> for F
where
    F: Fn(&S) -> OutcomeKey + Send + Sync,
{
    fn route(&self, state: &S) -> OutcomeKey {
        self(state)
    }
}

/// Implemented by any state threaded through a flow graph. The executor
/// checks this at terminal stages before declaring a run complete.
pub trait FlowState {
    /// True once the final deliverable is present and non-empty
    fn is_finalized(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        hits: u32,
    }

    #[test]
    fn test_stage_key_display_and_from() {
        let key = StageKey::new("classify");
        assert_eq!(format!("{}", key), "classify");
        assert_eq!(StageKey::from("classify"), key);
        assert_eq!(StageKey::from(String::from("classify")), key);
        assert_eq!(key.as_str(), "classify");
    }

    #[test]
    fn test_outcome_key_equality() {
        assert_eq!(OutcomeKey::new("escalate"), OutcomeKey::from("escalate"));
        assert_ne!(OutcomeKey::new("escalate"), OutcomeKey::new("finalize"));
    }

    #[test]
    fn test_closure_implements_stage() {
        let stage = |state: &mut Counter| state.hits += 1;
        let mut counter = Counter::default();
        Stage::run(&stage, &mut counter);
        Stage::run(&stage, &mut counter);
        assert_eq!(counter.hits, 2);
    }

    #[test]
    fn test_closure_implements_router() {
        let router = |state: &Counter| {
            if state.hits > 0 {
                OutcomeKey::new("seen")
            } else {
                OutcomeKey::new("fresh")
            }
        };
        assert_eq!(Router::route(&router, &Counter::default()), OutcomeKey::new("fresh"));
        assert_eq!(
            Router::route(&router, &Counter { hits: 3 }),
            OutcomeKey::new("seen")
        );
    }
}

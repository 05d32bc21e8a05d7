//! Flow graphs: named stages wired by static and conditional edges
//!
//! A FlowGraph is the static topology a record is threaded through:
//! - Stages are named processing steps (state in, state out)
//! - Unconditional edges always advance to one fixed stage
//! - Conditional edges consult a router and pick a branch by outcome key
//!
//! Every registration is checked as it happens; `validate` then checks the
//! whole topology before first use. Building takes `&mut self`, execution
//! takes `&self`, so a graph cannot change mid-run.

use crate::{FlowError, FlowResult, OutcomeKey, Router, Stage, StageKey};
use std::collections::{HashMap, HashSet};

// ── Branch Point ─────────────────────────────────────────────────────

/// A conditional edge: a router plus the outcome-to-stage branch map
pub struct BranchPoint<S> {
    router: Box<dyn Router<S>>,
    targets: HashMap<OutcomeKey, StageKey>,
}

impl<S> BranchPoint<S> {
    /// Ask the router to pick an outcome for this state
    pub fn route(&self, state: &S) -> OutcomeKey {
        self.router.route(state)
    }

    /// Resolve an outcome to its target stage, if one is registered
    pub fn target(&self, outcome: &OutcomeKey) -> Option<&StageKey> {
        self.targets.get(outcome)
    }

    pub fn targets(&self) -> &HashMap<OutcomeKey, StageKey> {
        &self.targets
    }
}

impl<S> std::fmt::Debug for BranchPoint<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchPoint")
            .field("targets", &self.targets)
            .finish_non_exhaustive()
    }
}

// ── Flow Graph ───────────────────────────────────────────────────────

/// The directed graph of stages a record is threaded through
pub struct FlowGraph<S> {
    stages: HashMap<StageKey, Box<dyn Stage<S>>>,
    edges: HashMap<StageKey, StageKey>,
    branches: HashMap<StageKey, BranchPoint<S>>,
    entry: Option<StageKey>,
    terminals: HashSet<StageKey>,
}

impl<S> FlowGraph<S> {
    pub fn new() -> Self {
        Self {
            stages: HashMap::new(),
            edges: HashMap::new(),
            branches: HashMap::new(),
            entry: None,
            terminals: HashSet::new(),
        }
    }

    /// Register a stage under a unique key
    pub fn register_stage(
        &mut self,
        key: impl Into<StageKey>,
        stage: impl Stage<S> + 'static,
    ) -> FlowResult<()> {
        let key = key.into();
        if self.stages.contains_key(&key) {
            return Err(FlowError::DuplicateStage(key));
        }
        self.stages.insert(key, Box::new(stage));
        Ok(())
    }

    /// Register an unconditional edge. Each stage may carry at most one
    /// outgoing transition of either kind.
    pub fn register_edge(
        &mut self,
        from: impl Into<StageKey>,
        to: impl Into<StageKey>,
    ) -> FlowResult<()> {
        let from = from.into();
        let to = to.into();
        if !self.stages.contains_key(&from) {
            return Err(FlowError::UnknownStage(from));
        }
        if !self.stages.contains_key(&to) {
            return Err(FlowError::UnknownStage(to));
        }
        if self.has_outgoing(&from) {
            return Err(FlowError::DuplicateEdge(from));
        }
        self.edges.insert(from, to);
        Ok(())
    }

    /// Register a conditional edge: a router plus a non-empty branch map
    pub fn register_conditional_edge(
        &mut self,
        from: impl Into<StageKey>,
        router: impl Router<S> + 'static,
        branches: impl IntoIterator<Item = (OutcomeKey, StageKey)>,
    ) -> FlowResult<()> {
        let from = from.into();
        if !self.stages.contains_key(&from) {
            return Err(FlowError::UnknownStage(from));
        }
        if self.has_outgoing(&from) {
            return Err(FlowError::DuplicateEdge(from));
        }
        let targets: HashMap<OutcomeKey, StageKey> = branches.into_iter().collect();
        if targets.is_empty() {
            return Err(FlowError::EmptyBranchSet(from));
        }
        for target in targets.values() {
            if !self.stages.contains_key(target) {
                return Err(FlowError::UnknownStage(target.clone()));
            }
        }
        self.branches.insert(
            from,
            BranchPoint {
                router: Box::new(router),
                targets,
            },
        );
        Ok(())
    }

    /// Designate the entry stage
    pub fn set_entry(&mut self, key: impl Into<StageKey>) -> FlowResult<()> {
        let key = key.into();
        if !self.stages.contains_key(&key) {
            return Err(FlowError::UnknownStage(key));
        }
        self.entry = Some(key);
        Ok(())
    }

    /// Mark a stage as a valid halting point
    pub fn mark_terminal(&mut self, key: impl Into<StageKey>) -> FlowResult<()> {
        let key = key.into();
        if !self.stages.contains_key(&key) {
            return Err(FlowError::UnknownStage(key));
        }
        self.terminals.insert(key);
        Ok(())
    }

    /// Validate the whole topology before first use
    ///
    /// Checks that an entry stage is set, at least one stage is terminal,
    /// every non-terminal stage has an outgoing transition, and every stage
    /// is reachable from the entry.
    pub fn validate(&self) -> FlowResult<()> {
        let entry = self.entry.as_ref().ok_or(FlowError::MissingEntry)?;
        if self.terminals.is_empty() {
            return Err(FlowError::NoTerminalStage);
        }

        // Sorted so the reported defect is stable across runs
        let mut keys: Vec<&StageKey> = self.stages.keys().collect();
        keys.sort();

        for key in &keys {
            if !self.terminals.contains(*key) && !self.has_outgoing(key) {
                return Err(FlowError::DeadEndStage((*key).clone()));
            }
        }

        let reachable = self.reachable_from(entry);
        for key in &keys {
            if !reachable.contains(*key) {
                return Err(FlowError::UnreachableStage((*key).clone()));
            }
        }

        Ok(())
    }

    // ── Read access ──────────────────────────────────────────────────

    pub fn entry(&self) -> Option<&StageKey> {
        self.entry.as_ref()
    }

    pub fn stage(&self, key: &StageKey) -> Option<&dyn Stage<S>> {
        self.stages.get(key).map(Box::as_ref)
    }

    pub fn edge(&self, from: &StageKey) -> Option<&StageKey> {
        self.edges.get(from)
    }

    pub fn branch(&self, from: &StageKey) -> Option<&BranchPoint<S>> {
        self.branches.get(from)
    }

    pub fn contains(&self, key: &StageKey) -> bool {
        self.stages.contains_key(key)
    }

    pub fn is_terminal(&self, key: &StageKey) -> bool {
        self.terminals.contains(key)
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn stage_keys(&self) -> impl Iterator<Item = &StageKey> {
        self.stages.keys()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&StageKey, &StageKey)> {
        self.edges.iter()
    }

    pub fn branch_points(&self) -> impl Iterator<Item = (&StageKey, &BranchPoint<S>)> {
        self.branches.iter()
    }

    pub fn terminals(&self) -> impl Iterator<Item = &StageKey> {
        self.terminals.iter()
    }

    fn has_outgoing(&self, key: &StageKey) -> bool {
        self.edges.contains_key(key) || self.branches.contains_key(key)
    }

    /// All stages reachable from `start` via BFS over both edge kinds
    fn reachable_from(&self, start: &StageKey) -> HashSet<StageKey> {
        let mut visited = HashSet::new();
        let mut queue = vec![start.clone()];

        while let Some(current) = queue.pop() {
            if visited.insert(current.clone()) {
                if let Some(target) = self.edges.get(&current) {
                    if !visited.contains(target) {
                        queue.push(target.clone());
                    }
                }
                if let Some(branch) = self.branches.get(&current) {
                    for target in branch.targets.values() {
                        if !visited.contains(target) {
                            queue.push(target.clone());
                        }
                    }
                }
            }
        }

        visited
    }
}

impl<S> Default for FlowGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for FlowGraph<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowGraph")
            .field("stages", &self.stages.keys().collect::<Vec<_>>())
            .field("edges", &self.edges)
            .field("branches", &self.branches)
            .field("entry", &self.entry)
            .field("terminals", &self.terminals)
            .finish()
    }
}

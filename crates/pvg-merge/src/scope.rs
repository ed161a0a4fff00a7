use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use pvg_types::EntityId;

/// Which side of the merge a perspective was reached from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    To,
    From,
}

/// The perspectives found for one context, one slot per side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContextPair {
    pub to: Option<EntityId>,
    pub from: Option<EntityId>,
}

/// Per-call merge state.
///
/// A fresh scope is built for every top-level merge and threaded down by
/// reference; concurrent unrelated merges never share one. All maps are
/// write-once per key: the first recording wins, repeats are ignored.
#[derive(Default)]
pub struct MergeScope {
    perspectives_by_context: Mutex<HashMap<String, ContextPair>>,
    contexts_by_perspective: Mutex<HashMap<EntityId, String>>,
    visited: Mutex<HashSet<(EntityId, Role)>>,
    completed: Mutex<HashMap<(EntityId, EntityId), EntityId>>,
}

impl MergeScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a perspective as visited for a role during index building.
    ///
    /// Returns `false` on a repeat visit; the caller then skips the subtree,
    /// which is what terminates traversal of cyclic link graphs.
    pub fn mark_visited(&self, id: EntityId, role: Role) -> bool {
        let mut visited = self.visited.lock().expect("lock poisoned");
        visited.insert((id, role))
    }

    /// Record a perspective under its context for one side of the merge.
    pub fn record_context(&self, context: &str, id: EntityId, role: Role) {
        {
            let mut by_context = self
                .perspectives_by_context
                .lock()
                .expect("lock poisoned");
            let pair = by_context.entry(context.to_string()).or_default();
            let slot = match role {
                Role::To => &mut pair.to,
                Role::From => &mut pair.from,
            };
            if slot.is_none() {
                *slot = Some(id);
            }
        }
        let mut by_perspective = self
            .contexts_by_perspective
            .lock()
            .expect("lock poisoned");
        by_perspective.entry(id).or_insert_with(|| context.to_string());
    }

    /// The pair of perspectives indexed for a context, if any.
    pub fn pair_for(&self, context: &str) -> Option<ContextPair> {
        let by_context = self
            .perspectives_by_context
            .lock()
            .expect("lock poisoned");
        by_context.get(context).copied()
    }

    /// The context an indexed perspective was recorded under, if any.
    pub fn context_of(&self, id: &EntityId) -> Option<String> {
        let by_perspective = self
            .contexts_by_perspective
            .lock()
            .expect("lock poisoned");
        by_perspective.get(id).cloned()
    }

    /// Claim a (to, from) pair, recording its merged id.
    ///
    /// Returns the previously recorded id when the pair was already claimed,
    /// so a pair reachable through two parents merges exactly once and a
    /// cyclic recursion bottoms out instead of looping.
    pub fn claim(&self, to: EntityId, from: EntityId, merged: EntityId) -> Option<EntityId> {
        let mut completed = self.completed.lock().expect("lock poisoned");
        match completed.get(&(to, from)) {
            Some(existing) => Some(*existing),
            None => {
                completed.insert((to, from), merged);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(b: u8) -> EntityId {
        EntityId::from_content(&[b])
    }

    #[test]
    fn visit_is_once_per_role() {
        let scope = MergeScope::new();
        assert!(scope.mark_visited(oid(1), Role::To));
        assert!(!scope.mark_visited(oid(1), Role::To));
        // The same perspective can still be visited for the other side.
        assert!(scope.mark_visited(oid(1), Role::From));
    }

    #[test]
    fn records_both_sides_of_a_context() {
        let scope = MergeScope::new();
        scope.record_context("page-intro", oid(1), Role::To);
        scope.record_context("page-intro", oid(2), Role::From);

        let pair = scope.pair_for("page-intro").unwrap();
        assert_eq!(pair.to, Some(oid(1)));
        assert_eq!(pair.from, Some(oid(2)));
        assert_eq!(scope.context_of(&oid(2)), Some("page-intro".into()));
    }

    #[test]
    fn first_recording_wins() {
        let scope = MergeScope::new();
        scope.record_context("ctx", oid(1), Role::To);
        scope.record_context("ctx", oid(9), Role::To);
        assert_eq!(scope.pair_for("ctx").unwrap().to, Some(oid(1)));
    }

    #[test]
    fn claim_is_exclusive_per_pair() {
        let scope = MergeScope::new();
        assert_eq!(scope.claim(oid(1), oid(2), oid(1)), None);
        assert_eq!(scope.claim(oid(1), oid(2), oid(1)), Some(oid(1)));
        // A different pair is independent.
        assert_eq!(scope.claim(oid(2), oid(1), oid(2)), None);
    }
}

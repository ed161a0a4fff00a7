use async_trait::async_trait;

use pvg_types::EntityId;

use crate::action::{Action, NodeActions};
use crate::error::MergeResult;
use crate::scope::MergeScope;

/// A merge strategy: the pluggable part of the merge engine.
///
/// Strategies share the three-way merge flow in
/// [`MergeCore::merge_perspectives_with`] and differ only in how child link
/// lists merge. The flow calls back into [`merge_links`], so a strategy's
/// link policy applies at every level of a recursive merge.
///
/// [`MergeCore::merge_perspectives_with`]: crate::core::MergeCore::merge_perspectives_with
/// [`merge_links`]: MergeStrategy::merge_links
#[async_trait]
pub trait MergeStrategy: Send + Sync {
    /// Merge perspective `from` into perspective `to`.
    ///
    /// Builds fresh per-call state, so concurrent unrelated merges never
    /// interfere. Returns the full ordered action log; no storage is
    /// written.
    async fn merge_perspectives(
        &self,
        to: &EntityId,
        from: &EntityId,
    ) -> MergeResult<NodeActions>;

    /// Merge within an already-established scope.
    ///
    /// Used for sub-merges during recursion; top-level callers use
    /// [`merge_perspectives`](MergeStrategy::merge_perspectives).
    async fn merge_perspectives_in(
        &self,
        scope: &MergeScope,
        to: &EntityId,
        from: &EntityId,
    ) -> MergeResult<NodeActions>;

    /// Merge child link lists.
    ///
    /// `modifications` holds one link list per branch, `to`'s first. Returns
    /// the final link ids plus any actions produced while resolving them.
    async fn merge_links(
        &self,
        scope: &MergeScope,
        original: &[EntityId],
        modifications: &[Vec<EntityId>],
    ) -> MergeResult<(Vec<EntityId>, Vec<Action>)>;
}

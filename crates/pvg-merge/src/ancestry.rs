//! Ancestry walks over the commit graph.
//!
//! Both walks are breadth-first over `parents_ids`, served through the
//! entity cache so repeated visits during one merge fetch each commit once.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use pvg_types::EntityId;

use crate::core::MergeCore;
use crate::error::MergeResult;

/// Whether `ancestor` is reachable from `descendant` through parent links.
///
/// A commit counts as its own ancestor.
pub async fn is_ancestor(
    core: &MergeCore,
    ancestor: &EntityId,
    descendant: &EntityId,
) -> MergeResult<bool> {
    let mut visited: HashSet<EntityId> = HashSet::new();
    let mut queue = VecDeque::from([*descendant]);
    while let Some(id) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        if id == *ancestor {
            return Ok(true);
        }
        let commit = core.read_commit(&id).await?;
        queue.extend(commit.payload.parents_ids);
    }
    Ok(false)
}

/// The nearest commit reachable from both `a` and `b`, if any.
pub async fn common_ancestor(
    core: &MergeCore,
    a: &EntityId,
    b: &EntityId,
) -> MergeResult<Option<EntityId>> {
    let mut ancestors_of_a: HashSet<EntityId> = HashSet::new();
    let mut queue = VecDeque::from([*a]);
    while let Some(id) = queue.pop_front() {
        if !ancestors_of_a.insert(id) {
            continue;
        }
        let commit = core.read_commit(&id).await?;
        queue.extend(commit.payload.parents_ids);
    }

    // Breadth-first from `b`: the first hit is the nearest shared commit.
    let mut visited: HashSet<EntityId> = HashSet::new();
    let mut queue = VecDeque::from([*b]);
    while let Some(id) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        if ancestors_of_a.contains(&id) {
            debug!(ancestor = %id.short_hex(), "common ancestor");
            return Ok(Some(id));
        }
        let commit = core.read_commit(&id).await?;
        queue.extend(commit.payload.parents_ids);
    }
    Ok(None)
}

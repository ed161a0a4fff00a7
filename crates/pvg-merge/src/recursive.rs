use async_trait::async_trait;
use futures::future::{try_join, try_join_all};
use tracing::debug;

use pvg_store::Perspective;
use pvg_types::EntityId;

use crate::action::{Action, NodeActions};
use crate::core::MergeCore;
use crate::error::{MergeError, MergeResult};
use crate::index::ContextIndexBuilder;
use crate::links::merge_link_lists;
use crate::scope::{MergeScope, Role};
use crate::strategy::MergeStrategy;

/// The identity a link merges under.
///
/// Perspective links merge by context — forks of the same document carry
/// different ids but the same context, and must be recognized as one thing.
/// Everything else merges by raw id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum LinkKey {
    Context(String),
    Plain(EntityId),
}

/// Context-aware recursive merge.
///
/// Links that are perspectives resolve to their context before the link
/// lists merge; every surviving context present on both sides triggers a
/// full recursive merge of that pair, and its actions join the parent's
/// log. The merged link lists carry real ids again, never contexts.
pub struct RecursiveContextMergeStrategy {
    core: MergeCore,
}

impl RecursiveContextMergeStrategy {
    pub fn new(core: MergeCore) -> Self {
        Self { core }
    }

    pub fn core(&self) -> &MergeCore {
        &self.core
    }

    async fn key_for(&self, scope: &MergeScope, id: &EntityId) -> MergeResult<LinkKey> {
        if let Some(context) = scope.context_of(id) {
            return Ok(LinkKey::Context(context));
        }
        let entity = self.core.read_entity(id).await?;
        if !entity.kind.is_perspective() {
            return Ok(LinkKey::Plain(*id));
        }
        // A perspective outside the index (e.g. only reachable through the
        // common ancestor) still merges by its own context.
        let perspective = Perspective::from_stored_entity(&entity)?;
        perspective
            .context
            .map(LinkKey::Context)
            .ok_or(MergeError::MissingContext(*id))
    }

    async fn resolve_key(
        &self,
        scope: &MergeScope,
        key: LinkKey,
    ) -> MergeResult<(EntityId, Vec<Action>)> {
        match key {
            LinkKey::Plain(id) => Ok((id, Vec::new())),
            LinkKey::Context(context) => {
                let pair = scope
                    .pair_for(&context)
                    .ok_or_else(|| MergeError::UnindexedContext(context.clone()))?;
                match (pair.to, pair.from) {
                    (Some(to), Some(from)) => {
                        debug!(context = %context, "merging context pair");
                        let node = self.merge_perspectives_in(scope, &to, &from).await?;
                        Ok((node.id, node.actions))
                    }
                    (Some(id), None) | (None, Some(id)) => Ok((id, Vec::new())),
                    (None, None) => Err(MergeError::UnindexedContext(context)),
                }
            }
        }
    }
}

#[async_trait]
impl MergeStrategy for RecursiveContextMergeStrategy {
    async fn merge_perspectives(
        &self,
        to: &EntityId,
        from: &EntityId,
    ) -> MergeResult<NodeActions> {
        let scope = MergeScope::new();
        let index = ContextIndexBuilder::new(&self.core);
        try_join(
            index.read_perspective(&scope, *to, Role::To),
            index.read_perspective(&scope, *from, Role::From),
        )
        .await?;
        self.merge_perspectives_in(&scope, to, from).await
    }

    async fn merge_perspectives_in(
        &self,
        scope: &MergeScope,
        to: &EntityId,
        from: &EntityId,
    ) -> MergeResult<NodeActions> {
        self.core
            .merge_perspectives_with(self, scope, to, from)
            .await
    }

    async fn merge_links(
        &self,
        scope: &MergeScope,
        original: &[EntityId],
        modifications: &[Vec<EntityId>],
    ) -> MergeResult<(Vec<EntityId>, Vec<Action>)> {
        let original_keys =
            try_join_all(original.iter().map(|id| self.key_for(scope, id))).await?;
        let modification_keys: Vec<Vec<LinkKey>> = try_join_all(
            modifications
                .iter()
                .map(|list| try_join_all(list.iter().map(|id| self.key_for(scope, id)))),
        )
        .await?;

        let merged_keys = merge_link_lists(&original_keys, &modification_keys);

        // Resolutions run concurrently but collect in key order, keeping the
        // action log deterministic.
        let resolved =
            try_join_all(merged_keys.into_iter().map(|key| self.resolve_key(scope, key)))
                .await?;

        let mut ids = Vec::with_capacity(resolved.len());
        let mut actions = Vec::new();
        for (id, mut sub_actions) in resolved {
            ids.push(id);
            actions.append(&mut sub_actions);
        }
        Ok((ids, actions))
    }
}

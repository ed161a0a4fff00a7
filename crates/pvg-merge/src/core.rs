use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use pvg_heads::HeadStore;
use pvg_patterns::PatternRegistry;
use pvg_remotes::RemoteRegistry;
use pvg_store::{
    Commit, EntityCache, EntityKind, EntityStore, Perspective, Signed, StoreError, StoredEntity,
};
use pvg_types::EntityId;

use crate::action::{Action, NodeActions};
use crate::ancestry;
use crate::builder::ActionBuilder;
use crate::error::{MergeError, MergeResult};
use crate::scope::MergeScope;
use crate::strategy::MergeStrategy;

/// Shared backbone of every merge strategy.
///
/// Holds the stores and registries a merge needs and implements the
/// three-way merge flow itself. Strategies plug in through
/// [`MergeStrategy::merge_links`]: the base strategy merges raw ids, the
/// recursive strategy resolves links to contexts and recurses — everything
/// else lives here once.
#[derive(Clone)]
pub struct MergeCore {
    store: Arc<EntityCache>,
    heads: Arc<dyn HeadStore>,
    remotes: Arc<RemoteRegistry>,
    patterns: Arc<PatternRegistry>,
}

impl MergeCore {
    pub fn new(
        store: Arc<EntityCache>,
        heads: Arc<dyn HeadStore>,
        remotes: Arc<RemoteRegistry>,
        patterns: Arc<PatternRegistry>,
    ) -> Self {
        Self {
            store,
            heads,
            remotes,
            patterns,
        }
    }

    pub fn store(&self) -> &EntityCache {
        &self.store
    }

    pub fn heads(&self) -> &dyn HeadStore {
        self.heads.as_ref()
    }

    pub fn remotes(&self) -> &RemoteRegistry {
        &self.remotes
    }

    pub fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }

    // -----------------------------------------------------------------------
    // Read helpers
    // -----------------------------------------------------------------------

    /// Fetch an entity, turning absence into [`MergeError::MissingEntity`].
    pub async fn read_entity(&self, id: &EntityId) -> MergeResult<StoredEntity> {
        self.store
            .get(id)
            .await?
            .ok_or(MergeError::MissingEntity(*id))
    }

    /// Fetch and decode a perspective header.
    pub async fn read_perspective(&self, id: &EntityId) -> MergeResult<Perspective> {
        let entity = self.read_entity(id).await?;
        Ok(Perspective::from_stored_entity(&entity)?)
    }

    /// Fetch and decode a signed commit.
    pub async fn read_commit(&self, id: &EntityId) -> MergeResult<Signed<Commit>> {
        let entity = self.read_entity(id).await?;
        Ok(Signed::<Commit>::from_stored_entity(&entity)?)
    }

    /// Fetch a data payload, returning its tag and decoded JSON.
    pub async fn read_data(&self, id: &EntityId) -> MergeResult<(String, Value)> {
        let entity = self.read_entity(id).await?;
        match &entity.kind {
            EntityKind::Data(tag) => Ok((tag.clone(), entity.decode()?)),
            other => Err(StoreError::CorruptEntity {
                id: *id,
                reason: format!("expected data entity, got {other}"),
            }
            .into()),
        }
    }

    /// Whether an id names a perspective entity.
    pub async fn is_perspective(&self, id: &EntityId) -> MergeResult<bool> {
        Ok(self.read_entity(id).await?.kind.is_perspective())
    }

    // -----------------------------------------------------------------------
    // Three-way merge
    // -----------------------------------------------------------------------

    /// Merge `from` into `to` under an established scope.
    ///
    /// The merged perspective keeps `to`'s id: a merge updates the existing
    /// head rather than minting a new perspective, so links pointing at `to`
    /// stay valid.
    pub async fn merge_perspectives_with(
        &self,
        strategy: &dyn MergeStrategy,
        scope: &MergeScope,
        to: &EntityId,
        from: &EntityId,
    ) -> MergeResult<NodeActions> {
        if to == from {
            return Ok(NodeActions::unchanged(*to));
        }
        // Claiming the pair up front makes repeated (and cyclic) sub-merges
        // of the same pair resolve to the already-chosen id.
        if let Some(done) = scope.claim(*to, *from, *to) {
            return Ok(NodeActions::unchanged(done));
        }

        let to_head = self
            .heads
            .head(to)
            .await?
            .ok_or(MergeError::MissingHead(*to))?;
        let from_head = self
            .heads
            .head(from)
            .await?
            .ok_or(MergeError::MissingHead(*from))?;
        if to_head == from_head {
            return Ok(NodeActions::unchanged(*to));
        }

        let to_perspective = self.read_perspective(to).await?;
        let authority = to_perspective.authority;

        if ancestry::is_ancestor(self, &from_head, &to_head).await? {
            // `to` already contains everything `from` has.
            return Ok(NodeActions::unchanged(*to));
        }
        if ancestry::is_ancestor(self, &to_head, &from_head).await? {
            debug!(
                to = %to.short_hex(),
                head = %from_head.short_hex(),
                "fast-forward"
            );
            return Ok(NodeActions {
                id: *to,
                actions: vec![Action::UpdateHead {
                    perspective: *to,
                    old_head: Some(to_head),
                    new_head: from_head,
                    authority,
                }],
            });
        }

        let ancestor = ancestry::common_ancestor(self, &to_head, &from_head).await?;

        let to_commit = self.read_commit(&to_head).await?;
        let from_commit = self.read_commit(&from_head).await?;
        let (tag, to_value) = self.read_data(&to_commit.payload.data_id).await?;
        let (_, from_value) = self.read_data(&from_commit.payload.data_id).await?;
        let original_value = match ancestor {
            Some(commit_id) => {
                let commit = self.read_commit(&commit_id).await?;
                Some(self.read_data(&commit.payload.data_id).await?.1)
            }
            None => None,
        };

        let pattern = self.patterns.get(&tag)?;
        let original_links = match &original_value {
            Some(value) => pattern.children(value)?,
            None => Vec::new(),
        };
        let to_links = pattern.children(&to_value)?;
        let from_links = pattern.children(&from_value)?;

        let merged_content =
            pattern.merge_content(original_value.as_ref(), &[to_value, from_value])?;
        let (merged_links, mut actions) = strategy
            .merge_links(scope, &original_links, &[to_links, from_links])
            .await?;
        let merged_value = pattern.replace_children(&merged_content, &merged_links)?;
        let merged_entity = StoredEntity::data(tag, &merged_value)?;

        let remote = self.remotes.get(&authority)?;
        let merged_data_id = merged_entity.compute_id(remote.hash_recipe());
        if merged_data_id == to_commit.payload.data_id {
            // This node's data is untouched; only child actions bubble up.
            return Ok(NodeActions { id: *to, actions });
        }

        let node_actions = ActionBuilder::new(self)
            .update_perspective_data(
                *to,
                &authority,
                Some(to_head),
                &[to_head, from_head],
                merged_entity,
            )
            .await?;
        actions.extend(node_actions);
        Ok(NodeActions {
            id: *to,
            actions,
        })
    }
}

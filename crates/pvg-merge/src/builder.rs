use tracing::debug;

use pvg_store::{Commit, Signed, StoredEntity};
use pvg_types::{Authority, EntityId};

use crate::action::Action;
use crate::core::MergeCore;
use crate::error::MergeResult;

/// Builds the ordered action triple that points a perspective at new data.
pub struct ActionBuilder<'a> {
    core: &'a MergeCore,
}

impl<'a> ActionBuilder<'a> {
    pub fn new(core: &'a MergeCore) -> Self {
        Self { core }
    }

    /// Emit `CreateData`, `CreateCommit`, `UpdateHead` for a new payload.
    ///
    /// Ids are hashed under the authority's recipe and require its write
    /// credential. The commit timestamp is `max(parent timestamps) + 1`
    /// rather than wall-clock time, so identical inputs always build
    /// identical actions. Pending entities are seeded into the cache so
    /// reads during the rest of the merge can resolve them.
    pub async fn update_perspective_data(
        &self,
        perspective: EntityId,
        authority: &Authority,
        old_head: Option<EntityId>,
        parents: &[EntityId],
        payload: StoredEntity,
    ) -> MergeResult<Vec<Action>> {
        let remote = self.core.remotes().get(authority)?;
        let credential = remote.credential()?;
        let recipe = remote.hash_recipe();

        let data_id = payload.compute_id(recipe);

        let mut timestamp = 0;
        for parent in parents {
            let commit = self.core.read_commit(parent).await?;
            timestamp = timestamp.max(commit.payload.timestamp);
        }
        let timestamp = timestamp + 1;

        let commit = Commit {
            data_id,
            parents_ids: parents.to_vec(),
            creators_ids: vec![credential.user_id.clone()],
            message: "merge".into(),
            timestamp,
        };
        let signed = Signed::sign(commit, &credential.signing_key)?;
        let commit_entity = signed.to_stored_entity()?;
        let commit_id = commit_entity.compute_id(recipe);

        self.core.store().insert_pending(data_id, payload.clone());
        self.core
            .store()
            .insert_pending(commit_id, commit_entity.clone());

        debug!(
            perspective = %perspective.short_hex(),
            commit = %commit_id.short_hex(),
            data = %data_id.short_hex(),
            "built update actions"
        );

        Ok(vec![
            Action::CreateData {
                id: data_id,
                entity: payload,
                authority: authority.clone(),
            },
            Action::CreateCommit {
                id: commit_id,
                entity: commit_entity,
                authority: authority.clone(),
            },
            Action::UpdateHead {
                perspective,
                old_head,
                new_head: commit_id,
                authority: authority.clone(),
            },
        ])
    }
}

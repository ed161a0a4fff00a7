use tracing::debug;

use pvg_heads::HeadStore;
use pvg_store::{EntityStore, StoreError};

use crate::action::Action;
use crate::error::MergeResult;

/// Apply an action log to a storage backend.
///
/// This is the contract a backend must honor: actions apply in list order,
/// so every create lands before the head update that references it. Created
/// entities are verified against their declared ids. The merge engine never
/// calls this itself — it only computes actions.
pub async fn apply_actions(
    store: &dyn EntityStore,
    heads: &dyn HeadStore,
    actions: &[Action],
) -> MergeResult<()> {
    for action in actions {
        match action {
            Action::CreateData { id, entity, .. } | Action::CreateCommit { id, entity, .. } => {
                let written = store.put(entity).await?;
                if written != *id {
                    return Err(StoreError::HashMismatch {
                        requested: *id,
                        actual: written,
                    }
                    .into());
                }
            }
            Action::UpdateHead {
                perspective,
                old_head,
                new_head,
                ..
            } => {
                heads.update_head(perspective, *old_head, *new_head).await?;
            }
        }
    }
    debug!(count = actions.len(), "applied actions");
    Ok(())
}

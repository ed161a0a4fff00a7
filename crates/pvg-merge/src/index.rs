use futures::future::{try_join_all, BoxFuture, FutureExt};
use tracing::debug;

use pvg_types::EntityId;

use crate::core::MergeCore;
use crate::error::{MergeError, MergeResult};
use crate::scope::{MergeScope, Role};

/// Builds the context index for one side of a merge.
///
/// Walks a perspective tree from its root, recording every reachable
/// perspective under its context so the recursive strategy can pair forks
/// of the same document across the two sides.
pub struct ContextIndexBuilder<'a> {
    core: &'a MergeCore,
}

impl<'a> ContextIndexBuilder<'a> {
    pub fn new(core: &'a MergeCore) -> Self {
        Self { core }
    }

    /// Index a perspective and its whole subtree for `role`.
    ///
    /// Sibling links are traversed concurrently and the call joins the full
    /// subtree. A repeat `(id, role)` visit is a no-op, which terminates the
    /// walk on cyclic link graphs.
    pub fn read_perspective<'s>(
        &'s self,
        scope: &'s MergeScope,
        id: EntityId,
        role: Role,
    ) -> BoxFuture<'s, MergeResult<()>> {
        async move {
            if !scope.mark_visited(id, role) {
                return Ok(());
            }

            let perspective = self.core.read_perspective(&id).await?;
            let context = perspective
                .context
                .ok_or(MergeError::MissingContext(id))?;
            scope.record_context(&context, id, role);
            debug!(
                perspective = %id.short_hex(),
                context = %context,
                ?role,
                "indexed perspective"
            );

            let head = self
                .core
                .heads()
                .head(&id)
                .await?
                .ok_or(MergeError::MissingHead(id))?;
            let commit = self.core.read_commit(&head).await?;
            let (tag, value) = self.core.read_data(&commit.payload.data_id).await?;
            let links = self.core.patterns().get(&tag)?.children(&value)?;

            let subtrees = links.into_iter().map(|link| async move {
                if self.core.is_perspective(&link).await? {
                    self.read_perspective(scope, link, role).await?;
                }
                Ok::<(), MergeError>(())
            });
            try_join_all(subtrees).await?;
            Ok(())
        }
        .boxed()
    }
}

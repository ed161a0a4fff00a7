use async_trait::async_trait;

use pvg_types::EntityId;

use crate::action::{Action, NodeActions};
use crate::core::MergeCore;
use crate::error::MergeResult;
use crate::links::merge_link_lists;
use crate::scope::MergeScope;
use crate::strategy::MergeStrategy;

/// Plain three-way merge: links are opaque ids.
///
/// Two branches linking to forks of the same document will not recognize
/// them as the same thing — both links survive. Use
/// [`RecursiveContextMergeStrategy`] when links may be perspectives.
///
/// [`RecursiveContextMergeStrategy`]: crate::recursive::RecursiveContextMergeStrategy
pub struct BaseMergeStrategy {
    core: MergeCore,
}

impl BaseMergeStrategy {
    pub fn new(core: MergeCore) -> Self {
        Self { core }
    }

    pub fn core(&self) -> &MergeCore {
        &self.core
    }
}

#[async_trait]
impl MergeStrategy for BaseMergeStrategy {
    async fn merge_perspectives(
        &self,
        to: &EntityId,
        from: &EntityId,
    ) -> MergeResult<NodeActions> {
        let scope = MergeScope::new();
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
        _scope: &MergeScope,
        original: &[EntityId],
        modifications: &[Vec<EntityId>],
    ) -> MergeResult<(Vec<EntityId>, Vec<Action>)> {
        Ok((merge_link_lists(original, modifications), Vec::new()))
    }
}

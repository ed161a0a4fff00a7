use async_trait::async_trait;
use pvg_types::EntityId;

use crate::error::HeadResult;

/// Storage backend for perspective head pointers.
///
/// Implementations must be thread-safe and apply updates atomically per
/// perspective. Cross-perspective atomicity is not part of the contract.
#[async_trait]
pub trait HeadStore: Send + Sync {
    /// Read the current head commit of a perspective.
    ///
    /// Returns `Ok(None)` if no head has been set.
    async fn head(&self, perspective: &EntityId) -> HeadResult<Option<EntityId>>;

    /// Move a perspective's head from `old` to `new`.
    ///
    /// Compare-and-swap: fails with [`HeadError::StaleHead`] if the stored
    /// head does not equal `old`. Pass `None` for `old` when setting the
    /// initial head.
    ///
    /// [`HeadError::StaleHead`]: crate::error::HeadError::StaleHead
    async fn update_head(
        &self,
        perspective: &EntityId,
        old: Option<EntityId>,
        new: EntityId,
    ) -> HeadResult<()>;
}

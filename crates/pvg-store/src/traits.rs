use async_trait::async_trait;
use pvg_crypto::HashRecipe;
use pvg_types::EntityId;

use crate::entity::StoredEntity;
use crate::error::StoreResult;

/// Content-addressed entity store.
///
/// All implementations must satisfy these invariants:
/// - Entities are immutable once written. Content-addressing guarantees this:
///   the same bytes always produce the same id.
/// - Writes are idempotent: re-writing an existing entity is a no-op.
/// - Concurrent reads are always safe (entities are immutable).
/// - The store never interprets entity contents beyond the kind tag.
///
/// The trait is async because backends are typically remote; callers that
/// need deadlines layer them at this boundary.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Read an entity by its content-addressed id.
    ///
    /// Returns `Ok(None)` if the entity does not exist.
    /// Returns `Err` on I/O failure or data corruption.
    async fn get(&self, id: &EntityId) -> StoreResult<Option<StoredEntity>>;

    /// Write an entity and return its content-addressed id.
    ///
    /// The returned id is computed under this store's recipe.
    async fn put(&self, entity: &StoredEntity) -> StoreResult<EntityId>;

    /// Check whether an entity exists in the store.
    async fn exists(&self, id: &EntityId) -> StoreResult<bool> {
        Ok(self.get(id).await?.is_some())
    }

    /// The hashing recipe this store derives ids under.
    fn recipe(&self) -> &HashRecipe;
}

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use pvg_crypto::HashRecipe;
use pvg_types::EntityId;
use tracing::debug;

use crate::entity::StoredEntity;
use crate::error::{StoreError, StoreResult};
use crate::traits::EntityStore;

/// Memoizing, hash-verifying wrapper around an [`EntityStore`].
///
/// Duplicate reads of the same id during one traversal are served from the
/// cache instead of re-fetching. Entities arriving from the backend are
/// re-hashed under the backend's recipe; a disagreement with the requested
/// id surfaces as [`StoreError::HashMismatch`].
///
/// The cache also holds *pending* entities: entities the merge engine has
/// computed but not yet applied to storage. Seeding them here lets recursive
/// reads resolve ids that only exist in the action log so far.
pub struct EntityCache {
    inner: Arc<dyn EntityStore>,
    cached: RwLock<HashMap<EntityId, StoredEntity>>,
}

impl EntityCache {
    /// Wrap a backend store in a fresh cache.
    pub fn new(inner: Arc<dyn EntityStore>) -> Self {
        Self {
            inner,
            cached: RwLock::new(HashMap::new()),
        }
    }

    /// Seed the cache with a pending entity under a caller-computed id.
    ///
    /// Used for entities created during a merge: they may be hashed under a
    /// foreign authority's recipe, so no verification happens here.
    pub fn insert_pending(&self, id: EntityId, entity: StoredEntity) {
        let mut map = self.cached.write().expect("lock poisoned");
        map.entry(id).or_insert(entity);
    }

    /// Number of cached entities.
    pub fn len(&self) -> usize {
        self.cached.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cached.read().expect("lock poisoned").is_empty()
    }
}

#[async_trait]
impl EntityStore for EntityCache {
    async fn get(&self, id: &EntityId) -> StoreResult<Option<StoredEntity>> {
        {
            let map = self.cached.read().expect("lock poisoned");
            if let Some(entity) = map.get(id) {
                return Ok(Some(entity.clone()));
            }
        }

        let Some(entity) = self.inner.get(id).await? else {
            return Ok(None);
        };

        let actual = entity.compute_id(self.inner.recipe());
        if actual != *id {
            return Err(StoreError::HashMismatch {
                requested: *id,
                actual,
            });
        }

        debug!(id = %id.short_hex(), "cached entity");
        let mut map = self.cached.write().expect("lock poisoned");
        map.entry(*id).or_insert_with(|| entity.clone());
        Ok(Some(entity))
    }

    async fn put(&self, entity: &StoredEntity) -> StoreResult<EntityId> {
        let id = self.inner.put(entity).await?;
        let mut map = self.cached.write().expect("lock poisoned");
        map.entry(id).or_insert_with(|| entity.clone());
        Ok(id)
    }

    fn recipe(&self) -> &HashRecipe {
        self.inner.recipe()
    }
}

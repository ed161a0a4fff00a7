use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use pvg_crypto::HashRecipe;
use pvg_types::EntityId;

use crate::entity::StoredEntity;
use crate::error::{StoreError, StoreResult};
use crate::traits::EntityStore;

/// In-memory, HashMap-based entity store.
///
/// Intended for tests and embedding. All entities are held in memory behind
/// a `RwLock`; entities are cloned on read/write.
pub struct InMemoryEntityStore {
    recipe: HashRecipe,
    entities: RwLock<HashMap<EntityId, StoredEntity>>,
}

impl InMemoryEntityStore {
    /// Create a new empty store using the default v1 recipe.
    pub fn new() -> Self {
        Self::with_recipe(HashRecipe::v1())
    }

    /// Create a new empty store with an explicit recipe.
    pub fn with_recipe(recipe: HashRecipe) -> Self {
        Self {
            recipe,
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Number of entities currently stored.
    pub fn len(&self) -> usize {
        self.entities.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn get(&self, id: &EntityId) -> StoreResult<Option<StoredEntity>> {
        let map = self.entities.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }

    async fn put(&self, entity: &StoredEntity) -> StoreResult<EntityId> {
        let id = entity.compute_id(&self.recipe);
        if id.is_null() {
            return Err(StoreError::NullEntityId);
        }
        let mut map = self.entities.write().expect("lock poisoned");
        // Idempotent: the same id always maps to the same content.
        map.entry(id).or_insert_with(|| entity.clone());
        Ok(id)
    }

    fn recipe(&self) -> &HashRecipe {
        &self.recipe
    }
}

impl std::fmt::Debug for InMemoryEntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryEntityStore")
            .field("entity_count", &self.len())
            .finish()
    }
}

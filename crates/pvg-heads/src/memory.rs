use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use pvg_types::EntityId;
use tracing::debug;

use crate::error::{HeadError, HeadResult};
use crate::traits::HeadStore;

/// In-memory head store backed by a `HashMap`.
///
/// Suitable for tests and single-process deployments. All updates go through
/// one lock, so the compare-and-swap in [`HeadStore::update_head`] is atomic.
#[derive(Default)]
pub struct InMemoryHeadStore {
    heads: RwLock<HashMap<EntityId, EntityId>>,
}

impl InMemoryHeadStore {
    /// Create an empty head store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of perspectives with a head set.
    pub fn len(&self) -> usize {
        self.heads.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no perspective has a head.
    pub fn is_empty(&self) -> bool {
        self.heads.read().expect("lock poisoned").is_empty()
    }
}

#[async_trait]
impl HeadStore for InMemoryHeadStore {
    async fn head(&self, perspective: &EntityId) -> HeadResult<Option<EntityId>> {
        let heads = self.heads.read().expect("lock poisoned");
        Ok(heads.get(perspective).copied())
    }

    async fn update_head(
        &self,
        perspective: &EntityId,
        old: Option<EntityId>,
        new: EntityId,
    ) -> HeadResult<()> {
        let mut heads = self.heads.write().expect("lock poisoned");
        let actual = heads.get(perspective).copied();
        if actual != old {
            return Err(HeadError::StaleHead {
                perspective: *perspective,
                expected: old,
                actual,
            });
        }
        heads.insert(*perspective, new);
        debug!(
            perspective = %perspective.short_hex(),
            head = %new.short_hex(),
            "updated head"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(b: u8) -> EntityId {
        EntityId::from_content(&[b])
    }

    #[tokio::test]
    async fn head_of_unknown_perspective_is_none() {
        let store = InMemoryHeadStore::new();
        assert_eq!(store.head(&oid(1)).await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn sets_and_advances_head() {
        let store = InMemoryHeadStore::new();
        let perspective = oid(1);

        store.update_head(&perspective, None, oid(2)).await.unwrap();
        assert_eq!(store.head(&perspective).await.unwrap(), Some(oid(2)));

        store
            .update_head(&perspective, Some(oid(2)), oid(3))
            .await
            .unwrap();
        assert_eq!(store.head(&perspective).await.unwrap(), Some(oid(3)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn rejects_stale_old_head() {
        let store = InMemoryHeadStore::new();
        let perspective = oid(1);
        store.update_head(&perspective, None, oid(2)).await.unwrap();

        let err = store
            .update_head(&perspective, Some(oid(9)), oid(3))
            .await
            .unwrap_err();
        match err {
            HeadError::StaleHead {
                expected, actual, ..
            } => {
                assert_eq!(expected, Some(oid(9)));
                assert_eq!(actual, Some(oid(2)));
            }
            other => panic!("unexpected error: {other}"),
        }

        // The failed swap must not have changed the head.
        assert_eq!(store.head(&perspective).await.unwrap(), Some(oid(2)));
    }

    #[tokio::test]
    async fn rejects_initial_set_when_head_exists() {
        let store = InMemoryHeadStore::new();
        let perspective = oid(1);
        store.update_head(&perspective, None, oid(2)).await.unwrap();

        let err = store
            .update_head(&perspective, None, oid(3))
            .await
            .unwrap_err();
        assert!(matches!(err, HeadError::StaleHead { .. }));
    }
}

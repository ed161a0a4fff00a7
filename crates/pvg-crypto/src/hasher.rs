use serde::{Deserialize, Serialize};

use pvg_types::EntityId;

/// Per-authority hashing recipe.
///
/// Every authority derives ids under its own recipe. The recipe's version tag
/// is folded into each hash computation, so the same logical content hashed
/// under two different recipes produces two different ids, while identical
/// content under the same recipe always produces the same id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashRecipe {
    /// Recipe version tag (e.g. "pvg-v1").
    pub version: String,
}

impl HashRecipe {
    /// Create a recipe with a custom version tag.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// The default v1 recipe (BLAKE3 over the canonical JSON encoding).
    pub fn v1() -> Self {
        Self::new("pvg-v1")
    }
}

impl Default for HashRecipe {
    fn default() -> Self {
        Self::v1()
    }
}

/// Kind-separated content hasher under a [`HashRecipe`].
///
/// The recipe version and a kind tag (e.g. `"perspective"`, `"commit"`,
/// `"data"`) are prepended to every hash computation. This prevents
/// cross-kind collisions: a commit and a data payload with identical bytes
/// produce different ids.
pub struct ContentHasher {
    domain: String,
}

impl ContentHasher {
    /// Create a hasher for a given recipe and entity kind tag.
    pub fn for_kind(recipe: &HashRecipe, kind_tag: &str) -> Self {
        Self {
            domain: format!("{}:{}", recipe.version, kind_tag),
        }
    }

    /// Hash raw bytes under this hasher's domain.
    pub fn hash(&self, data: &[u8]) -> EntityId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        EntityId::from_hash(*hasher.finalize().as_bytes())
    }
}

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use pvg_crypto::{ContentHasher, HashRecipe, Signature, SigningKey, VerifyingKey};
use pvg_types::{Authority, EntityId};

use crate::error::{StoreError, StoreResult};

/// The kind of entity stored.
///
/// The kind is a closed top-level tag; data payloads carry an additional
/// per-type tag used by the pattern registry to dispatch merge behavior.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Immutable header of a named pointer into the commit graph.
    Perspective,
    /// Signed snapshot referencing a data payload and parent commits.
    Commit,
    /// Data payload with a per-type tag (e.g. "text-node", "wiki").
    Data(String),
}

impl EntityKind {
    /// The domain tag used for hash separation.
    pub fn domain_tag(&self) -> &str {
        match self {
            Self::Perspective => "perspective",
            Self::Commit => "commit",
            Self::Data(_) => "data",
        }
    }

    /// Returns `true` if this is a perspective entity.
    pub fn is_perspective(&self) -> bool {
        matches!(self, Self::Perspective)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Perspective => write!(f, "perspective"),
            Self::Commit => write!(f, "commit"),
            Self::Data(tag) => write!(f, "data:{tag}"),
        }
    }
}

/// A stored entity: kind tag + canonical serialized bytes.
///
/// `StoredEntity` is the unit of storage. The store never interprets the
/// payload bytes — decoding is the consumer's concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntity {
    /// The kind of this entity.
    pub kind: EntityKind,
    /// The canonical serialized bytes of the entity.
    pub data: Vec<u8>,
}

impl StoredEntity {
    /// Create a stored entity from kind and bytes.
    pub fn new(kind: EntityKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// Create a data entity from a tag and a decoded JSON payload.
    ///
    /// `serde_json` sorts object keys, so the encoding — and therefore the
    /// id — is canonical regardless of how the value was assembled.
    pub fn data(tag: impl Into<String>, payload: &Value) -> StoreResult<Self> {
        let bytes =
            serde_json::to_vec(payload).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Self::new(EntityKind::Data(tag.into()), bytes))
    }

    /// Decode the payload bytes as JSON.
    pub fn decode(&self) -> StoreResult<Value> {
        serde_json::from_slice(&self.data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Compute the content-addressed id of this entity under a recipe.
    pub fn compute_id(&self, recipe: &HashRecipe) -> EntityId {
        ContentHasher::for_kind(recipe, self.kind.domain_tag()).hash(&self.data)
    }
}

// ---------------------------------------------------------------------------
// Perspective
// ---------------------------------------------------------------------------

/// Immutable header of a perspective (branch-like named pointer).
///
/// The id of a perspective is the hash of this header. The mutable head
/// commit is tracked by the authority's head store, not here — forking a
/// document creates a new perspective with a new id but the same `context`,
/// which is what the merge engine uses as the stable merge identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perspective {
    /// The authority owning this perspective's head.
    pub authority: Authority,
    /// Stable logical identity shared across forks of the same document.
    /// A perspective without a context cannot be merged by context.
    pub context: Option<String>,
    /// Identity of the creator.
    pub creator_id: String,
    /// Creation timestamp (milliseconds).
    pub timestamp: u64,
}

impl Perspective {
    /// Convert into a `StoredEntity` for storage.
    pub fn to_stored_entity(&self) -> StoreResult<StoredEntity> {
        let data =
            serde_json::to_vec(self).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(StoredEntity::new(EntityKind::Perspective, data))
    }

    /// Decode from a `StoredEntity`.
    pub fn from_stored_entity(entity: &StoredEntity) -> StoreResult<Self> {
        if entity.kind != EntityKind::Perspective {
            return Err(StoreError::Serialization(format!(
                "expected perspective, got {}",
                entity.kind
            )));
        }
        serde_json::from_slice(&entity.data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

/// Immutable snapshot payload. Stored on the wire as [`Signed<Commit>`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Id of the data payload this commit snapshots.
    pub data_id: EntityId,
    /// Ordered ancestry: the commits this one descends from.
    pub parents_ids: Vec<EntityId>,
    /// Identities of the creators.
    pub creators_ids: Vec<String>,
    /// Human-readable message.
    pub message: String,
    /// Creation timestamp (milliseconds).
    pub timestamp: u64,
}

/// Signature proof attached to a signed payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Public key of the signer.
    pub signer: [u8; 32],
    /// Ed25519 signature over the canonical payload encoding.
    pub signature: Signature,
}

/// A signed entity payload: the payload plus its signature proof.
///
/// The entity id is the hash of the whole signed envelope, so tampering with
/// either the payload or the proof changes the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signed<T> {
    pub payload: T,
    pub proof: Proof,
}

impl<T: Serialize + DeserializeOwned> Signed<T> {
    /// Sign a payload with the given key.
    pub fn sign(payload: T, key: &SigningKey) -> StoreResult<Self> {
        let bytes =
            serde_json::to_vec(&payload).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let signature = key.sign(&bytes);
        Ok(Self {
            payload,
            proof: Proof {
                signer: key.verifying_key().as_bytes(),
                signature,
            },
        })
    }

    /// Verify the proof against the payload.
    pub fn verify(&self) -> StoreResult<bool> {
        let bytes = serde_json::to_vec(&self.payload)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let Ok(key) = VerifyingKey::from_bytes(self.proof.signer) else {
            return Ok(false);
        };
        Ok(key.verify(&bytes, &self.proof.signature).is_ok())
    }
}

impl Signed<Commit> {
    /// Convert into a `StoredEntity` for storage.
    pub fn to_stored_entity(&self) -> StoreResult<StoredEntity> {
        let data =
            serde_json::to_vec(self).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(StoredEntity::new(EntityKind::Commit, data))
    }

    /// Decode from a `StoredEntity`.
    pub fn from_stored_entity(entity: &StoredEntity) -> StoreResult<Self> {
        if entity.kind != EntityKind::Commit {
            return Err(StoreError::Serialization(format!(
                "expected commit, got {}",
                entity.kind
            )));
        }
        serde_json::from_slice(&entity.data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Data payloads
// ---------------------------------------------------------------------------

/// The role of a text node within a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextKind {
    Title,
    Paragraph,
}

/// A document node: free text plus ordered child links.
///
/// Child links may point at plain data entities or at nested perspectives;
/// the merge engine decides per link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
    pub kind: TextKind,
    pub links: Vec<EntityId>,
}

impl TextNode {
    /// Data tag used for pattern dispatch.
    pub const TAG: &'static str = "text-node";

    /// Encode into the canonical JSON payload form.
    pub fn to_value(&self) -> StoreResult<Value> {
        serde_json::to_value(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Decode from a JSON payload.
    pub fn from_value(value: &Value) -> StoreResult<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Convert into a `StoredEntity` for storage.
    pub fn to_stored_entity(&self) -> StoreResult<StoredEntity> {
        StoredEntity::data(Self::TAG, &self.to_value()?)
    }
}

/// A wiki: a title plus an ordered list of page links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wiki {
    pub title: String,
    pub pages: Vec<EntityId>,
}

impl Wiki {
    /// Data tag used for pattern dispatch.
    pub const TAG: &'static str = "wiki";

    /// Encode into the canonical JSON payload form.
    pub fn to_value(&self) -> StoreResult<Value> {
        serde_json::to_value(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Decode from a JSON payload.
    pub fn from_value(value: &Value) -> StoreResult<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Convert into a `StoredEntity` for storage.
    pub fn to_stored_entity(&self) -> StoreResult<StoredEntity> {
        StoredEntity::data(Self::TAG, &self.to_value()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(b: u8) -> EntityId {
        EntityId::from_hash([b; 32])
    }

    #[test]
    fn perspective_roundtrip() {
        let perspective = Perspective {
            authority: Authority::new("pvg://local"),
            context: Some("wiki-home".into()),
            creator_id: "alice".into(),
            timestamp: 1000,
        };
        let stored = perspective.to_stored_entity().unwrap();
        assert_eq!(stored.kind, EntityKind::Perspective);
        let decoded = Perspective::from_stored_entity(&stored).unwrap();
        assert_eq!(perspective, decoded);
    }

    #[test]
    fn perspective_kind_mismatch() {
        let stored = StoredEntity::new(EntityKind::Commit, b"not a perspective".to_vec());
        assert!(Perspective::from_stored_entity(&stored).is_err());
    }

    #[test]
    fn signed_commit_roundtrip_and_verify() {
        let key = SigningKey::from_bytes([3u8; 32]);
        let commit = Commit {
            data_id: oid(1),
            parents_ids: vec![oid(2)],
            creators_ids: vec!["alice".into()],
            message: "edit page".into(),
            timestamp: 2000,
        };
        let signed = Signed::sign(commit, &key).unwrap();
        assert!(signed.verify().unwrap());

        let stored = signed.to_stored_entity().unwrap();
        let decoded = Signed::<Commit>::from_stored_entity(&stored).unwrap();
        assert_eq!(signed, decoded);
        assert!(decoded.verify().unwrap());
    }

    #[test]
    fn tampered_commit_fails_verification() {
        let key = SigningKey::from_bytes([3u8; 32]);
        let commit = Commit {
            data_id: oid(1),
            parents_ids: vec![],
            creators_ids: vec!["alice".into()],
            message: "original".into(),
            timestamp: 1,
        };
        let mut signed = Signed::sign(commit, &key).unwrap();
        signed.payload.message = "tampered".into();
        assert!(!signed.verify().unwrap());
    }

    #[test]
    fn data_entity_id_is_canonical() {
        // Assembling the same node through different routes must hash equal.
        let node = TextNode {
            text: "hello".into(),
            kind: TextKind::Paragraph,
            links: vec![oid(9)],
        };
        let a = node.to_stored_entity().unwrap();
        let b = StoredEntity::data(TextNode::TAG, &node.to_value().unwrap()).unwrap();
        let recipe = HashRecipe::v1();
        assert_eq!(a.compute_id(&recipe), b.compute_id(&recipe));
    }

    #[test]
    fn different_kinds_produce_different_ids() {
        let recipe = HashRecipe::v1();
        let bytes = b"identical".to_vec();
        let commit = StoredEntity::new(EntityKind::Commit, bytes.clone());
        let data = StoredEntity::new(EntityKind::Data("text-node".into()), bytes);
        assert_ne!(commit.compute_id(&recipe), data.compute_id(&recipe));
    }

    #[test]
    fn wiki_roundtrip() {
        let wiki = Wiki {
            title: "home".into(),
            pages: vec![oid(4), oid(5)],
        };
        let value = wiki.to_value().unwrap();
        let decoded = Wiki::from_value(&value).unwrap();
        assert_eq!(wiki, decoded);
    }

    #[test]
    fn entity_kind_display() {
        assert_eq!(format!("{}", EntityKind::Perspective), "perspective");
        assert_eq!(format!("{}", EntityKind::Commit), "commit");
        assert_eq!(format!("{}", EntityKind::Data("wiki".into())), "data:wiki");
    }
}

use pvg_types::EntityId;
use thiserror::Error;

/// Errors that can occur during entity store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An entity hashed to the null id.
    #[error("entity hashed to the null id")]
    NullEntityId,

    /// The locally computed id disagrees with the id the entity was fetched
    /// under. This is an integrity violation, never recovered silently.
    #[error("hash mismatch for {requested}: content hashes to {actual}")]
    HashMismatch {
        requested: EntityId,
        actual: EntityId,
    },

    /// The entity bytes could not be decoded as the expected kind.
    #[error("corrupt entity {id}: {reason}")]
    CorruptEntity { id: EntityId, reason: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O failure in a backend.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

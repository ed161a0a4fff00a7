use pvg_types::EntityId;
use thiserror::Error;

/// Errors that can occur during head operations.
#[derive(Debug, Error)]
pub enum HeadError {
    /// The expected old head did not match the stored head.
    #[error("stale head for perspective {perspective}: expected {expected:?}, found {actual:?}")]
    StaleHead {
        perspective: EntityId,
        expected: Option<EntityId>,
        actual: Option<EntityId>,
    },

    /// I/O failure in a backend.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for head operations.
pub type HeadResult<T> = std::result::Result<T, HeadError>;

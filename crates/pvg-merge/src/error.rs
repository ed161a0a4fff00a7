use pvg_heads::HeadError;
use pvg_patterns::PatternError;
use pvg_remotes::RemoteError;
use pvg_store::StoreError;
use pvg_types::EntityId;
use thiserror::Error;

/// Errors that can occur while computing a merge.
///
/// Any failure aborts the whole merge: the engine never emits a partial
/// action list.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A perspective in the merge has no head commit.
    #[error("perspective {0} has no head")]
    MissingHead(EntityId),

    /// A perspective in the merge carries no context and cannot be matched.
    #[error("perspective {0} has no context")]
    MissingContext(EntityId),

    /// A referenced entity is absent from the store.
    #[error("entity {0} not found")]
    MissingEntity(EntityId),

    /// A surviving link's context was never indexed for this merge.
    #[error("context {0:?} is not in the merge scope")]
    UnindexedContext(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Head(#[from] HeadError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Convenience type alias for merge operations.
pub type MergeResult<T> = std::result::Result<T, MergeError>;

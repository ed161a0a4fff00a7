use thiserror::Error;

/// Errors that can occur during pattern dispatch and content merging.
#[derive(Debug, Error)]
pub enum PatternError {
    /// No pattern is registered for the data tag.
    #[error("no pattern registered for data tag {0:?}")]
    UnrecognizedData(String),

    /// A payload did not decode as the pattern's type.
    #[error("invalid payload for {tag:?}: {reason}")]
    InvalidPayload { tag: String, reason: String },
}

/// Convenience type alias for pattern operations.
pub type PatternResult<T> = std::result::Result<T, PatternError>;

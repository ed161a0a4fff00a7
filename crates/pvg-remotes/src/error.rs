use pvg_types::Authority;
use thiserror::Error;

/// Errors that can occur when resolving remote configuration.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// No remote is registered for the authority.
    #[error("no remote registered for authority {0}")]
    UnresolvedAuthority(Authority),

    /// The remote is known but carries no write credential.
    #[error("no write credential for authority {0}")]
    UnauthorizedWrite(Authority),
}

/// Convenience type alias for remote operations.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

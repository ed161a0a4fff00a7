//! Per-authority configuration for the Perspective Version Graph.
//!
//! An authority is the namespace a perspective lives under. Each authority
//! hashes its entities with its own [`HashRecipe`] and may or may not grant
//! the local process write access. The [`RemoteRegistry`] maps authorities
//! to that configuration.
//!
//! [`HashRecipe`]: pvg_crypto::HashRecipe

pub mod error;
pub mod remote;

pub use error::{RemoteError, RemoteResult};
pub use remote::{Credential, Remote, RemoteRegistry};

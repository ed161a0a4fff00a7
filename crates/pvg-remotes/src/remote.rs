use std::collections::HashMap;

use pvg_crypto::{HashRecipe, SigningKey};
use pvg_types::Authority;
use tracing::debug;

use crate::error::{RemoteError, RemoteResult};

/// Identity used to author commits on a remote.
#[derive(Debug)]
pub struct Credential {
    /// Stable user identifier recorded as the commit creator.
    pub user_id: String,
    /// Key used to sign commits authored under this credential.
    pub signing_key: SigningKey,
}

impl Credential {
    pub fn new(user_id: impl Into<String>, signing_key: SigningKey) -> Self {
        Self {
            user_id: user_id.into(),
            signing_key,
        }
    }
}

/// Configuration for one authority.
///
/// Every authority hashes entities under its own recipe, so entities created
/// for a foreign perspective must be hashed with that authority's recipe
/// rather than the local one. Writes additionally require a credential.
#[derive(Debug)]
pub struct Remote {
    authority: Authority,
    hash_recipe: HashRecipe,
    credential: Option<Credential>,
}

impl Remote {
    pub fn new(authority: Authority, hash_recipe: HashRecipe) -> Self {
        Self {
            authority,
            hash_recipe,
            credential: None,
        }
    }

    /// Attach a write credential.
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    pub fn hash_recipe(&self) -> &HashRecipe {
        &self.hash_recipe
    }

    /// The write credential, or `UnauthorizedWrite` for read-only remotes.
    pub fn credential(&self) -> RemoteResult<&Credential> {
        self.credential
            .as_ref()
            .ok_or_else(|| RemoteError::UnauthorizedWrite(self.authority.clone()))
    }

    /// Whether this remote can author commits.
    pub fn can_write(&self) -> bool {
        self.credential.is_some()
    }
}

/// Lookup table from authority to remote configuration.
#[derive(Debug, Default)]
pub struct RemoteRegistry {
    remotes: HashMap<Authority, Remote>,
}

impl RemoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a remote under its authority, replacing any previous entry.
    pub fn register(&mut self, remote: Remote) {
        debug!(authority = %remote.authority(), writable = remote.can_write(), "registered remote");
        self.remotes.insert(remote.authority().clone(), remote);
    }

    /// Resolve an authority, or `UnresolvedAuthority` if none is registered.
    pub fn get(&self, authority: &Authority) -> RemoteResult<&Remote> {
        self.remotes
            .get(authority)
            .ok_or_else(|| RemoteError::UnresolvedAuthority(authority.clone()))
    }

    /// Number of registered remotes.
    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    /// Returns `true` if no remote is registered.
    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }
}

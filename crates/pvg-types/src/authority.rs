use std::fmt;

use serde::{Deserialize, Serialize};

/// The remote namespace owning a perspective.
///
/// An authority names the backend that holds a perspective's mutable head
/// (e.g. a specific server or ledger). Perspectives created under different
/// authorities can link to each other, but every head update is applied by
/// exactly one authority.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Authority(String);

impl Authority {
    /// Create an authority from its canonical name (e.g. "pvg://local").
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The canonical name of this authority.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Authority {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

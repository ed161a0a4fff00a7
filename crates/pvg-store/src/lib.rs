//! Content-addressed entity storage for the Perspective Version Graph.
//!
//! Every piece of data in PVG — perspectives, commits, data payloads — is
//! stored as an immutable entity identified by its recipe-parameterized
//! BLAKE3 hash. Only the head pointer of a perspective is mutable, and that
//! lives in `pvg-heads`, never here.
//!
//! # Entity Types
//!
//! - [`Perspective`] — immutable header of a named pointer (branch-like)
//! - [`Commit`] / [`Signed`] — signed snapshot referencing a payload and parents
//! - [`TextNode`] / [`Wiki`] — data payloads with outbound child links
//!
//! # Storage Backends
//!
//! All backends implement the async [`EntityStore`] trait:
//!
//! - [`InMemoryEntityStore`] — `HashMap`-based store for tests and embedding
//! - [`EntityCache`] — memoizing, hash-verifying wrapper around any backend
//!
//! # Design Rules
//!
//! 1. Entities are immutable once written (content-addressing guarantees this).
//! 2. Reads of the same id during one traversal are served from cache.
//! 3. The store never interprets entity contents beyond the kind tag.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod cache;
pub mod entity;
pub mod error;
pub mod memory;
pub mod traits;

pub use cache::EntityCache;
pub use entity::{
    Commit, EntityKind, Perspective, Proof, Signed, StoredEntity, TextKind, TextNode, Wiki,
};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryEntityStore;
pub use traits::EntityStore;

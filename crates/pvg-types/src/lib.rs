//! Foundation types for the Perspective Version Graph (PVG).
//!
//! This crate provides the identifier and namespace types used throughout the
//! PVG system. Every other PVG crate depends on `pvg-types`.
//!
//! # Key Types
//!
//! - [`EntityId`] — Content-addressed identifier (BLAKE3 hash)
//! - [`Authority`] — Remote namespace owning a perspective
//! - [`TypeError`] — Parsing and conversion failures

pub mod authority;
pub mod entity_id;
pub mod error;

pub use authority::Authority;
pub use entity_id::EntityId;
pub use error::TypeError;

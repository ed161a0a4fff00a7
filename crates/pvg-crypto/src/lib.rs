//! Cryptographic primitives for the Perspective Version Graph.
//!
//! Provides recipe-parameterized BLAKE3 content hashing and Ed25519
//! signing/verification for commit payloads.
//!
//! All crypto operations wrap established libraries — no custom cryptography.

pub mod hasher;
pub mod signer;

pub use hasher::{ContentHasher, HashRecipe};
pub use signer::{Signature, SignatureError, SigningKey, VerifyingKey};

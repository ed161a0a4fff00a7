//! Mutable head pointers for the Perspective Version Graph.
//!
//! A perspective's head is the only mutable state in the system: everything
//! else is content-addressed and immutable. Head updates use compare-and-swap
//! semantics so concurrent writers cannot silently overwrite each other.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{HeadError, HeadResult};
pub use memory::InMemoryHeadStore;
pub use traits::HeadStore;

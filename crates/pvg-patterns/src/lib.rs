//! Pluggable per-type merge behavior for Perspective Version Graph data.
//!
//! Each data payload carries a tag; a [`NodePattern`] registered for that tag
//! tells the merge engine which fields are child links and how to merge the
//! remaining scalar content. The engine itself stays type-agnostic.

pub mod content;
pub mod error;
pub mod pattern;
pub mod registry;
pub mod text_node;
pub mod wiki;

pub use content::{merge_result, merge_strings};
pub use error::{PatternError, PatternResult};
pub use pattern::NodePattern;
pub use registry::PatternRegistry;
pub use text_node::TextNodePattern;
pub use wiki::WikiPattern;

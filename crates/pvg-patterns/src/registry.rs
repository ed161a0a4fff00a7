use std::collections::HashMap;

use tracing::debug;

use crate::error::{PatternError, PatternResult};
use crate::pattern::NodePattern;
use crate::text_node::TextNodePattern;
use crate::wiki::WikiPattern;

/// Dispatch table from data tag to [`NodePattern`].
#[derive(Default)]
pub struct PatternRegistry {
    patterns: HashMap<&'static str, Box<dyn NodePattern>>,
}

impl PatternRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in patterns registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(TextNodePattern));
        registry.register(Box::new(WikiPattern));
        registry
    }

    /// Register a pattern under its tag, replacing any previous entry.
    pub fn register(&mut self, pattern: Box<dyn NodePattern>) {
        debug!(tag = pattern.tag(), "registered pattern");
        self.patterns.insert(pattern.tag(), pattern);
    }

    /// Resolve the pattern for a data tag.
    pub fn get(&self, tag: &str) -> PatternResult<&dyn NodePattern> {
        self.patterns
            .get(tag)
            .map(|p| p.as_ref())
            .ok_or_else(|| PatternError::UnrecognizedData(tag.to_string()))
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if no pattern is registered.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

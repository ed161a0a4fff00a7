//! Recursive, context-aware three-way merge for the Perspective Version
//! Graph.
//!
//! A merge takes two perspectives — `to` and `from` — and computes the
//! ordered [`Action`] log that would bring `to` up to date with both
//! branches. Nothing is written: applying the log is the backend's job
//! (see [`apply_actions`] for the contract).
//!
//! Two strategies are provided:
//!
//! - [`BaseMergeStrategy`] — plain three-way merge; links are opaque ids.
//! - [`RecursiveContextMergeStrategy`] — links that are perspectives merge
//!   by their *context*, the stable identity shared by forks of the same
//!   document, and each matched pair merges recursively.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use pvg_heads::InMemoryHeadStore;
//! # use pvg_patterns::PatternRegistry;
//! # use pvg_remotes::RemoteRegistry;
//! # use pvg_store::{EntityCache, InMemoryEntityStore};
//! # use pvg_types::EntityId;
//! # use pvg_merge::{MergeCore, MergeStrategy, RecursiveContextMergeStrategy};
//! # async fn demo(to: EntityId, from: EntityId) -> Result<(), Box<dyn std::error::Error>> {
//! let core = MergeCore::new(
//!     Arc::new(EntityCache::new(Arc::new(InMemoryEntityStore::new()))),
//!     Arc::new(InMemoryHeadStore::new()),
//!     Arc::new(RemoteRegistry::new()),
//!     Arc::new(PatternRegistry::with_defaults()),
//! );
//! let strategy = RecursiveContextMergeStrategy::new(core);
//! let node = strategy.merge_perspectives(&to, &from).await?;
//! println!("{} actions", node.actions.len());
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod ancestry;
pub mod apply;
pub mod base;
pub mod builder;
pub mod core;
pub mod error;
pub mod index;
pub mod links;
pub mod recursive;
pub mod scope;
pub mod strategy;

pub use action::{Action, NodeActions};
pub use apply::apply_actions;
pub use base::BaseMergeStrategy;
pub use builder::ActionBuilder;
pub use core::MergeCore;
pub use error::{MergeError, MergeResult};
pub use index::ContextIndexBuilder;
pub use links::merge_link_lists;
pub use recursive::RecursiveContextMergeStrategy;
pub use scope::{ContextPair, MergeScope, Role};
pub use strategy::MergeStrategy;

use serde::{Deserialize, Serialize};

use pvg_store::StoredEntity;
use pvg_types::{Authority, EntityId};

/// One intended mutation of the version graph.
///
/// The merge engine only computes actions; it never writes storage. A
/// backend applies them in list order: creates first, head updates last,
/// so every id an `UpdateHead` references already exists when it runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Store a new data payload under its content-addressed id.
    CreateData {
        id: EntityId,
        entity: StoredEntity,
        authority: Authority,
    },
    /// Store a new signed commit under its content-addressed id.
    CreateCommit {
        id: EntityId,
        entity: StoredEntity,
        authority: Authority,
    },
    /// Move a perspective's head, compare-and-swap against `old_head`.
    UpdateHead {
        perspective: EntityId,
        old_head: Option<EntityId>,
        new_head: EntityId,
        authority: Authority,
    },
}

impl Action {
    /// The authority that must apply this action.
    pub fn authority(&self) -> &Authority {
        match self {
            Self::CreateData { authority, .. }
            | Self::CreateCommit { authority, .. }
            | Self::UpdateHead { authority, .. } => authority,
        }
    }
}

/// Result of merging one node of the perspective tree.
///
/// `id` is the perspective (or plain entity) the parent should link to;
/// `actions` is the full ordered action log for this node and its subtree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeActions {
    pub id: EntityId,
    pub actions: Vec<Action>,
}

impl NodeActions {
    /// A node that needs no mutation: link to `id`, nothing to apply.
    pub fn unchanged(id: EntityId) -> Self {
        Self {
            id,
            actions: Vec::new(),
        }
    }

    /// Returns `true` if the merge produced no mutations.
    pub fn is_noop(&self) -> bool {
        self.actions.is_empty()
    }
}

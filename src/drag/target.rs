//! Drop target resolution.
//!
//! A drop zone is either a whole scope body (a column's surface, a board's
//! column strip) or a specific slot between two siblings. Resolution decides
//! whether the zone accepts the descriptor and what target a release implies;
//! the no-op decision belongs to the dispatching command, which also expands
//! the `End` sentinel against live sibling counts.

use crate::state::BoardState;
use crate::types::{BoardId, ColumnId, MoveTarget};
use serde::{Deserialize, Serialize};

use super::source::{CardDrag, ColumnDrag};

/// A region that can accept a drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "zone", rename_all = "snake_case")]
pub enum DropZone<Scope> {
    /// The whole scope: release means "append to the end"
    ScopeBody { scope: Scope },
    /// A specific gap between siblings: release means "land at this rank"
    Slot { scope: Scope, index: usize },
}

impl<Scope> DropZone<Scope> {
    /// The scope a release in this zone lands in
    pub fn scope(&self) -> &Scope {
        match self {
            Self::ScopeBody { scope } => scope,
            Self::Slot { scope, .. } => scope,
        }
    }

    fn target(&self) -> MoveTarget {
        match self {
            Self::ScopeBody { .. } => MoveTarget::End,
            Self::Slot { index, .. } => MoveTarget::Slot(*index),
        }
    }
}

/// What a release at a zone would do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDrop<Scope> {
    /// Destination scope
    pub scope: Scope,
    /// Destination target within that scope
    pub target: MoveTarget,
}

/// Resolve a card drag hovering over a zone. `None` when the zone does not
/// accept the descriptor (the card or the zone's column no longer exists).
pub fn resolve_card_drop(
    state: &BoardState,
    drag: &CardDrag,
    zone: &DropZone<ColumnId>,
) -> Option<ResolvedDrop<ColumnId>> {
    if state.card_index(&drag.id).is_none() || !state.has_column(zone.scope()) {
        return None;
    }
    Some(ResolvedDrop {
        scope: zone.scope().clone(),
        target: zone.target(),
    })
}

/// Resolve a column drag hovering over a board's column strip. `None` when
/// the zone does not accept the descriptor.
pub fn resolve_column_drop(
    state: &BoardState,
    drag: &ColumnDrag,
    zone: &DropZone<BoardId>,
) -> Option<ResolvedDrop<BoardId>> {
    if state.column_index(&drag.id).is_none() || !state.has_board(zone.scope()) {
        return None;
    }
    Some(ResolvedDrop {
        scope: zone.scope().clone(),
        target: zone.target(),
    })
}

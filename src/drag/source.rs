//! Drag source descriptors.
//!
//! A descriptor is an immutable snapshot taken at the moment a drag gesture
//! begins and never mutated for the duration of that gesture. The drop
//! resolution step is the only place that computes the target.

use crate::error::{BoardError, Result};
use crate::state::BoardState;
use crate::types::{BoardId, CardId, ColumnId};
use serde::{Deserialize, Serialize};

/// Identity and placement of a draggable entity at drag-start.
///
/// Generic over the entity's id and parent scope: cards are dragged within
/// and between columns, columns within a board's strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSource<Id, Scope> {
    /// The dragged entity
    pub id: Id,
    /// Scope the entity belonged to when the gesture began
    pub source_scope: Scope,
    /// Position value at capture
    pub source_position: usize,
    /// Rank among siblings at capture
    pub source_index: usize,
}

/// A card drag: scope is the card's column
pub type CardDrag = DragSource<CardId, ColumnId>;

/// A column drag: scope is the column's board
pub type ColumnDrag = DragSource<ColumnId, BoardId>;

impl CardDrag {
    /// Snapshot a card's placement at gesture start
    pub fn capture(state: &BoardState, id: &CardId) -> Result<Self> {
        let (scope, rank) = state
            .card_index(id)
            .ok_or_else(|| BoardError::CardNotFound { id: id.to_string() })?;
        let position = state.cards_in(&scope)[rank].position;
        Ok(Self {
            id: id.clone(),
            source_scope: scope,
            source_position: position,
            source_index: rank,
        })
    }
}

impl ColumnDrag {
    /// Snapshot a column's placement at gesture start
    pub fn capture(state: &BoardState, id: &ColumnId) -> Result<Self> {
        let (scope, rank) = state
            .column_index(id)
            .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })?;
        let position = state.columns_in(&scope)[rank].position;
        Ok(Self {
            id: id.clone(),
            source_scope: scope,
            source_position: position,
            source_index: rank,
        })
    }
}

//! In-memory ordering state: scope → sorted sibling vectors.
//!
//! `BoardState` is the only shared mutable resource in the engine. It is
//! read freely by the presentation layer through [`StateHandle`] and written
//! only by the move commands, under the per-scope serialization in
//! [`crate::context`]. Every vector is kept sorted by position at all times,
//! so a reader never observes a half-applied shift.

use crate::error::{BoardError, Result};
use crate::store::{CardPlacement, ColumnPlacement};
use crate::types::{end_position, sort_by_position, BoardId, Card, CardId, Column, ColumnId, Orderable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Remove-and-reinsert within one scope.
///
/// The scope's original position multiset is reassigned across the new
/// sequence: the moved entity takes the position value at the target rank
/// and the displaced siblings shift by exactly one rank toward the vacated
/// slot. Pre-existing gaps survive; the move itself introduces none.
fn reorder_entities<T: Orderable>(entities: &mut Vec<T>, from: usize, to: usize) -> usize {
    debug_assert!(from < entities.len());
    debug_assert!(to < entities.len());
    debug_assert_ne!(from, to);

    let positions: Vec<usize> = entities.iter().map(Orderable::position).collect();
    let moved = entities.remove(from);
    entities.insert(to, moved);
    for (entity, position) in entities.iter_mut().zip(positions) {
        entity.set_position(position);
    }
    entities[to].position()
}

/// Close the gap left by removing the entity that held `removed_rank`:
/// every sibling after it shifts down by one position.
fn close_gap<T: Orderable>(entities: &mut [T], removed_rank: usize) {
    for entity in entities[removed_rank..].iter_mut() {
        let position = entity.position();
        entity.set_position(position - 1);
    }
}

/// Open a gap at `insert_rank` and return the position value the incoming
/// entity takes: the pre-shift position of the sibling it displaces, or the
/// end position when appending. Siblings at or after the rank shift up by
/// one position.
fn open_gap<T: Orderable>(entities: &mut [T], insert_rank: usize) -> usize {
    debug_assert!(insert_rank <= entities.len());

    let position = if insert_rank == entities.len() {
        end_position(entities.iter().map(Orderable::position))
    } else {
        entities[insert_rank].position()
    };
    for entity in entities[insert_rank..].iter_mut() {
        let p = entity.position();
        entity.set_position(p + 1);
    }
    position
}

/// The per-scope ordered collections: columns keyed by board, cards keyed
/// by column. Vectors are always sorted by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    columns: HashMap<BoardId, Vec<Column>>,
    cards: HashMap<ColumnId, Vec<Card>>,
}

impl BoardState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// Columns of a board in display order (empty for an unknown board)
    pub fn columns_in(&self, board: &BoardId) -> &[Column] {
        self.columns.get(board).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cards of a column in display order (empty for an unknown column)
    pub fn cards_in(&self, column: &ColumnId) -> &[Card] {
        self.cards.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check whether a column exists
    pub fn has_column(&self, column: &ColumnId) -> bool {
        self.cards.contains_key(column)
    }

    /// Check whether a board exists
    pub fn has_board(&self, board: &BoardId) -> bool {
        self.columns.contains_key(board)
    }

    /// Find a card anywhere on the board
    pub fn find_card(&self, id: &CardId) -> Option<&Card> {
        self.cards.values().flatten().find(|c| &c.id == id)
    }

    /// Find a column anywhere
    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.values().flatten().find(|c| &c.id == id)
    }

    /// Current placement of a card: (parent column, rank among siblings)
    pub fn card_index(&self, id: &CardId) -> Option<(ColumnId, usize)> {
        self.cards.iter().find_map(|(scope, cards)| {
            cards
                .iter()
                .position(|c| &c.id == id)
                .map(|rank| (scope.clone(), rank))
        })
    }

    /// Current placement of a column: (parent board, rank among siblings)
    pub fn column_index(&self, id: &ColumnId) -> Option<(BoardId, usize)> {
        self.columns.iter().find_map(|(scope, columns)| {
            columns
                .iter()
                .position(|c| &c.id == id)
                .map(|rank| (scope.clone(), rank))
        })
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Add a column at the end of a board's strip. The board's scope is
    /// created on first use.
    pub fn add_column(
        &mut self,
        board: &BoardId,
        id: impl Into<ColumnId>,
        name: impl Into<String>,
    ) -> Result<Column> {
        let id = id.into();
        if self.has_column(&id) {
            return Err(BoardError::duplicate_id("column", id.to_string()));
        }

        let strip = self.columns.entry(board.clone()).or_default();
        let position = end_position(strip.iter().map(Orderable::position));
        let column = Column::new(id, name, board.clone(), position);
        strip.push(column.clone());
        self.cards.insert(column.id.clone(), Vec::new());
        Ok(column)
    }

    /// Remove a column. Refused while the column still holds cards.
    /// Sibling positions are not renumbered; gaps are tolerated.
    pub fn remove_column(&mut self, id: &ColumnId) -> Result<Column> {
        let count = self.cards_in(id).len();
        if count > 0 {
            return Err(BoardError::ColumnNotEmpty {
                id: id.to_string(),
                count,
            });
        }

        let (board, rank) = self
            .column_index(id)
            .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })?;
        self.cards.remove(id);
        let strip = self.columns.get_mut(&board).expect("board scope exists");
        Ok(strip.remove(rank))
    }

    /// Add a card at the end of a column
    pub fn add_card(&mut self, column: &ColumnId, title: impl Into<String>) -> Result<Card> {
        let cards = self
            .cards
            .get_mut(column)
            .ok_or_else(|| BoardError::ColumnNotFound {
                id: column.to_string(),
            })?;
        let position = end_position(cards.iter().map(Orderable::position));
        let card = Card::new(title, column.clone(), position);
        cards.push(card.clone());
        Ok(card)
    }

    /// Remove a card. Sibling positions are not renumbered; gaps are
    /// tolerated until the next move through the scope.
    pub fn remove_card(&mut self, id: &CardId) -> Result<Card> {
        let (scope, rank) = self
            .card_index(id)
            .ok_or_else(|| BoardError::CardNotFound { id: id.to_string() })?;
        let cards = self.cards.get_mut(&scope).expect("card scope exists");
        Ok(cards.remove(rank))
    }

    // =========================================================================
    // Move mutations (called only by move commands, under scope locks)
    // =========================================================================

    /// Reorder a card within its column; returns the card's new position value
    pub fn reorder_cards(&mut self, scope: &ColumnId, from: usize, to: usize) -> usize {
        let cards = self.cards.get_mut(scope).expect("card scope exists");
        reorder_entities(cards, from, to)
    }

    /// Reorder a column within its board; returns the column's new position value
    pub fn reorder_columns(&mut self, scope: &BoardId, from: usize, to: usize) -> usize {
        let columns = self.columns.get_mut(scope).expect("board scope exists");
        reorder_entities(columns, from, to)
    }

    /// Move a card between columns in one synchronous step: remove from the
    /// source (closing the gap), insert into the destination at `to` rank
    /// (opening a gap). Returns the card's new position value.
    ///
    /// No reader can observe the card absent from both scopes or present in
    /// both; callers hold the state write lock across the whole replace.
    pub fn transfer_card(
        &mut self,
        source: &ColumnId,
        from: usize,
        destination: &ColumnId,
        to: usize,
    ) -> usize {
        let source_cards = self.cards.get_mut(source).expect("source scope exists");
        let mut card = source_cards.remove(from);
        close_gap(source_cards, from);

        let dest_cards = self
            .cards
            .get_mut(destination)
            .expect("destination scope exists");
        let position = open_gap(dest_cards, to);
        card.column = destination.clone();
        card.position = position;
        dest_cards.insert(to, card);
        position
    }

    // =========================================================================
    // Snapshots (captured per move for rollback)
    // =========================================================================

    /// Snapshot a column's ordered card list
    pub fn snapshot_cards(&self, scope: &ColumnId) -> Vec<Card> {
        self.cards_in(scope).to_vec()
    }

    /// Restore a column's ordered card list from a snapshot
    pub fn restore_cards(&mut self, scope: &ColumnId, snapshot: Vec<Card>) {
        self.cards.insert(scope.clone(), snapshot);
    }

    /// Snapshot a board's ordered column strip
    pub fn snapshot_columns(&self, scope: &BoardId) -> Vec<Column> {
        self.columns_in(scope).to_vec()
    }

    /// Restore a board's ordered column strip from a snapshot
    pub fn restore_columns(&mut self, scope: &BoardId, snapshot: Vec<Column>) {
        self.columns.insert(scope.clone(), snapshot);
    }

    // =========================================================================
    // Reconciliation (authoritative response → local state)
    // =========================================================================

    /// Align a card with the placement the store confirmed. A no-op when the
    /// optimistic apply already matches, which is the common case.
    pub fn reconcile_card(&mut self, id: &CardId, placement: &CardPlacement) -> Result<()> {
        let (scope, rank) = self
            .card_index(id)
            .ok_or_else(|| BoardError::CardNotFound { id: id.to_string() })?;

        if scope == placement.column {
            let cards = self.cards.get_mut(&scope).expect("card scope exists");
            if cards[rank].position != placement.position {
                cards[rank].position = placement.position;
                sort_by_position(cards);
            }
            return Ok(());
        }

        if !self.has_column(&placement.column) {
            return Err(BoardError::ColumnNotFound {
                id: placement.column.to_string(),
            });
        }
        let mut card = self.remove_card(id)?;
        card.column = placement.column.clone();
        card.position = placement.position;
        let cards = self
            .cards
            .get_mut(&placement.column)
            .expect("destination scope exists");
        cards.push(card);
        sort_by_position(cards);
        Ok(())
    }

    /// Align a column with the placement the store confirmed
    pub fn reconcile_column(&mut self, id: &ColumnId, placement: &ColumnPlacement) -> Result<()> {
        let (scope, rank) = self
            .column_index(id)
            .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })?;
        let columns = self.columns.get_mut(&scope).expect("board scope exists");
        if columns[rank].position != placement.position {
            columns[rank].position = placement.position;
            sort_by_position(columns);
        }
        Ok(())
    }
}

/// Shared handle to the board state: cloneable, read by the presentation
/// layer at any time, written only by the move commands.
#[derive(Debug, Clone, Default)]
pub struct StateHandle {
    inner: Arc<RwLock<BoardState>>,
}

impl StateHandle {
    /// Wrap an existing state
    pub fn new(state: BoardState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Read access for the presentation layer
    pub fn read(&self) -> RwLockReadGuard<'_, BoardState> {
        self.inner.read().expect("board state lock poisoned")
    }

    /// Write access, reserved for the move commands and lifecycle primitives
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, BoardState> {
        self.inner.write().expect("board state lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> BoardId {
        BoardId::from_string("main")
    }

    fn setup() -> (BoardState, ColumnId, ColumnId) {
        let mut state = BoardState::new();
        let todo = state.add_column(&board(), "todo", "To Do").unwrap().id;
        let doing = state.add_column(&board(), "doing", "Doing").unwrap().id;
        (state, todo, doing)
    }

    #[test]
    fn test_add_column_appends() {
        let (state, ..) = setup();
        let strip = state.columns_in(&board());
        assert_eq!(strip.len(), 2);
        assert_eq!(strip[0].position, 0);
        assert_eq!(strip[1].position, 1);
    }

    #[test]
    fn test_add_column_duplicate() {
        let (mut state, ..) = setup();
        let result = state.add_column(&board(), "todo", "Again");
        assert!(matches!(result, Err(BoardError::DuplicateId { .. })));
    }

    #[test]
    fn test_add_card_appends_at_end() {
        let (mut state, todo, _) = setup();
        let a = state.add_card(&todo, "A").unwrap();
        let b = state.add_card(&todo, "B").unwrap();
        assert_eq!(a.position, 0);
        assert_eq!(b.position, 1);
    }

    #[test]
    fn test_remove_card_leaves_gap() {
        let (mut state, todo, _) = setup();
        let a = state.add_card(&todo, "A").unwrap();
        state.add_card(&todo, "B").unwrap();
        let c = state.add_card(&todo, "C").unwrap();

        state.remove_card(&a.id).unwrap();
        let positions: Vec<_> = state.cards_in(&todo).iter().map(|c| c.position).collect();
        assert_eq!(positions, [1, 2]);

        // append after a gap still lands past the last sibling
        let d = state.add_card(&todo, "D").unwrap();
        assert_eq!(d.position, c.position + 1);
    }

    #[test]
    fn test_remove_column_requires_empty() {
        let (mut state, todo, _) = setup();
        state.add_card(&todo, "A").unwrap();
        let result = state.remove_column(&todo);
        assert!(matches!(result, Err(BoardError::ColumnNotEmpty { count: 1, .. })));
    }

    #[test]
    fn test_reorder_reassigns_original_positions() {
        let (mut state, todo, _) = setup();
        let a = state.add_card(&todo, "A").unwrap();
        let b = state.add_card(&todo, "B").unwrap();
        let c = state.add_card(&todo, "C").unwrap();

        // move C (rank 2) to rank 0
        let new_position = state.reorder_cards(&todo, 2, 0);
        assert_eq!(new_position, 0);

        let cards = state.cards_in(&todo);
        let ids: Vec<_> = cards.iter().map(|x| x.id.clone()).collect();
        assert_eq!(ids, [c.id, a.id, b.id]);
        let positions: Vec<_> = cards.iter().map(|x| x.position).collect();
        assert_eq!(positions, [0, 1, 2]);
    }

    #[test]
    fn test_reorder_preserves_gapped_multiset() {
        let (mut state, todo, _) = setup();
        let a = state.add_card(&todo, "A").unwrap();
        state.add_card(&todo, "B").unwrap();
        let c = state.add_card(&todo, "C").unwrap();
        // delete B: positions now [0, 2]
        let b_id = state.cards_in(&todo)[1].id.clone();
        state.remove_card(&b_id).unwrap();

        state.reorder_cards(&todo, 1, 0);
        let cards = state.cards_in(&todo);
        assert_eq!(cards[0].id, c.id);
        assert_eq!(cards[1].id, a.id);
        // same multiset {0, 2}, new owners
        let positions: Vec<_> = cards.iter().map(|x| x.position).collect();
        assert_eq!(positions, [0, 2]);
    }

    #[test]
    fn test_transfer_closes_and_opens_gaps() {
        let (mut state, todo, doing) = setup();
        let a = state.add_card(&todo, "A").unwrap();
        let b = state.add_card(&todo, "B").unwrap();
        let c = state.add_card(&doing, "C").unwrap();

        // move A from todo to the end of doing
        let position = state.transfer_card(&todo, 0, &doing, 1);
        assert_eq!(position, 1);

        let todo_cards = state.cards_in(&todo);
        assert_eq!(todo_cards.len(), 1);
        assert_eq!(todo_cards[0].id, b.id);
        assert_eq!(todo_cards[0].position, 0);

        let doing_cards = state.cards_in(&doing);
        let ids: Vec<_> = doing_cards.iter().map(|x| x.id.clone()).collect();
        assert_eq!(ids, [c.id, a.id.clone()]);
        assert_eq!(state.find_card(&a.id).unwrap().column, doing);
    }

    #[test]
    fn test_transfer_into_middle_displaces() {
        let (mut state, todo, doing) = setup();
        let a = state.add_card(&todo, "A").unwrap();
        let c = state.add_card(&doing, "C").unwrap();
        let d = state.add_card(&doing, "D").unwrap();

        let position = state.transfer_card(&todo, 0, &doing, 0);
        assert_eq!(position, 0);

        let doing_cards = state.cards_in(&doing);
        let ids: Vec<_> = doing_cards.iter().map(|x| x.id.clone()).collect();
        assert_eq!(ids, [a.id, c.id, d.id]);
        let positions: Vec<_> = doing_cards.iter().map(|x| x.position).collect();
        assert_eq!(positions, [0, 1, 2]);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let (mut state, todo, _) = setup();
        state.add_card(&todo, "A").unwrap();
        state.add_card(&todo, "B").unwrap();

        let snapshot = state.snapshot_cards(&todo);
        state.reorder_cards(&todo, 1, 0);
        state.restore_cards(&todo, snapshot.clone());
        assert_eq!(state.cards_in(&todo), snapshot.as_slice());
    }

    #[test]
    fn test_reorder_columns() {
        let (mut state, todo, doing) = setup();
        state.reorder_columns(&board(), 0, 1);
        let strip = state.columns_in(&board());
        assert_eq!(strip[0].id, doing);
        assert_eq!(strip[1].id, todo);
        assert_eq!(strip[0].position, 0);
        assert_eq!(strip[1].position, 1);
    }
}

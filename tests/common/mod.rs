//! Shared fixtures for integration tests

use kanban_dnd::test_support::{RecordingNotifier, StubStore};
use kanban_dnd::{defaults, BoardId, BoardState, CardId, ColumnId, MoveContext};
use std::sync::Arc;

pub fn board() -> BoardId {
    BoardId::from_string("main")
}

pub struct Fixture {
    pub ctx: Arc<MoveContext>,
    pub store: Arc<StubStore>,
    pub notifier: Arc<RecordingNotifier>,
    /// Default strip: todo / doing / done
    pub columns: Vec<ColumnId>,
}

/// A board with the default column strip, a scriptable store, and a
/// recording notifier
pub fn fixture() -> Fixture {
    let store = Arc::new(StubStore::new());
    let notifier = Arc::new(RecordingNotifier::default());

    let mut state = BoardState::new();
    let columns = defaults::init_default_board(&mut state, &board()).unwrap();

    let ctx = Arc::new(MoveContext::with_state(
        state,
        store.clone(),
        notifier.clone(),
    ));
    Fixture {
        ctx,
        store,
        notifier,
        columns,
    }
}

/// Add cards with the given titles to a column, in order
pub fn add_cards(ctx: &MoveContext, column: &ColumnId, titles: &[&str]) -> Vec<CardId> {
    titles
        .iter()
        .map(|title| ctx.add_card(column, *title).unwrap().id)
        .collect()
}

/// Card titles of a column in display order
pub fn titles(ctx: &MoveContext, column: &ColumnId) -> Vec<String> {
    ctx.state()
        .read()
        .cards_in(column)
        .iter()
        .map(|c| c.title.clone())
        .collect()
}

/// Card positions of a column in display order
#[allow(dead_code)] // shared across integration binaries
pub fn positions(ctx: &MoveContext, column: &ColumnId) -> Vec<usize> {
    ctx.state()
        .read()
        .cards_in(column)
        .iter()
        .map(|c| c.position)
        .collect()
}

//! Stock board layout used by tests, benches, and demo setups

use crate::error::Result;
use crate::state::BoardState;
use crate::types::{BoardId, ColumnId};

/// The default workflow columns for a fresh board: todo / doing / done
pub fn default_columns() -> [(&'static str, &'static str); 3] {
    [("todo", "To Do"), ("doing", "Doing"), ("done", "Done")]
}

/// Populate a state with the default column strip for `board` and return
/// the column ids in display order
pub fn init_default_board(state: &mut BoardState, board: &BoardId) -> Result<Vec<ColumnId>> {
    let mut ids = Vec::new();
    for (id, name) in default_columns() {
        ids.push(state.add_column(board, id, name)?.id);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_board_layout() {
        let mut state = BoardState::new();
        let board = BoardId::from_string("main");
        let ids = init_default_board(&mut state, &board).unwrap();

        assert_eq!(ids.len(), 3);
        let strip = state.columns_in(&board);
        assert_eq!(strip[0].id.as_str(), "todo");
        assert_eq!(strip[2].id.as_str(), "done");
        assert_eq!(strip[2].position, 2);
    }
}

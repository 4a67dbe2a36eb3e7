//! Column type: the orderable entity scoped to a board

use super::ids::{BoardId, ColumnId};
use super::position::Orderable;
use serde::{Deserialize, Serialize};

/// A column defines a workflow stage on a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,

    /// Parent scope: the board this column belongs to
    pub board: BoardId,
    /// Ordering key within the board's column strip
    pub position: usize,
}

impl Column {
    /// Create a new column on the given board at the given position
    pub fn new(
        id: impl Into<ColumnId>,
        name: impl Into<String>,
        board: BoardId,
        position: usize,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            board,
            position,
        }
    }
}

impl Orderable for Column {
    fn position(&self) -> usize {
        self.position
    }
    fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}

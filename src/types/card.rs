//! Card type: the orderable entity scoped to a column

use super::ids::{CardId, ColumnId};
use super::position::Orderable;
use serde::{Deserialize, Serialize};

/// A card on the kanban board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parent scope: the column this card currently belongs to
    pub column: ColumnId,
    /// Ordering key within the column
    pub position: usize,
}

impl Card {
    /// Create a new card in the given column at the given position
    pub fn new(title: impl Into<String>, column: ColumnId, position: usize) -> Self {
        Self {
            id: CardId::new(),
            title: title.into(),
            description: None,
            column,
            position,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Orderable for Card {
    fn position(&self) -> usize {
        self.position
    }
    fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}

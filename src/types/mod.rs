//! Core types for the ordering engine

mod card;
mod column;
mod ids;
mod position;

// Re-export all types
pub use card::Card;
pub use column::Column;
pub use ids::{BoardId, CardId, ColumnId};
pub use position::{end_position, sort_by_position, MoveTarget, Orderable};

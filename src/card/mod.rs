//! Card move commands

mod mv;
mod reorder;

pub use mv::MoveCard;
pub use reorder::ReorderCard;

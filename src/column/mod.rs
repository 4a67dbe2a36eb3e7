//! Column move commands

mod reorder;

pub use reorder::ReorderColumn;

//! Drag-and-drop ordering and reconciliation engine for kanban boards
//!
//! This crate maintains a consistent, gap-free linear order for cards within
//! a column, for cards moving across columns, and for columns within a
//! board, while showing optimistic results before the backing store confirms
//! them and rolling back cleanly on failure.
//!
//! ## Overview
//!
//! - **Position model** - integer ordering keys per scope, an explicit
//!   `Slot`/`End` move target instead of a magic append sentinel
//! - **Drag protocol** - immutable drag-start descriptors, per-zone drop
//!   resolution, no-op detection before anything is dispatched
//! - **Optimistic moves** - every move mutates local state synchronously,
//!   then confirms against an asynchronous authoritative store; a rejection
//!   restores the exact pre-move order and emits one failure event
//! - **Per-scope serialization** - moves through one column or board queue
//!   behind each other in gesture order; unrelated scopes stay concurrent
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kanban_dnd::{card::MoveCard, BoardId, Execute, MoveContext};
//! # use kanban_dnd::{BoardStore, Result};
//! # async fn example(store: Arc<dyn BoardStore>) -> Result<()> {
//! // Wire the engine to an authoritative store implementation
//! let ctx = MoveContext::new(store);
//!
//! // Build a board
//! let board = BoardId::from_string("main");
//! let todo = ctx.add_column(&board, "todo", "To Do")?.id;
//! let doing = ctx.add_column(&board, "doing", "Doing")?.id;
//! let card = ctx.add_card(&todo, "Ship the release")?;
//!
//! // Drop the card at the top of "doing"; the UI sees the new order
//! // immediately, the store confirms (or rolls back) asynchronously
//! let outcome = MoveCard::to_slot(card.id, doing, 0).execute(&ctx).await?;
//! println!("moved: {}", outcome.is_applied());
//! # Ok(())
//! # }
//! ```
//!
//! The presentation layer reads display order at any time through
//! [`MoveContext::state`]; lists are kept sorted by position at every state
//! change, so a reader never sees a half-applied shift.

mod context;
mod error;
mod execute;
mod state;

pub mod defaults;
pub mod drag;
pub mod notify;
pub mod store;
pub mod types;

// Command modules
pub mod card;
pub mod column;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use context::MoveContext;
pub use error::{BoardError, Result};
pub use execute::{Execute, MoveOutcome, MovePhase};
pub use state::{BoardState, StateHandle};

// Re-export commonly used types
pub use drag::{
    dispatch_card_drop, dispatch_column_drop, resolve_card_drop, resolve_column_drop, CardDrag,
    ColumnDrag, DragSource, DropZone, ResolvedDrop,
};
pub use notify::{MoveFailed, Notifier, TracingNotifier};
pub use store::{
    BoardStore, CardPlacement, ColumnPlacement, MoveCardRequest, MoveColumnRequest,
};
pub use types::{BoardId, Card, CardId, Column, ColumnId, MoveTarget, Orderable};

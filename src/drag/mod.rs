//! Drag-and-drop protocol: source descriptors, drop zones, and release
//! dispatch.

mod source;
mod target;

pub use source::{CardDrag, ColumnDrag, DragSource};
pub use target::{resolve_card_drop, resolve_column_drop, DropZone, ResolvedDrop};

use crate::card::{MoveCard, ReorderCard};
use crate::column::ReorderColumn;
use crate::context::MoveContext;
use crate::error::Result;
use crate::execute::{Execute, MoveOutcome};
use crate::types::{BoardId, ColumnId};

/// Dispatch a released card drop: a resolution inside the source column is a
/// same-column reorder, anything else is a cross-column move.
pub async fn dispatch_card_drop(
    ctx: &MoveContext,
    drag: &CardDrag,
    resolved: ResolvedDrop<ColumnId>,
) -> Result<MoveOutcome> {
    if resolved.scope == drag.source_scope {
        ReorderCard::new(drag.id.clone(), resolved.target)
            .execute(ctx)
            .await
    } else {
        MoveCard::new(drag.id.clone(), resolved.scope, resolved.target)
            .execute(ctx)
            .await
    }
}

/// Dispatch a released column drop
pub async fn dispatch_column_drop(
    ctx: &MoveContext,
    drag: &ColumnDrag,
    resolved: ResolvedDrop<BoardId>,
) -> Result<MoveOutcome> {
    ReorderColumn::new(drag.id.clone(), resolved.target)
        .execute(ctx)
        .await
}

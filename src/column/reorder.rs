//! ReorderColumn command

use crate::context::MoveContext;
use crate::error::{BoardError, Result};
use crate::execute::{Execute, MoveOutcome, MovePhase};
use crate::store::MoveColumnRequest;
use crate::types::{ColumnId, MoveTarget};
use async_trait::async_trait;
use serde::Deserialize;

/// Move a column to a new slot within its board's strip.
///
/// Same contract as [`ReorderCard`](crate::card::ReorderCard), applied to
/// the column/board relation: optimistic apply, authoritative confirm,
/// exact rollback on rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderColumn {
    /// The column to move
    pub id: ColumnId,
    /// Where it should land among its siblings
    pub target: MoveTarget,
}

impl ReorderColumn {
    /// Create a new ReorderColumn command
    pub fn new(id: impl Into<ColumnId>, target: MoveTarget) -> Self {
        Self {
            id: id.into(),
            target,
        }
    }

    /// Reorder to an explicit rank
    pub fn to_slot(id: impl Into<ColumnId>, rank: usize) -> Self {
        Self::new(id, MoveTarget::Slot(rank))
    }

    /// Reorder to the end of the strip
    pub fn to_end(id: impl Into<ColumnId>) -> Self {
        Self::new(id, MoveTarget::End)
    }
}

#[async_trait]
impl Execute<MoveContext, BoardError> for ReorderColumn {
    type Output = MoveOutcome;

    async fn execute(&self, ctx: &MoveContext) -> Result<MoveOutcome> {
        let (scope, _guards) = ctx.lock_column_scope(&self.id).await?;

        let (from, len, snapshot) = {
            let state = ctx.state().read();
            let (_, rank) = state
                .column_index(&self.id)
                .ok_or_else(|| BoardError::ColumnNotFound {
                    id: self.id.to_string(),
                })?;
            let columns = state.columns_in(&scope);
            (rank, columns.len(), columns.to_vec())
        };

        let to = self
            .target
            .resolve_within(len)
            .ok_or_else(|| BoardError::PositionOutOfRange {
                scope: scope.to_string(),
                position: match self.target {
                    MoveTarget::Slot(rank) => rank,
                    MoveTarget::End => len,
                },
                len,
            })?;

        if to == from {
            tracing::debug!(column = %self.id, board = %scope, rank = from, "drop resolves to current slot, no-op");
            return Ok(MoveOutcome::NoOp);
        }

        let new_position = ctx.state().write().reorder_columns(&scope, from, to);
        tracing::debug!(
            column = %self.id,
            board = %scope,
            from,
            to,
            phase = ?MovePhase::OptimisticallyApplied,
            "column reorder applied"
        );

        let request = MoveColumnRequest { new_position };
        match ctx.store().move_column(&self.id, &request).await {
            Ok(placement) => {
                ctx.state().write().reconcile_column(&self.id, &placement)?;
                tracing::debug!(column = %self.id, phase = ?MovePhase::Confirmed, "column reorder confirmed");
                Ok(MoveOutcome::Applied)
            }
            Err(err) => {
                ctx.state().write().restore_columns(&scope, snapshot);
                tracing::debug!(column = %self.id, phase = ?MovePhase::RolledBack, "column reorder rolled back");
                ctx.notify_move_failed(self.id.as_str(), &err.to_string());
                Ok(MoveOutcome::RolledBack)
            }
        }
    }
}

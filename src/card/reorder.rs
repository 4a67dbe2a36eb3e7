//! ReorderCard command

use crate::context::MoveContext;
use crate::error::{BoardError, Result};
use crate::execute::{Execute, MoveOutcome, MovePhase};
use crate::store::MoveCardRequest;
use crate::types::{CardId, MoveTarget};
use async_trait::async_trait;
use serde::Deserialize;

/// Move a card to a new slot within its current column.
///
/// The reorder is applied optimistically, then confirmed against the
/// authoritative store; a rejection restores the column's exact pre-move
/// order and emits one failure notification.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderCard {
    /// The card to move
    pub id: CardId,
    /// Where it should land among its siblings
    pub target: MoveTarget,
}

impl ReorderCard {
    /// Create a new ReorderCard command
    pub fn new(id: impl Into<CardId>, target: MoveTarget) -> Self {
        Self {
            id: id.into(),
            target,
        }
    }

    /// Reorder to an explicit rank
    pub fn to_slot(id: impl Into<CardId>, rank: usize) -> Self {
        Self::new(id, MoveTarget::Slot(rank))
    }

    /// Reorder to the end of the column
    pub fn to_end(id: impl Into<CardId>) -> Self {
        Self::new(id, MoveTarget::End)
    }
}

#[async_trait]
impl Execute<MoveContext, BoardError> for ReorderCard {
    type Output = MoveOutcome;

    async fn execute(&self, ctx: &MoveContext) -> Result<MoveOutcome> {
        let (scope, _guards) = ctx.lock_card_scope(&self.id).await?;

        let (from, len, snapshot) = {
            let state = ctx.state().read();
            let (_, rank) = state
                .card_index(&self.id)
                .ok_or_else(|| BoardError::CardNotFound {
                    id: self.id.to_string(),
                })?;
            let cards = state.cards_in(&scope);
            (rank, cards.len(), cards.to_vec())
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
            tracing::debug!(card = %self.id, column = %scope, rank = from, "drop resolves to current slot, no-op");
            return Ok(MoveOutcome::NoOp);
        }

        let new_position = ctx.state().write().reorder_cards(&scope, from, to);
        tracing::debug!(
            card = %self.id,
            column = %scope,
            from,
            to,
            phase = ?MovePhase::OptimisticallyApplied,
            "reorder applied"
        );

        let request = MoveCardRequest {
            destination: scope.clone(),
            new_position,
        };
        match ctx.store().move_card(&self.id, &request).await {
            Ok(placement) => {
                ctx.state().write().reconcile_card(&self.id, &placement)?;
                tracing::debug!(card = %self.id, phase = ?MovePhase::Confirmed, "reorder confirmed");
                Ok(MoveOutcome::Applied)
            }
            Err(err) => {
                ctx.state().write().restore_cards(&scope, snapshot);
                tracing::debug!(card = %self.id, phase = ?MovePhase::RolledBack, "reorder rolled back");
                ctx.notify_move_failed(self.id.as_str(), &err.to_string());
                Ok(MoveOutcome::RolledBack)
            }
        }
    }
}

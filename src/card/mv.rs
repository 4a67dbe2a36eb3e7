//! MoveCard command

use crate::context::MoveContext;
use crate::error::{BoardError, Result};
use crate::execute::{Execute, MoveOutcome, MovePhase};
use crate::store::MoveCardRequest;
use crate::types::{CardId, ColumnId, MoveTarget};
use async_trait::async_trait;
use serde::Deserialize;

/// Move a card to a different column.
///
/// The source column closes the gap the card leaves, the destination opens
/// one at the insertion point; the local replace is a single synchronous
/// step, so no reader observes the card in neither or both columns. A
/// dispatch whose destination turns out to be the card's current column
/// degrades to [`ReorderCard`](super::ReorderCard).
#[derive(Debug, Clone, Deserialize)]
pub struct MoveCard {
    /// The card to move
    pub id: CardId,
    /// Column the card should land in
    pub destination: ColumnId,
    /// Where it should land among the destination's siblings
    pub target: MoveTarget,
}

impl MoveCard {
    /// Create a new MoveCard command
    pub fn new(id: impl Into<CardId>, destination: impl Into<ColumnId>, target: MoveTarget) -> Self {
        Self {
            id: id.into(),
            destination: destination.into(),
            target,
        }
    }

    /// Move to the end of a column
    pub fn to_column(id: impl Into<CardId>, destination: impl Into<ColumnId>) -> Self {
        Self::new(id, destination, MoveTarget::End)
    }

    /// Move to an explicit rank in a column
    pub fn to_slot(
        id: impl Into<CardId>,
        destination: impl Into<ColumnId>,
        rank: usize,
    ) -> Self {
        Self::new(id, destination, MoveTarget::Slot(rank))
    }
}

#[async_trait]
impl Execute<MoveContext, BoardError> for MoveCard {
    type Output = MoveOutcome;

    async fn execute(&self, ctx: &MoveContext) -> Result<MoveOutcome> {
        let (source, guards) = ctx.lock_card_move(&self.id, &self.destination).await?;

        if source == self.destination {
            drop(guards);
            return super::ReorderCard::new(self.id.clone(), self.target)
                .execute(ctx)
                .await;
        }

        let (from, dest_len, source_snapshot, dest_snapshot) = {
            let state = ctx.state().read();
            let (_, rank) = state
                .card_index(&self.id)
                .ok_or_else(|| BoardError::CardNotFound {
                    id: self.id.to_string(),
                })?;
            (
                rank,
                state.cards_in(&self.destination).len(),
                state.snapshot_cards(&source),
                state.snapshot_cards(&self.destination),
            )
        };

        let to = self
            .target
            .resolve_into(dest_len)
            .ok_or_else(|| BoardError::PositionOutOfRange {
                scope: self.destination.to_string(),
                position: match self.target {
                    MoveTarget::Slot(rank) => rank,
                    MoveTarget::End => dest_len,
                },
                len: dest_len,
            })?;

        let new_position = ctx
            .state()
            .write()
            .transfer_card(&source, from, &self.destination, to);
        tracing::debug!(
            card = %self.id,
            source = %source,
            destination = %self.destination,
            to,
            phase = ?MovePhase::OptimisticallyApplied,
            "cross-column move applied"
        );

        let request = MoveCardRequest {
            destination: self.destination.clone(),
            new_position,
        };
        match ctx.store().move_card(&self.id, &request).await {
            Ok(placement) => {
                ctx.state().write().reconcile_card(&self.id, &placement)?;
                tracing::debug!(card = %self.id, phase = ?MovePhase::Confirmed, "move confirmed");
                Ok(MoveOutcome::Applied)
            }
            Err(err) => {
                {
                    let mut state = ctx.state().write();
                    state.restore_cards(&source, source_snapshot);
                    state.restore_cards(&self.destination, dest_snapshot);
                }
                tracing::debug!(card = %self.id, phase = ?MovePhase::RolledBack, "move rolled back");
                ctx.notify_move_failed(self.id.as_str(), &err.to_string());
                Ok(MoveOutcome::RolledBack)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingNotifier, StubStore};
    use crate::types::BoardId;
    use std::sync::Arc;

    async fn setup() -> (MoveContext, Arc<StubStore>, ColumnId, ColumnId) {
        let store = Arc::new(StubStore::new());
        let ctx = MoveContext::new(store.clone());
        let board = BoardId::from_string("main");
        let todo = ctx.add_column(&board, "todo", "To Do").unwrap().id;
        let doing = ctx.add_column(&board, "doing", "Doing").unwrap().id;
        (ctx, store, todo, doing)
    }

    #[tokio::test]
    async fn test_move_to_end_of_other_column() {
        let (ctx, _store, todo, doing) = setup().await;
        let a = ctx.add_card(&todo, "A").unwrap();
        let b = ctx.add_card(&todo, "B").unwrap();
        let c = ctx.add_card(&doing, "C").unwrap();

        let outcome = MoveCard::to_column(a.id.clone(), doing.clone())
            .execute(&ctx)
            .await
            .unwrap();
        assert!(outcome.is_applied());

        let state = ctx.state().read();
        let todo_order: Vec<_> = state.cards_in(&todo).iter().map(|x| x.id.clone()).collect();
        assert_eq!(todo_order, [b.id]);
        assert_eq!(state.cards_in(&todo)[0].position, 0);

        let doing_order: Vec<_> = state.cards_in(&doing).iter().map(|x| x.id.clone()).collect();
        assert_eq!(doing_order, [c.id, a.id.clone()]);
        assert_eq!(state.cards_in(&doing)[1].position, 1);
        assert_eq!(state.find_card(&a.id).unwrap().column, doing);
    }

    #[tokio::test]
    async fn test_move_into_slot_displaces_siblings() {
        let (ctx, _store, todo, doing) = setup().await;
        let a = ctx.add_card(&todo, "A").unwrap();
        let c = ctx.add_card(&doing, "C").unwrap();
        let d = ctx.add_card(&doing, "D").unwrap();

        let outcome = MoveCard::to_slot(a.id.clone(), doing.clone(), 1)
            .execute(&ctx)
            .await
            .unwrap();
        assert!(outcome.is_applied());

        let state = ctx.state().read();
        let order: Vec<_> = state.cards_in(&doing).iter().map(|x| x.id.clone()).collect();
        assert_eq!(order, [c.id, a.id, d.id]);
        let positions: Vec<_> = state.cards_in(&doing).iter().map(|x| x.position).collect();
        assert_eq!(positions, [0, 1, 2]);
    }

    #[tokio::test]
    async fn test_move_to_own_column_degrades_to_reorder() {
        let (ctx, store, todo, _) = setup().await;
        let a = ctx.add_card(&todo, "A").unwrap();

        // the only card dropped on its own column body: a no-op, no store call
        let outcome = MoveCard::to_column(a.id.clone(), todo.clone())
            .execute(&ctx)
            .await
            .unwrap();
        assert!(outcome.is_noop());
        assert_eq!(store.calls().len(), 0);
    }

    #[tokio::test]
    async fn test_move_to_missing_destination() {
        let (ctx, _store, todo, _) = setup().await;
        let a = ctx.add_card(&todo, "A").unwrap();

        let result = MoveCard::to_column(a.id, ColumnId::from_string("gone"))
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(BoardError::ColumnNotFound { .. })));
    }

    #[tokio::test]
    async fn test_move_rolls_back_both_scopes() {
        let store = Arc::new(StubStore::new());
        store.fail_next(BoardError::conflict("destination deleted"));
        let notifier = Arc::new(RecordingNotifier::default());
        let ctx =
            MoveContext::with_state(crate::state::BoardState::new(), store, notifier.clone());
        let board = BoardId::from_string("main");
        let todo = ctx.add_column(&board, "todo", "To Do").unwrap().id;
        let doing = ctx.add_column(&board, "doing", "Doing").unwrap().id;
        let a = ctx.add_card(&todo, "A").unwrap();
        ctx.add_card(&doing, "C").unwrap();

        let (before_todo, before_doing) = {
            let state = ctx.state().read();
            (state.snapshot_cards(&todo), state.snapshot_cards(&doing))
        };

        let outcome = MoveCard::to_column(a.id.clone(), doing.clone())
            .execute(&ctx)
            .await
            .unwrap();
        assert!(outcome.is_rolled_back());

        let state = ctx.state().read();
        assert_eq!(state.cards_in(&todo), before_todo.as_slice());
        assert_eq!(state.cards_in(&doing), before_doing.as_slice());
        assert_eq!(notifier.events().len(), 1);
    }
}

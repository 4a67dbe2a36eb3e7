//! MoveContext - shared handles for move commands.
//!
//! The context provides access, not logic: the state handle, the
//! authoritative store, the failure notifier, and the per-scope
//! serialization locks. Commands do all the work.

use crate::error::{BoardError, Result};
use crate::notify::{MoveFailed, Notifier, TracingNotifier};
use crate::state::{BoardState, StateHandle};
use crate::store::BoardStore;
use crate::types::{BoardId, Card, CardId, Column, ColumnId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async mutex per serialization domain (scope id), created lazily.
///
/// The mutexes are fair: waiters acquire in request order, which keeps
/// moves through one scope in gesture order. A move touching two scopes
/// takes both locks in sorted key order.
#[derive(Default)]
struct ScopeLocks {
    inner: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl ScopeLocks {
    fn handle(&self, key: &str) -> Arc<AsyncMutex<()>> {
        let mut map = self.inner.lock().expect("scope lock registry poisoned");
        map.entry(key.to_string()).or_default().clone()
    }

    async fn acquire(&self, keys: &mut Vec<String>) -> Vec<OwnedMutexGuard<()>> {
        keys.sort();
        keys.dedup();
        let mut guards = Vec::with_capacity(keys.len());
        for key in keys.iter() {
            guards.push(self.handle(key).lock_owned().await);
        }
        guards
    }
}

fn column_scope_key(column: &ColumnId) -> String {
    format!("column/{column}")
}

fn board_scope_key(board: &BoardId) -> String {
    format!("board/{board}")
}

/// Context passed to every move command
pub struct MoveContext {
    state: StateHandle,
    store: Arc<dyn BoardStore>,
    notifier: Arc<dyn Notifier>,
    locks: ScopeLocks,
}

impl MoveContext {
    /// Create a context over an empty board state, with the stock tracing
    /// notifier
    pub fn new(store: Arc<dyn BoardStore>) -> Self {
        Self::with_state(BoardState::new(), store, Arc::new(TracingNotifier))
    }

    /// Create a context over an existing state and notifier
    pub fn with_state(
        state: BoardState,
        store: Arc<dyn BoardStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            state: StateHandle::new(state),
            store,
            notifier,
            locks: ScopeLocks::default(),
        }
    }

    /// The shared ordering state. The presentation layer reads current
    /// (possibly optimistic) order through this handle at any time.
    pub fn state(&self) -> &StateHandle {
        &self.state
    }

    pub(crate) fn store(&self) -> &dyn BoardStore {
        self.store.as_ref()
    }

    /// Emit the single failure event for a rolled-back move
    pub(crate) fn notify_move_failed(&self, entity: &str, message: &str) {
        self.notifier.move_failed(MoveFailed::new(entity, message));
    }

    // =========================================================================
    // Per-scope serialization
    // =========================================================================

    /// Serialize on a card's current column. The placement is re-read once
    /// the lock is held; if a queued move changed the card's column while we
    /// waited, the stale lock is dropped and the new scope is acquired
    /// instead.
    pub(crate) async fn lock_card_scope(
        &self,
        id: &CardId,
    ) -> Result<(ColumnId, Vec<OwnedMutexGuard<()>>)> {
        loop {
            let scope = self.card_scope(id)?;
            let mut keys = vec![column_scope_key(&scope)];
            let guards = self.locks.acquire(&mut keys).await;
            if self.card_scope(id)? == scope {
                return Ok((scope, guards));
            }
        }
    }

    /// Serialize on both ends of a cross-column move. Both scopes are one
    /// serialization domain each; sorted acquisition keeps opposing moves
    /// from deadlocking.
    pub(crate) async fn lock_card_move(
        &self,
        id: &CardId,
        destination: &ColumnId,
    ) -> Result<(ColumnId, Vec<OwnedMutexGuard<()>>)> {
        loop {
            let source = self.card_scope(id)?;
            let mut keys = vec![column_scope_key(&source), column_scope_key(destination)];
            let guards = self.locks.acquire(&mut keys).await;
            if !self.state.read().has_column(destination) {
                return Err(BoardError::ColumnNotFound {
                    id: destination.to_string(),
                });
            }
            if self.card_scope(id)? == source {
                return Ok((source, guards));
            }
        }
    }

    /// Serialize on a column's board
    pub(crate) async fn lock_column_scope(
        &self,
        id: &ColumnId,
    ) -> Result<(BoardId, Vec<OwnedMutexGuard<()>>)> {
        loop {
            let scope = self.column_scope(id)?;
            let mut keys = vec![board_scope_key(&scope)];
            let guards = self.locks.acquire(&mut keys).await;
            if self.column_scope(id)? == scope {
                return Ok((scope, guards));
            }
        }
    }

    fn card_scope(&self, id: &CardId) -> Result<ColumnId> {
        self.state
            .read()
            .card_index(id)
            .map(|(scope, _)| scope)
            .ok_or_else(|| BoardError::CardNotFound { id: id.to_string() })
    }

    fn column_scope(&self, id: &ColumnId) -> Result<BoardId> {
        self.state
            .read()
            .column_index(id)
            .map(|(scope, _)| scope)
            .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })
    }

    // =========================================================================
    // Lifecycle (local bookkeeping; authoritative CRUD is out of scope)
    // =========================================================================

    /// Add a column at the end of a board's strip
    pub fn add_column(
        &self,
        board: &BoardId,
        id: impl Into<ColumnId>,
        name: impl Into<String>,
    ) -> Result<Column> {
        self.state.write().add_column(board, id, name)
    }

    /// Remove an empty column
    pub fn remove_column(&self, id: &ColumnId) -> Result<Column> {
        self.state.write().remove_column(id)
    }

    /// Add a card at the end of a column
    pub fn add_card(&self, column: &ColumnId, title: impl Into<String>) -> Result<Card> {
        self.state.write().add_card(column, title)
    }

    /// Remove a card
    pub fn remove_card(&self, id: &CardId) -> Result<Card> {
        self.state.write().remove_card(id)
    }
}

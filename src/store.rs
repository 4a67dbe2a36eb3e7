//! Authoritative store boundary.
//!
//! The engine applies every move optimistically and then asks the store to
//! confirm it. Implementations live outside this crate (HTTP API, local
//! database, …); the contract here is the whole coupling surface. A
//! rejection of any kind triggers rollback; the engine never retries.

use crate::error::Result;
use crate::types::{CardId, ColumnId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Authoritative move request for a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCardRequest {
    /// Column the card should end up in (may equal its current column)
    pub destination: ColumnId,
    /// Position value within the destination
    pub new_position: usize,
}

/// Authoritative move request for a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveColumnRequest {
    /// Position value within the board's column strip
    pub new_position: usize,
}

/// Placement the store confirmed for a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPlacement {
    pub id: CardId,
    pub column: ColumnId,
    pub position: usize,
}

/// Placement the store confirmed for a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPlacement {
    pub id: ColumnId,
    pub position: usize,
}

/// Asynchronous authoritative store for board ordering.
///
/// Failure contract: [`BoardError::Conflict`](crate::BoardError::Conflict)
/// when the moved entity or its destination no longer exists,
/// [`BoardError::Validation`](crate::BoardError::Validation) when the
/// requested position is out of the destination's range, and
/// [`BoardError::Transport`](crate::BoardError::Transport) for opaque
/// transport failures. All three roll the optimistic apply back.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Persist a card move (same-column reorder or cross-column move)
    async fn move_card(&self, id: &CardId, request: &MoveCardRequest) -> Result<CardPlacement>;

    /// Persist a column reorder within its board
    async fn move_column(
        &self,
        id: &ColumnId,
        request: &MoveColumnRequest,
    ) -> Result<ColumnPlacement>;
}

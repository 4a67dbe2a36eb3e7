//! Test-only collaborators: a scriptable store and a recording notifier.
//!
//! Available to this crate's own tests and, behind the `test-support`
//! feature, to integration tests, benches, and downstream crates.

use crate::error::{BoardError, Result};
use crate::notify::{MoveFailed, Notifier};
use crate::store::{
    BoardStore, CardPlacement, ColumnPlacement, MoveCardRequest, MoveColumnRequest,
};
use crate::types::{CardId, ColumnId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// One recorded authoritative call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    MoveCard {
        id: CardId,
        request: MoveCardRequest,
    },
    MoveColumn {
        id: ColumnId,
        request: MoveColumnRequest,
    },
}

/// Store double that confirms every move by echoing the request, unless a
/// scripted failure is queued. Scripted latency simulates slow transports so
/// tests can reorder response arrival.
#[derive(Default)]
pub struct StubStore {
    failures: Mutex<VecDeque<BoardError>>,
    delays: Mutex<VecDeque<Duration>>,
    calls: Mutex<Vec<StoreCall>>,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a failure for the next authoritative call
    pub fn fail_next(&self, error: BoardError) {
        self.failures
            .lock()
            .expect("stub store poisoned")
            .push_back(error);
    }

    /// Queue a response latency for the next authoritative call
    pub fn delay_next(&self, delay: Duration) {
        self.delays
            .lock()
            .expect("stub store poisoned")
            .push_back(delay);
    }

    /// Every call seen so far, in arrival order
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().expect("stub store poisoned").clone()
    }

    fn next_delay(&self) -> Option<Duration> {
        self.delays.lock().expect("stub store poisoned").pop_front()
    }

    fn next_failure(&self) -> Option<BoardError> {
        self.failures
            .lock()
            .expect("stub store poisoned")
            .pop_front()
    }

    async fn simulate(&self) -> Result<()> {
        if let Some(delay) = self.next_delay() {
            tokio::time::sleep(delay).await;
        }
        match self.next_failure() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BoardStore for StubStore {
    async fn move_card(&self, id: &CardId, request: &MoveCardRequest) -> Result<CardPlacement> {
        self.calls
            .lock()
            .expect("stub store poisoned")
            .push(StoreCall::MoveCard {
                id: id.clone(),
                request: request.clone(),
            });
        self.simulate().await?;
        Ok(CardPlacement {
            id: id.clone(),
            column: request.destination.clone(),
            position: request.new_position,
        })
    }

    async fn move_column(
        &self,
        id: &ColumnId,
        request: &MoveColumnRequest,
    ) -> Result<ColumnPlacement> {
        self.calls
            .lock()
            .expect("stub store poisoned")
            .push(StoreCall::MoveColumn {
                id: id.clone(),
                request: request.clone(),
            });
        self.simulate().await?;
        Ok(ColumnPlacement {
            id: id.clone(),
            position: request.new_position,
        })
    }
}

/// Notifier that records every failure event for assertions
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<MoveFailed>>,
}

impl RecordingNotifier {
    /// Events received so far, in emission order
    pub fn events(&self) -> Vec<MoveFailed> {
        self.events.lock().expect("recording notifier poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn move_failed(&self, event: MoveFailed) {
        self.events
            .lock()
            .expect("recording notifier poisoned")
            .push(event);
    }
}

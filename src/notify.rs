//! Failure notification boundary.
//!
//! On rollback the engine emits exactly one [`MoveFailed`] event; presenting
//! it (toast, status line, log) is the collaborator's concern and nothing it
//! does flows back into the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A move that was optimistically applied and then rolled back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFailed {
    /// Id of the entity whose move failed
    pub entity: String,
    /// Human-readable failure message
    pub message: String,
    /// When the rollback happened
    pub at: DateTime<Utc>,
}

impl MoveFailed {
    /// Create a failure event stamped now
    pub fn new(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            message: message.into(),
            at: Utc::now(),
        }
    }
}

/// Receives rollback notifications from the engine
pub trait Notifier: Send + Sync {
    /// Called once per rolled-back move
    fn move_failed(&self, event: MoveFailed);
}

/// Stock notifier: logs failures through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn move_failed(&self, event: MoveFailed) {
        tracing::warn!(entity = %event.entity, message = %event.message, "move rolled back");
    }
}

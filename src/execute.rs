//! Command execution contract.
//!
//! Move operations are structs whose fields are the parameters; each one
//! implements [`Execute`] against the context it runs in. The context
//! provides access primitives, the command does the work.

use async_trait::async_trait;

/// A command executable against a context `C` with error type `E`
#[async_trait]
pub trait Execute<C: Sync, E> {
    /// What a successful execution yields
    type Output;

    /// Run the command
    async fn execute(&self, ctx: &C) -> Result<Self::Output, E>;
}

/// How a dispatched move ended.
///
/// Store failures never propagate past the command boundary; they surface
/// as `RolledBack` plus one notification event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Optimistic apply confirmed by the store
    Applied,
    /// Resolved target equals the source; nothing dispatched
    NoOp,
    /// Store rejected the move; local order restored
    RolledBack,
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }

    pub fn is_rolled_back(&self) -> bool {
        matches!(self, Self::RolledBack)
    }
}

/// Lifecycle of one move, for tracing.
///
/// `Idle → OptimisticallyApplied → {Confirmed | RolledBack} → Idle`; the
/// machine is re-entered on every drag release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePhase {
    Idle,
    OptimisticallyApplied,
    Confirmed,
    RolledBack,
}

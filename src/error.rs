//! Error types for the ordering engine

use thiserror::Error;

/// Result type for move operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur while resolving or executing moves
#[derive(Debug, Error)]
pub enum BoardError {
    /// Card not found
    #[error("card not found: {id}")]
    CardNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Board not found
    #[error("board not found: {id}")]
    BoardNotFound { id: String },

    /// Column has cards and cannot be deleted
    #[error("column '{id}' has {count} cards and cannot be deleted")]
    ColumnNotEmpty { id: String, count: usize },

    /// Duplicate ID
    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: String },

    /// Requested slot rank lies outside the destination scope
    #[error("position {position} out of range for scope '{scope}' with {len} entries")]
    PositionOutOfRange {
        scope: String,
        position: usize,
        len: usize,
    },

    /// Authoritative store rejected the move because a referenced entity
    /// vanished concurrently
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// Authoritative store rejected the move as out of range
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// Transport-level failure reaching the authoritative store
    #[error("transport error: {message}")]
    Transport { message: String },
}

impl BoardError {
    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a duplicate ID error
    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    /// Check if this error came from the authoritative store boundary.
    ///
    /// Store failures trigger rollback + notification; everything else is
    /// rejected before any state is touched.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Self::Conflict { .. } | Self::Validation { .. } | Self::Transport { .. }
        )
    }
}

//! Error types for mood-board operations
//!
//! Every storage failure is recoverable: callers turn it into a notice and
//! keep their in-memory state.

use thiserror::Error;

/// Errors surfaced by the document model, the stores and the editor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BacklotError {
    /// Input rejected before anything was persisted (e.g. empty title)
    #[error("validation error: {0}")]
    Validation(String),

    /// The store has no record with this id
    #[error("{kind} not found with ID {id}")]
    NotFound { kind: &'static str, id: String },

    /// Any storage or I/O failure; the operation may be retried
    #[error("storage error: {0}")]
    TransientIo(String),
}

/// Result type alias for mood-board operations
pub type Result<T> = std::result::Result<T, BacklotError>;

impl BacklotError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn moodboard_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Moodboard",
            id: id.into(),
        }
    }

    pub fn snapshot_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Snapshot",
            id: id.into(),
        }
    }

    /// True when repeating the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientIo(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Short message suitable for an inline banner
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::NotFound { kind, .. } => {
                format!("{} could not be found. It may have been deleted.", kind)
            }
            Self::TransientIo(_) => "Something went wrong talking to storage. Please try again.".to_string(),
        }
    }
}

impl From<std::io::Error> for BacklotError {
    fn from(err: std::io::Error) -> Self {
        Self::TransientIo(err.to_string())
    }
}

impl From<serde_json::Error> for BacklotError {
    fn from(err: serde_json::Error) -> Self {
        Self::TransientIo(err.to_string())
    }
}

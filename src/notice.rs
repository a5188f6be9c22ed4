//! Inline notices shown by the editor and gallery.

use crate::error::BacklotError;

/// What the notice offers the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeAction {
    Dismiss,
    /// Repeat the failed operation; the in-memory state is intact
    Retry,
    /// Leave for the board list, e.g. after loading a deleted board
    BackToList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub message: String,
    pub action: NoticeAction,
    pub error: Option<BacklotError>,
}

impl Notice {
    pub fn from_error(error: BacklotError) -> Self {
        let action = match &error {
            BacklotError::Validation(_) => NoticeAction::Dismiss,
            BacklotError::NotFound { .. } => NoticeAction::BackToList,
            BacklotError::TransientIo(_) => NoticeAction::Retry,
        };
        Self {
            message: error.user_message(),
            action,
            error: Some(error),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.action == NoticeAction::Retry
    }
}

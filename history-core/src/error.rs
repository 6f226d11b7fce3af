//! Error types for history-today.

use thiserror::Error;

/// Errors that can occur in history-today operations.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The day could not be fetched. The cause is kept for logging only;
    /// users see a single retryable message.
    #[error("Unable to retrieve events")]
    Unavailable { cause: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD, MM-DD or 'today'")]
    InvalidDate(String),

    #[error("Date is outside the supported calendar range")]
    DateOutOfRange,

    #[error("Invalid share link: {0}")]
    InvalidShareLink(String),

    #[error("Unknown theme '{0}'. Expected light, dark or system")]
    InvalidTheme(String),

    #[error("Unknown event type '{0}'. Expected all, events, births or deaths")]
    InvalidEventKind(String),
}

impl HistoryError {
    pub fn unavailable(cause: impl std::fmt::Display) -> Self {
        HistoryError::Unavailable {
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for history-today operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

//! Error types for the scheduler client.

use thiserror::Error;

/// Errors that can occur in scheduler operations.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Reading entries failed. The fetch cache is left untouched.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Persisting a created entry failed. The optimistic change gets rolled back.
    #[error("Save failed: {0}")]
    Save(String),

    /// Deleting an entry failed. The local entry stays in place.
    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Finding dates failed: {0}")]
    Search(String),

    /// A precondition the user has to fix (e.g. no name selected).
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Local storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SchedulerError {
    /// Whether this error should be shown to the user as a blocking message.
    ///
    /// Create and delete failures are only logged: the visible set reverting
    /// is the feedback.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, SchedulerError::Search(_) | SchedulerError::Validation(_))
    }
}

/// Result type alias for scheduler operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

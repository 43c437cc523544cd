//! Shared error types for the services crate.

use thiserror::Error;

use taskdeck_core::model::TaskError;

/// Errors surfaced by clipboard implementations.
///
/// These never reach the user: `CopyFeedback` catches them at the point of
/// use, logs, and simply does not show the success state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Errors emitted while loading a task content file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TaskFileError {
    #[error("unreadable task file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed task file: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] TaskError),
}

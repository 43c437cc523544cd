//! Task content loading.
//!
//! Tasks arrive as a JSON array of drafts matching the content schema and
//! are validated into `Task`s here. The composition root falls back to the
//! built-in samples when no usable file is given.

use std::path::Path;

use taskdeck_core::model::{Task, TaskDraft};

use crate::error::TaskFileError;

/// Parses and validates a task file's contents.
///
/// # Errors
///
/// Returns `TaskFileError` if the JSON is malformed or any draft fails
/// validation.
pub fn parse_tasks(json: &str) -> Result<Vec<Task>, TaskFileError> {
    let drafts: Vec<TaskDraft> = serde_json::from_str(json)?;
    let mut tasks = Vec::with_capacity(drafts.len());
    for draft in drafts {
        tasks.push(draft.validate()?);
    }
    Ok(tasks)
}

/// Reads and parses the task file at `path`.
///
/// # Errors
///
/// Returns `TaskFileError` if the file is unreadable, malformed, or
/// invalid.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, TaskFileError> {
    let raw = std::fs::read_to_string(path)?;
    parse_tasks(&raw)
}

/// The built-in starter set used when no task file is configured.
#[must_use]
pub fn sample_tasks() -> Vec<Task> {
    let json = include_str!("sample_tasks.json");
    parse_tasks(json).unwrap_or_default()
}

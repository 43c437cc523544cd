//! Serialized form of every stored value.
//!
//! The storage crate owns formats; trackers own semantics. Decoders never
//! fail: malformed input is treated exactly like an absent value.

use taskdeck_core::model::TaskId;

/// Decodes a JSON array of strings into task ids. Malformed input yields
/// an empty list.
#[must_use]
pub fn decode_task_ids(raw: &str) -> Vec<TaskId> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Encodes task ids as a JSON array of strings.
#[must_use]
pub fn encode_task_ids(ids: &[TaskId]) -> String {
    // Serializing a list of strings cannot fail.
    serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string())
}

/// Decodes a `"true"` / `"false"` flag. Anything else is absent.
#[must_use]
pub fn decode_flag(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[must_use]
pub fn encode_flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Decodes a decimal integer scroll offset in pixels. Malformed input is
/// absent.
#[must_use]
pub fn decode_offset(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

#[must_use]
pub fn encode_offset(offset: u32) -> String {
    offset.to_string()
}

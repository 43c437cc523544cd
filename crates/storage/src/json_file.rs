use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::kv::KeyValueStore;

/// Durable storage area backed by one JSON object (string to string) per
/// file.
///
/// The whole map is loaded at open and rewritten on every write. Failures
/// follow the adapter contract: an unreadable or corrupt file opens as
/// empty, and a failed rewrite keeps the in-process value but loses
/// durability, logged at debug level either way.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading whatever is currently readable.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let serialized = match serde_json::to_string_pretty(entries) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "state serialization failed");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && fs::create_dir_all(parent).is_err() {
                tracing::debug!(path = %self.path.display(), "state directory is not writable");
                return;
            }
        }
        if let Err(err) = fs::write(&self.path, serialized) {
            tracing::debug!(path = %self.path.display(), error = %err, "state write failed");
        }
    }
}

fn load_entries(path: &Path) -> HashMap<String, String> {
    let Ok(raw) = fs::read_to_string(path) else {
        return HashMap::new();
    };
    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "state file is corrupt, starting empty");
            HashMap::new()
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> Option<String> {
        let guard = self.entries.lock().ok()?;
        guard.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        let Ok(mut guard) = self.entries.lock() else {
            return;
        };
        guard.insert(key.to_string(), value.to_string());
        self.persist(&guard);
    }
}

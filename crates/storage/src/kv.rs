use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// String key-value storage area.
///
/// The contract is deliberately infallible: `read` returns `None` both for
/// keys that were never written and for areas that are unavailable or
/// broken, and `write` is best-effort. Callers treat every failure as
/// "feature unavailable", never as an error.
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw stored value, or `None` if absent or unavailable.
    fn read(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`. Silently no-ops when the area is
    /// unavailable.
    fn write(&self, key: &str, value: &str);
}

/// Process-lifetime storage area. The session-scoped area in the app, and
/// the test double everywhere else.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        // A poisoned map counts as an unavailable area.
        let guard = self.entries.lock().ok()?;
        guard.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.insert(key.to_string(), value.to_string());
        }
    }
}

/// An area that is never available: reads are absent, writes are dropped.
///
/// Models running without a storage area and backs the degraded-mode tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&self, _key: &str, _value: &str) {}
}

/// The two storage areas the app wires together: a durable one for
/// completion state and a session-scoped one for sidebar state.
#[derive(Clone)]
pub struct Storage {
    pub local: Arc<dyn KeyValueStore>,
    pub session: Arc<dyn KeyValueStore>,
}

impl Storage {
    #[must_use]
    pub fn new(local: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self { local, session }
    }

    /// Both areas in memory; for tests and prototyping.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            local: Arc::new(InMemoryStore::new()),
            session: Arc::new(InMemoryStore::new()),
        }
    }
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, mpsc};

use storage::{KeyValueStore, codec, keys};
use taskdeck_core::model::{CompletedTasks, TaskId};

/// Broadcast payload: one task's membership changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionChange {
    pub task_id: TaskId,
    pub is_completed: bool,
}

/// Handle for a registered completion subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Listener = Arc<dyn Fn(&CompletionChange) + Send + Sync>;

/// Tracks which tasks are completed, persisted in the durable storage area
/// under `completed-tasks`.
///
/// All operations are synchronous read-modify-write over the full stored
/// set; with several writers over one area the last write wins. `toggle`
/// additionally broadcasts the change to every subscriber after the write
/// completes and before it returns, so a subscriber reading storage inside
/// its callback observes the new value. Sidebar state changes have no
/// equivalent broadcast.
pub struct CompletionTracker {
    store: Arc<dyn KeyValueStore>,
    listeners: Mutex<Vec<(SubscriberId, Listener)>>,
    next_subscriber: AtomicU64,
}

impl CompletionTracker {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            listeners: Mutex::new(Vec::new()),
            next_subscriber: AtomicU64::new(1),
        }
    }

    /// The stored set. Absent or malformed data is an empty set.
    #[must_use]
    pub fn completed(&self) -> CompletedTasks {
        let ids = self
            .store
            .read(keys::COMPLETED_TASKS)
            .map(|raw| codec::decode_task_ids(&raw))
            .unwrap_or_default();
        CompletedTasks::from_ids(ids)
    }

    /// Full-replace write of the set.
    pub fn set_completed(&self, set: &CompletedTasks) {
        self.store
            .write(keys::COMPLETED_TASKS, &codec::encode_task_ids(set.as_slice()));
    }

    #[must_use]
    pub fn is_completed(&self, id: &TaskId) -> bool {
        self.completed().contains(id)
    }

    /// Flips `id`'s membership and returns the new state. The write lands
    /// before subscribers are notified.
    pub fn toggle(&self, id: &TaskId) -> bool {
        let mut set = self.completed();
        let is_completed = if set.remove(id) {
            false
        } else {
            set.insert(id.clone());
            true
        };
        self.set_completed(&set);
        self.notify(&CompletionChange {
            task_id: id.clone(),
            is_completed,
        });
        is_completed
    }

    /// Replaces the set with empty. No broadcast; only `toggle` notifies.
    pub fn clear_all(&self) {
        self.set_completed(&CompletedTasks::new());
    }

    /// Registers a subscriber; it receives every subsequent toggle
    /// synchronously, in registration order.
    pub fn subscribe(
        &self,
        listener: impl Fn(&CompletionChange) + Send + Sync + 'static,
    ) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((id, Arc::new(listener)));
        }
        id
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.retain(|(known, _)| *known != id);
        }
    }

    /// Channel convenience for consumers that poll (e.g. UI loops) instead
    /// of reacting inline. Dropping the receiver leaves later sends
    /// ignored; unsubscribe with the returned id to stop delivery.
    #[must_use]
    pub fn subscribe_channel(&self) -> (SubscriberId, mpsc::Receiver<CompletionChange>) {
        let (tx, rx) = mpsc::channel();
        let id = self.subscribe(move |change: &CompletionChange| {
            let _ = tx.send(change.clone());
        });
        (id, rx)
    }

    // Delivery runs on a snapshot taken under the lock, so a callback may
    // re-enter the tracker (subscribe, unsubscribe, even toggle) without
    // deadlocking. A listener unsubscribed mid-delivery still receives the
    // change that was already in flight.
    fn notify(&self, change: &CompletionChange) {
        let snapshot: Vec<Listener> = {
            let Ok(listeners) = self.listeners.lock() else {
                return;
            };
            listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };
        for listener in snapshot {
            listener(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{InMemoryStore, UnavailableStore};

    fn tracker() -> (Arc<InMemoryStore>, CompletionTracker) {
        let store = Arc::new(InMemoryStore::new());
        let tracker = CompletionTracker::new(store.clone());
        (store, tracker)
    }

    fn id(s: &str) -> TaskId {
        TaskId::new(s)
    }

    #[test]
    fn membership_follows_toggle_parity() {
        let (_, tracker) = tracker();
        for round in 1..=5 {
            let state = tracker.toggle(&id("task-7"));
            assert_eq!(state, round % 2 == 1);
            assert_eq!(tracker.is_completed(&id("task-7")), state);
        }
    }

    #[test]
    fn toggle_twice_restores_the_set() {
        let (_, tracker) = tracker();
        tracker.set_completed(&CompletedTasks::from_ids(vec![id("a"), id("b"), id("c")]));

        tracker.toggle(&id("b"));
        tracker.toggle(&id("b"));

        let set = tracker.completed();
        assert_eq!(set.len(), 3);
        for task in ["a", "b", "c"] {
            assert!(set.contains(&id(task)), "missing {task}");
        }
    }

    #[test]
    fn clear_all_empties_regardless_of_prior_state() {
        let (_, tracker) = tracker();
        tracker.toggle(&id("a"));
        tracker.toggle(&id("b"));
        tracker.clear_all();
        assert!(tracker.completed().is_empty());
    }

    #[test]
    fn set_completed_round_trips() {
        let (_, tracker) = tracker();
        let set = CompletedTasks::from_ids(vec![id("x"), id("y"), id("z")]);
        tracker.set_completed(&set);
        assert_eq!(tracker.completed(), set);
    }

    #[test]
    fn malformed_stored_value_reads_as_empty() {
        let (store, tracker) = tracker();
        store.write(keys::COMPLETED_TASKS, "not-json");
        assert!(tracker.completed().is_empty());
        assert!(!tracker.is_completed(&id("task-7")));
    }

    #[test]
    fn first_toggle_stores_the_singleton_list() {
        let (store, tracker) = tracker();
        assert!(tracker.toggle(&id("task-7")));
        assert_eq!(
            store.read(keys::COMPLETED_TASKS),
            Some(r#"["task-7"]"#.to_string())
        );
    }

    #[test]
    fn toggle_notifies_after_the_write_and_before_returning() {
        let store = Arc::new(InMemoryStore::new());
        let tracker = Arc::new(CompletionTracker::new(store.clone()));

        let seen: Arc<Mutex<Vec<(CompletionChange, Option<String>)>>> =
            Arc::new(Mutex::new(Vec::new()));
        let seen_in_listener = seen.clone();
        let store_in_listener = store.clone();
        tracker.subscribe(move |change| {
            let stored = store_in_listener.read(keys::COMPLETED_TASKS);
            if let Ok(mut log) = seen_in_listener.lock() {
                log.push((change.clone(), stored));
            }
        });

        tracker.toggle(&id("task-7"));

        let log = seen.lock().unwrap();
        assert_eq!(log.len(), 1, "notification delivered before return");
        let (change, stored) = &log[0];
        assert_eq!(
            change,
            &CompletionChange {
                task_id: id("task-7"),
                is_completed: true,
            }
        );
        // The listener already observes the new stored value.
        assert_eq!(stored.as_deref(), Some(r#"["task-7"]"#));
    }

    #[test]
    fn unsubscribed_listeners_stop_receiving() {
        let (_, tracker) = tracker();
        let count = Arc::new(Mutex::new(0usize));
        let count_in_listener = count.clone();
        let sub = tracker.subscribe(move |_| {
            if let Ok(mut n) = count_in_listener.lock() {
                *n += 1;
            }
        });

        tracker.toggle(&id("a"));
        tracker.unsubscribe(sub);
        tracker.toggle(&id("a"));

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn a_listener_may_unsubscribe_itself_mid_delivery() {
        let tracker = Arc::new(CompletionTracker::new(Arc::new(InMemoryStore::new())));
        let count = Arc::new(Mutex::new(0usize));
        let own_id: Arc<Mutex<Option<SubscriberId>>> = Arc::new(Mutex::new(None));

        let sub = {
            let inner = Arc::clone(&tracker);
            let count = Arc::clone(&count);
            let own_id = Arc::clone(&own_id);
            tracker.subscribe(move |_| {
                if let Ok(mut n) = count.lock() {
                    *n += 1;
                }
                // A once-listener removes itself from inside its callback.
                if let Some(id) = own_id.lock().ok().and_then(|slot| *slot) {
                    inner.unsubscribe(id);
                }
            })
        };
        *own_id.lock().unwrap() = Some(sub);

        // Must return rather than deadlock on the registry.
        tracker.toggle(&id("task-7"));
        tracker.toggle(&id("task-7"));

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn a_listener_may_toggle_another_task_mid_delivery() {
        let tracker = Arc::new(CompletionTracker::new(Arc::new(InMemoryStore::new())));
        let inner = Arc::clone(&tracker);
        tracker.subscribe(move |change| {
            if change.task_id == id("first") && change.is_completed {
                inner.toggle(&id("second"));
            }
        });

        tracker.toggle(&id("first"));

        assert!(tracker.is_completed(&id("first")));
        assert!(tracker.is_completed(&id("second")));
    }

    #[test]
    fn channel_subscription_sees_each_change() {
        let (_, tracker) = tracker();
        let (_sub, rx) = tracker.subscribe_channel();
        tracker.toggle(&id("a"));
        tracker.toggle(&id("a"));

        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert!(first.is_completed);
        assert!(!second.is_completed);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn two_trackers_over_one_store_stay_consistent() {
        let store = Arc::new(InMemoryStore::new());
        let left = CompletionTracker::new(store.clone());
        let right = CompletionTracker::new(store.clone());

        left.toggle(&id("task-7"));
        assert!(right.is_completed(&id("task-7")));

        // Read-modify-write: the later writer wins.
        right.toggle(&id("task-7"));
        assert!(!left.is_completed(&id("task-7")));
    }

    #[test]
    fn unavailable_store_degrades_to_empty() {
        let tracker = CompletionTracker::new(Arc::new(UnavailableStore));
        assert!(tracker.completed().is_empty());
        // Toggle still reports the would-be state and still notifies.
        let (_sub, rx) = tracker.subscribe_channel();
        assert!(tracker.toggle(&id("task-7")));
        assert!(rx.try_recv().unwrap().is_completed);
        // Nothing persisted, so the next read is empty again.
        assert!(!tracker.is_completed(&id("task-7")));
    }
}

use crate::model::ids::TaskId;

/// The set of completed task ids, kept in insertion order.
///
/// Invariant: no duplicate ids. Completing an already-completed task is a
/// no-op; re-completing after removal appends at the end, so ordering
/// records the most recent completion history rather than the first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletedTasks {
    ids: Vec<TaskId>,
}

impl CompletedTasks {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a raw id sequence, dropping duplicates while
    /// keeping the first occurrence's position.
    #[must_use]
    pub fn from_ids(ids: Vec<TaskId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.insert(id);
        }
        set
    }

    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    /// Appends `id` if absent. Returns true if the set changed.
    pub fn insert(&mut self, id: TaskId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id` if present. Returns true if the set changed.
    pub fn remove(&mut self, id: &TaskId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|known| known != id);
        self.ids.len() != before
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskId> {
        self.ids.iter()
    }

    /// The ids in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[TaskId] {
        &self.ids
    }
}

impl FromIterator<TaskId> for CompletedTasks {
    fn from_iter<I: IntoIterator<Item = TaskId>>(iter: I) -> Self {
        Self::from_ids(iter.into_iter().collect())
    }
}

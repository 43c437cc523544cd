use std::sync::Arc;

use storage::{KeyValueStore, codec, keys};
use taskdeck_core::model::TaskId;

/// Snapshot of persisted sidebar state, read once on mount.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarViewState {
    pub collapsed: bool,
    pub scroll_offset: Option<u32>,
}

/// Geometry of the scrollable task list, in pixels, plus the task the
/// current page is showing, if any.
#[derive(Clone, Debug)]
pub struct SidebarLayout {
    pub viewport_height: u32,
    pub item_height: u32,
    pub tasks: Vec<TaskId>,
    pub current: Option<TaskId>,
}

impl SidebarLayout {
    fn current_index(&self) -> Option<usize> {
        let current = self.current.as_ref()?;
        self.tasks.iter().position(|id| id == current)
    }

    /// Offset that puts row `index`'s center at the viewport's center,
    /// clamped to the scrollable range.
    fn centered_offset(&self, index: usize) -> u32 {
        let item = u64::from(self.item_height);
        let row_center = index as u64 * item + item / 2;
        let offset = row_center.saturating_sub(u64::from(self.viewport_height) / 2);
        let max = (self.tasks.len() as u64 * item).saturating_sub(u64::from(self.viewport_height));
        u32::try_from(offset.min(max)).unwrap_or(u32::MAX)
    }
}

/// What to do with the scroll position when the sidebar mounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollPlan {
    /// A stored offset exists; restore it exactly.
    Restore(u32),
    /// Nothing stored; center the current task's row at this offset.
    CenterCurrent(u32),
    /// Nothing stored and no current row to center.
    Top,
}

/// Tracks sidebar view state in the session-scoped storage area.
///
/// The collapsed flag and the scroll offset live under independent keys
/// and never touch each other. An unavailable area degrades to the default
/// layout: expanded, no scroll restore.
pub struct SidebarTracker {
    store: Arc<dyn KeyValueStore>,
}

impl SidebarTracker {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The one-time mount read. Callers render defaults until this
    /// returns, then transition once.
    #[must_use]
    pub fn hydrate(&self) -> SidebarViewState {
        SidebarViewState {
            collapsed: self.collapsed(),
            scroll_offset: self
                .store
                .read(keys::SIDEBAR_SCROLL_POSITION)
                .and_then(|raw| codec::decode_offset(&raw)),
        }
    }

    #[must_use]
    pub fn collapsed(&self) -> bool {
        self.store
            .read(keys::SIDEBAR_COLLAPSED)
            .and_then(|raw| codec::decode_flag(&raw))
            .unwrap_or(false)
    }

    /// Flips the collapsed flag, persisting the new value before
    /// returning so a reload mid-transition reproduces the chosen state.
    pub fn toggle_collapsed(&self) -> bool {
        let next = !self.collapsed();
        self.store
            .write(keys::SIDEBAR_COLLAPSED, codec::encode_flag(next));
        next
    }

    /// Persists the latest scroll offset. Called per scroll event; writes
    /// are cheap and local, so there is no throttling.
    pub fn record_scroll(&self, offset: u32) {
        self.store
            .write(keys::SIDEBAR_SCROLL_POSITION, &codec::encode_offset(offset));
    }

    /// Decides the mount-time scroll position. Restoring and centering
    /// both write nothing; only user scrolling does.
    #[must_use]
    pub fn initial_scroll(&self, layout: &SidebarLayout) -> ScrollPlan {
        if let Some(offset) = self.hydrate().scroll_offset {
            return ScrollPlan::Restore(offset);
        }
        match layout.current_index() {
            Some(index) => ScrollPlan::CenterCurrent(layout.centered_offset(index)),
            None => ScrollPlan::Top,
        }
    }
}

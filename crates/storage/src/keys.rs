//! Fixed key names for every persisted value.

/// Completed task ids, durable area. JSON array of strings.
pub const COMPLETED_TASKS: &str = "completed-tasks";

/// Sidebar collapsed flag, session area. `"true"` / `"false"`.
pub const SIDEBAR_COLLAPSED: &str = "sidebar-collapsed";

/// Last sidebar scroll offset in pixels, session area. Decimal integer.
pub const SIDEBAR_SCROLL_POSITION: &str = "sidebar-scroll-position";

#![forbid(unsafe_code)]

pub mod clipboard;
pub mod completion;
pub mod error;
pub mod sidebar;
pub mod tasks;

pub use taskdeck_core::Clock;

pub use clipboard::{
    COPY_FEEDBACK_WINDOW_SECS, Clipboard, CopyFeedback, FailingClipboard, MemoryClipboard,
};
pub use completion::{CompletionChange, CompletionTracker, SubscriberId};
pub use error::{ClipboardError, TaskFileError};
pub use sidebar::{ScrollPlan, SidebarLayout, SidebarTracker, SidebarViewState};
pub use tasks::{load_tasks, parse_tasks, sample_tasks};

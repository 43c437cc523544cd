use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use taskdeck_core::Clock;

use crate::error::ClipboardError;

/// How long the "copied" success state stays visible, in seconds.
pub const COPY_FEEDBACK_WINDOW_SECS: i64 = 2;

/// Write-text-to-system-clipboard capability.
///
/// Implementations may fail; callers go through `CopyFeedback`, which
/// treats failure as "not copied" rather than an error.
pub trait Clipboard: Send + Sync {
    /// # Errors
    ///
    /// Returns `ClipboardError` when the platform clipboard rejects the
    /// write or is unavailable.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that remembers the last written text. For tests and
/// prototyping.
#[derive(Default)]
pub struct MemoryClipboard {
    last: Mutex<Option<String>>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_written(&self) -> Option<String> {
        self.last.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self
            .last
            .lock()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        *guard = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard whose writes always fail. Backs the degraded-mode tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingClipboard;

impl Clipboard for FailingClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Write("refused".to_string()))
    }
}

/// Copy-to-clipboard with a transient success window.
///
/// A successful copy records its instant; `is_copied` reports true within
/// the display window of the most recent success, so a later copy
/// supersedes an earlier one's expiry. A failed write is logged and
/// recorded as nothing, which the UI shows by simply not flipping to the
/// success state.
pub struct CopyFeedback {
    clipboard: std::sync::Arc<dyn Clipboard>,
    clock: Mutex<Clock>,
    window: Duration,
    last_copied: Mutex<Option<DateTime<Utc>>>,
}

impl CopyFeedback {
    #[must_use]
    pub fn new(clipboard: std::sync::Arc<dyn Clipboard>, clock: Clock) -> Self {
        Self {
            clipboard,
            clock: Mutex::new(clock),
            window: Duration::seconds(COPY_FEEDBACK_WINDOW_SECS),
            last_copied: Mutex::new(None),
        }
    }

    /// Writes `text` to the clipboard. Returns whether the success state
    /// should show.
    pub fn copy(&self, text: &str) -> bool {
        match self.clipboard.write_text(text) {
            Ok(()) => {
                if let Ok(mut last) = self.last_copied.lock() {
                    *last = Some(self.now());
                }
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "copy to clipboard failed");
                false
            }
        }
    }

    /// True within the display window of the latest successful copy.
    #[must_use]
    pub fn is_copied(&self) -> bool {
        let Ok(last) = self.last_copied.lock() else {
            return false;
        };
        match *last {
            Some(at) => self.now() - at < self.window,
            None => false,
        }
    }

    /// Advances a fixed clock; no effect on the default clock.
    pub fn advance_clock(&self, delta: Duration) {
        if let Ok(mut clock) = self.clock.lock() {
            clock.advance(delta);
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock
            .lock()
            .map(|clock| clock.now())
            .unwrap_or_else(|_| Utc::now())
    }
}

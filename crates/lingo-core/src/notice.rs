// ABOUTME: Single user-visible notice slot with automatic dismissal
// ABOUTME: Posting replaces the current notice; reads ignore notices older than the dismiss interval

use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Notices disappear after this long unless configured otherwise.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// User input violated a precondition.
    Validation,
    /// The host does not expose the capability.
    Unavailable,
    /// The capability call raised an error.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    posted_at: Instant,
}

#[derive(Debug)]
pub struct NoticeBoard {
    slot: Mutex<Option<Notice>>,
    dismiss_after: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

impl NoticeBoard {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            dismiss_after,
        }
    }

    /// Replace whatever is showing with a new notice.
    pub fn post(&self, kind: NoticeKind, text: impl Into<String>) -> Notice {
        let notice = Notice {
            kind,
            text: text.into(),
            posted_at: Instant::now(),
        };
        tracing::info!(kind = ?notice.kind, text = %notice.text, "Notice posted");
        *self.lock() = Some(notice.clone());
        notice
    }

    /// The active notice, if one was posted less than `dismiss_after` ago.
    pub fn current(&self) -> Option<Notice> {
        let mut slot = self.lock();
        if slot
            .as_ref()
            .is_some_and(|n| n.posted_at.elapsed() >= self.dismiss_after)
        {
            *slot = None;
        }
        slot.clone()
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Notice>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

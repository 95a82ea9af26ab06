use std::sync::{Arc, Mutex, PoisonError};
use crate::models::{Notice, Severity};

/// Sink for user-visible notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Collects a session's notices until the next response drains them
///
/// Every notice is also written to the log.
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    pending: Arc<Mutex<Vec<Notice>>>,
}

impl NoticeQueue {
    /// Take every pending notice, oldest first
    pub fn drain(&self) -> Vec<Notice> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *pending)
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NoticeQueue {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Info => tracing::info!("Notice: {} - {}", notice.title, notice.description),
            Severity::Warning => tracing::warn!("Notice: {} - {}", notice.title, notice.description),
        }
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

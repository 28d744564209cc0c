//! Transient user-facing notices.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Neutral information.
    Info,
    /// A write went through.
    Success,
    /// Something failed.
    Error,
}

/// A message shown briefly to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Text shown to the user.
    pub message: String,
    /// Severity.
    pub level: NoticeLevel,
    /// When the notice was raised.
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    fn new(message: impl Into<String>, level: NoticeLevel) -> Self {
        Self {
            message: message.into(),
            level,
            raised_at: Utc::now(),
        }
    }

    /// Informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NoticeLevel::Info)
    }

    /// Success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NoticeLevel::Success)
    }

    /// Error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NoticeLevel::Error)
    }
}

/// Notices waiting to be shown, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    /// Queue a notice.
    pub fn push(&mut self, notice: Notice) {
        self.queue.push_back(notice);
    }

    /// Most recent notice.
    #[must_use]
    pub fn latest(&self) -> Option<&Notice> {
        self.queue.back()
    }

    /// Take every pending notice.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.queue.drain(..).collect()
    }

    /// Number of queued notices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

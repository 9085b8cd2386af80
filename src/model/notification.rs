//! Transient user-facing notifications

use chrono::{DateTime, Duration, Local};

/// How long a toast stays on screen
pub const TOAST_SECONDS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub created_at: DateTime<Local>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
            created_at: Local::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            created_at: Local::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Local>) -> bool {
        now - self.created_at >= Duration::seconds(TOAST_SECONDS)
    }
}

/// Anything that can show a notification to the user
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// In-app toast queue, newest last
#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Notification>,
}

impl Toasts {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Most recent toast, if any is still showing
    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop expired toasts; returns true if anything was removed
    pub fn prune(&mut self, now: DateTime<Local>) -> bool {
        let before = self.items.len();
        self.items.retain(|n| !n.is_expired(now));
        self.items.len() != before
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, notification: Notification) {
        self.items.push(notification);
    }
}

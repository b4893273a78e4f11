//! Transient user notifications

use std::time::Duration;

use crate::error::CatalogError;

/// How long a notification stays on screen.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
            duration: NOTIFICATION_DURATION,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
            duration: NOTIFICATION_DURATION,
        }
    }

    /// Prefer the server's message, falling back to `fallback`.
    pub fn from_error(err: &CatalogError, fallback: &str) -> Self {
        match err {
            CatalogError::AdminRequired => Self::error(err.to_string()),
            _ => Self::error(err.message().unwrap_or(fallback)),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

//! User-visible notifications.
//!
//! Every failure path in the portal ends in one of these rather than an
//! error: validation problems, storage failures and access denials are all
//! reported to the user as a toast.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Success,
    Error,
    Warning,
    Info,
}

impl Level {
    /// Returns the lowercase name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// The single toast currently on screen.
///
/// Showing a new toast replaces the previous one.
#[derive(Debug, Clone, Default)]
pub struct ToastSlot {
    current: Option<(Notification, DateTime<Utc>)>,
}

impl ToastSlot {
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Show `notification`, replacing whatever was shown before.
    pub fn show(&mut self, notification: Notification, at: DateTime<Utc>) {
        self.current = Some((notification, at));
    }

    /// The toast visible at `now`, if it has not yet timed out.
    #[must_use]
    pub fn visible_at(&self, now: DateTime<Utc>) -> Option<&Notification> {
        let (notification, shown_at) = self.current.as_ref()?;
        let elapsed = now.signed_duration_since(*shown_at).to_std().ok()?;
        (elapsed < TOAST_DURATION).then_some(notification)
    }
}

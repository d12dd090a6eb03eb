//! Announcements shown in the news ticker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::status::AnnouncementPriority;

/// A single ticker announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub msg: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub priority: AnnouncementPriority,
}

impl Announcement {
    /// Create an announcement.
    #[must_use]
    pub fn new(msg: impl Into<String>, date: NaiveDate, priority: AnnouncementPriority) -> Self {
        Self {
            msg: msg.into(),
            date,
            priority,
        }
    }

    /// Short date shown in front of the message, e.g. "Jun 16".
    #[must_use]
    pub fn short_date(&self) -> String {
        self.date.format("%b %d").to_string()
    }
}

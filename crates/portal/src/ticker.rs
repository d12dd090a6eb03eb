//! Announcement ticker.

use std::time::Duration;

use chrono::NaiveDate;
use deer_hub_core::{Announcement, AnnouncementPriority};
use serde::Serialize;

/// Time each announcement stays current.
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(4);

/// Shown when there is nothing else to show.
pub const FALLBACK_MESSAGE: &str = "Welcome to DEER Hub - Your employee engagement platform";

const BUILT_IN: [(&str, (i32, u32, u32), AnnouncementPriority); 7] = [
    (
        "🎉 Welcome to the new DEER Hub platform! Explore all the enhanced features.",
        (2025, 6, 16),
        AnnouncementPriority::High,
    ),
    (
        "📅 Monthly team meeting scheduled for Friday at 3:00 PM in Conference Room A.",
        (2025, 6, 15),
        AnnouncementPriority::Medium,
    ),
    (
        "🏖️ Summer vacation policy updates are now available in the HR portal.",
        (2025, 6, 14),
        AnnouncementPriority::Medium,
    ),
    (
        "🔒 Security reminder: Please update your passwords and enable 2FA.",
        (2025, 6, 13),
        AnnouncementPriority::High,
    ),
    (
        "🎯 Q2 performance reviews begin next week. Check your calendar for scheduled meetings.",
        (2025, 6, 12),
        AnnouncementPriority::Medium,
    ),
    (
        "☕ New coffee machine installed in the break room. Enjoy premium blends!",
        (2025, 6, 11),
        AnnouncementPriority::Low,
    ),
    (
        "📚 Professional development budget increased by 25% for all employees.",
        (2025, 6, 10),
        AnnouncementPriority::High,
    ),
];

/// The built-in announcements, unsorted.
#[must_use]
pub fn built_in_announcements() -> Vec<Announcement> {
    BUILT_IN
        .iter()
        .filter_map(|&(msg, (y, m, d), priority)| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| Announcement::new(msg, date, priority))
        })
        .collect()
}

/// Badge colour for a priority name; unknown names get the medium colour.
#[must_use]
pub fn priority_color(name: &str) -> &'static str {
    let priority = match name {
        "high" => AnnouncementPriority::High,
        "low" => AnnouncementPriority::Low,
        _ => AnnouncementPriority::Medium,
    };
    priority.color()
}

/// Sort by priority (high first), then newest first.
pub fn sort_announcements(announcements: &mut [Announcement]) {
    announcements.sort_by(|a, b| b.priority.cmp(&a.priority).then(b.date.cmp(&a.date)));
}

/// Text of one ticker entry, e.g. "[Jun 16] Welcome".
#[must_use]
pub fn ticker_line(announcement: &Announcement) -> String {
    format!("[{}] {}", announcement.short_date(), announcement.msg)
}

/// Contents of the detail dialog for one announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnouncementDetail {
    pub date: String,
    pub priority: &'static str,
    pub color: &'static str,
    pub message: String,
}

impl From<&Announcement> for AnnouncementDetail {
    fn from(a: &Announcement) -> Self {
        Self {
            date: a.short_date(),
            priority: a.priority.as_str(),
            color: a.priority.color(),
            message: a.msg.clone(),
        }
    }
}

/// Rotating list of announcements.
#[derive(Debug, Clone, Default)]
pub struct Ticker {
    announcements: Vec<Announcement>,
    current: usize,
}

impl Ticker {
    /// Build a ticker over `announcements`, sorted for display.
    ///
    /// An empty list is replaced by a single fallback message dated `today`.
    #[must_use]
    pub fn load(mut announcements: Vec<Announcement>, today: NaiveDate) -> Self {
        if announcements.is_empty() {
            tracing::warn!("No announcements loaded, using fallback");
            announcements.push(Announcement::new(
                FALLBACK_MESSAGE,
                today,
                AnnouncementPriority::Medium,
            ));
        }
        sort_announcements(&mut announcements);
        tracing::debug!(count = announcements.len(), "Announcements loaded");
        Self {
            announcements,
            current: 0,
        }
    }

    /// Ticker over the built-in announcements.
    #[must_use]
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self::load(built_in_announcements(), today)
    }

    #[must_use]
    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current(&self) -> Option<&Announcement> {
        self.announcements.get(self.current)
    }

    /// Move to the next announcement, wrapping at the end.
    pub fn advance(&mut self) -> Option<&Announcement> {
        if self.announcements.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.announcements.len();
        self.current()
    }

    /// Put `announcement` at the front and restart the rotation.
    pub fn add(&mut self, announcement: Announcement) {
        self.announcements.insert(0, announcement);
        self.current = 0;
    }

    /// Remove every announcement.
    pub fn clear(&mut self) {
        self.announcements.clear();
        self.current = 0;
    }

    /// Detail view for the announcement at `index`.
    #[must_use]
    pub fn detail(&self, index: usize) -> Option<AnnouncementDetail> {
        self.announcements.get(index).map(AnnouncementDetail::from)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()
    }

    #[test]
    fn test_defaults_sorted_by_priority_then_date() {
        let ticker = Ticker::with_defaults(today());
        let order: Vec<_> = ticker
            .announcements()
            .iter()
            .map(|a| (a.priority, a.date.format("%d").to_string()))
            .collect();
        assert_eq!(ticker.announcements().len(), 7);
        assert_eq!(
            order,
            vec![
                (AnnouncementPriority::High, "16".to_owned()),
                (AnnouncementPriority::High, "13".to_owned()),
                (AnnouncementPriority::High, "10".to_owned()),
                (AnnouncementPriority::Medium, "15".to_owned()),
                (AnnouncementPriority::Medium, "14".to_owned()),
                (AnnouncementPriority::Medium, "12".to_owned()),
                (AnnouncementPriority::Low, "11".to_owned()),
            ]
        );
    }

    #[test]
    fn test_empty_load_uses_fallback() {
        let ticker = Ticker::load(Vec::new(), today());
        let only = ticker.current().unwrap();
        assert_eq!(only.msg, FALLBACK_MESSAGE);
        assert_eq!(only.date, today());
    }

    #[test]
    fn test_rotation_wraps() {
        let mut ticker = Ticker::with_defaults(today());
        for _ in 0..6 {
            ticker.advance();
        }
        assert_eq!(ticker.current_index(), 6);
        ticker.advance();
        assert_eq!(ticker.current_index(), 0);
    }

    #[test]
    fn test_add_and_clear() {
        let mut ticker = Ticker::with_defaults(today());
        ticker.advance();
        ticker.add(Announcement::new("Office closed Monday", today(), AnnouncementPriority::Low));
        assert_eq!(ticker.current().unwrap().msg, "Office closed Monday");
        assert_eq!(ticker.announcements().len(), 8);

        ticker.clear();
        assert!(ticker.current().is_none());
        assert!(ticker.advance().is_none());
    }

    #[test]
    fn test_line_and_detail() {
        let ticker = Ticker::with_defaults(today());
        let first = ticker.current().unwrap();
        assert!(ticker_line(first).starts_with("[Jun 16] 🎉"));

        let detail = ticker.detail(0).unwrap();
        assert_eq!(detail.priority, "high");
        assert_eq!(detail.color, "#f44336");
        assert!(ticker.detail(99).is_none());
    }

    #[test]
    fn test_priority_color_defaults_to_medium() {
        assert_eq!(priority_color("low"), "#4CAF50");
        assert_eq!(priority_color("critical"), "#ff9800");
    }
}

//! Leave request records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::LeaveRequestId;
use super::status::{LeaveStatus, LeaveType, Priority};

/// A submitted leave request as stored in the `leaveRequests` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: LeaveRequestId,
    pub employee_name: String,
    pub employee_email: String,
    pub leave_type: LeaveType,
    pub priority: Priority,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    /// Required only for leave longer than five days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    /// Number of supporting documents attached to the form.
    #[serde(default)]
    pub supporting_docs: usize,
    pub status: LeaveStatus,
    pub submission_date: DateTime<Utc>,
    /// Length of the leave in days, both ends inclusive.
    pub duration: u32,
}

impl LeaveRequest {
    /// Duration formatted for display, e.g. "1 day" or "4 days".
    #[must_use]
    pub fn duration_label(&self) -> String {
        day_label(self.duration)
    }
}

/// A leave form saved without validation.
///
/// Keeps every field exactly as typed so that an incomplete form can be
/// restored later. Stored under `leaveRequestDraft` with `status = "draft"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDraft {
    pub id: LeaveRequestId,
    pub employee_name: String,
    pub employee_email: String,
    pub leave_type: String,
    pub priority: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    #[serde(default)]
    pub emergency_contact: String,
    #[serde(default)]
    pub supporting_docs: usize,
    pub status: LeaveStatus,
    pub submission_date: DateTime<Utc>,
    /// Inclusive day count if both dates parse, otherwise 0.
    #[serde(default)]
    pub duration: u32,
}

/// Format a number of days as "1 day" / "N days".
#[must_use]
pub fn day_label(days: u32) -> String {
    if days == 1 {
        "1 day".to_owned()
    } else {
        format!("{days} days")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_day_label() {
        assert_eq!(day_label(1), "1 day");
        assert_eq!(day_label(0), "0 days");
        assert_eq!(day_label(12), "12 days");
    }

    #[test]
    fn test_request_json_shape() {
        let request = LeaveRequest {
            id: LeaveRequestId::new(1),
            employee_name: "John Employee".to_owned(),
            employee_email: "employee@deer.com".to_owned(),
            leave_type: LeaveType::Annual,
            priority: Priority::Normal,
            start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 3).unwrap(),
            reason: "Family trip".to_owned(),
            emergency_contact: None,
            supporting_docs: 0,
            status: LeaveStatus::Pending,
            submission_date: Utc.with_ymd_and_hms(2025, 6, 16, 9, 0, 0).unwrap(),
            duration: 3,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["leaveType"], "annual");
        assert_eq!(value["startDate"], "2025-07-01");
        assert_eq!(value["status"], "pending");
        assert!(value.get("emergencyContact").is_none());
        assert_eq!(request.duration_label(), "3 days");
    }
}

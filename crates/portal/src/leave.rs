//! Leave request form.
//!
//! [`LeaveForm`] holds the fields as typed. Submitting validates them into a
//! [`LeaveRequest`]; saving a draft keeps them as-is in a [`LeaveDraft`].

use chrono::{DateTime, NaiveDate, Utc};
use deer_hub_core::{
    LeaveDraft, LeaveRequest, LeaveRequestId, LeaveStatus, LeaveType, Priority, Session,
};
use serde::Serialize;

use crate::forms::{FieldErrors, FileRule, FileSelection, MEGABYTE, REQUIRED_MESSAGE};

/// Longest accepted reason, in characters.
pub const MAX_REASON_CHARS: usize = 500;

/// Leave longer than this many days needs an emergency contact.
pub const EMERGENCY_CONTACT_AFTER_DAYS: u32 = 5;

/// Requests shown in the "recent requests" panel.
pub const RECENT_REQUESTS: usize = 3;

/// Limits for supporting documents.
pub const SUPPORTING_DOCS: FileRule = FileRule {
    max_bytes: 5 * MEGABYTE,
    allowed_types: &[
        "application/pdf",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "image/jpeg",
        "image/jpg",
        "image/png",
    ],
};

pub const SUBMIT_SUCCESS: &str = "Leave request submitted successfully!";
pub const SUBMIT_FAILED: &str = "Unable to save leave request. Please try again.";
pub const DRAFT_SAVED: &str = "Draft saved successfully!";
pub const DRAFT_FAILED: &str = "Unable to save draft. Please try again.";
pub const END_BEFORE_START: &str = "End date must be after start date";
pub const START_IN_PAST: &str = "Start date cannot be in the past";
pub const INVALID_DATE: &str = "Please enter a valid date";
pub const INVALID_OPTION: &str = "Please select a valid option";

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

fn required_date(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<NaiveDate> {
    if !errors.require(field, value) {
        return None;
    }
    parse_date(value).or_else(|| {
        errors.add(field, INVALID_DATE);
        None
    })
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Inclusive number of days between two dates, in either order.
#[must_use]
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - start).num_days().unsigned_abs() + 1;
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// The leave form as the user filled it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveForm {
    pub leave_type: String,
    pub priority: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
    reason: String,
    pub emergency_contact: String,
    supporting_docs: Vec<FileSelection>,
}

impl LeaveForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a leave type and pre-select its suggested priority.
    pub fn select_leave_type(&mut self, leave_type: LeaveType) {
        self.leave_type = leave_type.as_str().to_owned();
        self.priority = leave_type.suggested_priority().as_str().to_owned();
    }

    /// Set the reason, cut to [`MAX_REASON_CHARS`].
    pub fn set_reason(&mut self, reason: &str) {
        self.reason = truncate_chars(reason, MAX_REASON_CHARS);
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Number of characters left for the reason.
    #[must_use]
    pub fn reason_chars_left(&self) -> usize {
        MAX_REASON_CHARS.saturating_sub(self.reason.chars().count())
    }

    /// Attach supporting documents.
    ///
    /// If any file breaks the limits the whole selection is cleared.
    ///
    /// # Errors
    ///
    /// Returns one message per broken limit.
    pub fn attach(&mut self, files: Vec<FileSelection>) -> Result<(), Vec<String>> {
        let errors: Vec<String> = files
            .iter()
            .flat_map(|f| SUPPORTING_DOCS.violations(f))
            .collect();
        if errors.is_empty() {
            self.supporting_docs = files;
            Ok(())
        } else {
            self.supporting_docs.clear();
            Err(errors)
        }
    }

    #[must_use]
    pub fn supporting_docs(&self) -> &[FileSelection] {
        &self.supporting_docs
    }

    /// Inclusive duration if both dates are filled in.
    #[must_use]
    pub fn duration(&self) -> Option<u32> {
        Some(inclusive_days(
            parse_date(&self.start_date)?,
            parse_date(&self.end_date)?,
        ))
    }

    /// Whether the emergency contact field is required.
    #[must_use]
    pub fn needs_emergency_contact(&self) -> bool {
        self.duration()
            .is_some_and(|days| days > EMERGENCY_CONTACT_AFTER_DAYS)
    }

    /// Validate the form for submission.
    ///
    /// # Errors
    ///
    /// Returns every field that failed, in form order.
    pub fn validate(&self, today: NaiveDate) -> Result<ValidatedLeave, FieldErrors> {
        let mut errors = FieldErrors::new();

        let leave_type = if errors.require("leaveType", &self.leave_type) {
            self.leave_type.trim().parse::<LeaveType>().ok().or_else(|| {
                errors.add("leaveType", INVALID_OPTION);
                None
            })
        } else {
            None
        };

        let start = required_date(&mut errors, "startDate", &self.start_date);
        let end = required_date(&mut errors, "endDate", &self.end_date);
        errors.require("reason", &self.reason);

        let priority = if errors.require("priority", &self.priority) {
            self.priority.trim().parse::<Priority>().ok().or_else(|| {
                errors.add("priority", INVALID_OPTION);
                None
            })
        } else {
            None
        };

        if let Some(start) = start
            && start < today
        {
            errors.add("startDate", START_IN_PAST);
        }
        if let (Some(start), Some(end)) = (start, end)
            && end < start
        {
            errors.add("endDate", END_BEFORE_START);
        }

        let emergency_contact = self.emergency_contact.trim();
        if self.needs_emergency_contact() && emergency_contact.is_empty() {
            errors.add("emergencyContact", REQUIRED_MESSAGE);
        }

        match (leave_type, priority, start, end) {
            (Some(leave_type), Some(priority), Some(start_date), Some(end_date))
                if errors.is_empty() =>
            {
                Ok(ValidatedLeave {
                    leave_type,
                    priority,
                    start_date,
                    end_date,
                    reason: truncate_chars(self.reason.trim(), MAX_REASON_CHARS),
                    emergency_contact: (!emergency_contact.is_empty())
                        .then(|| emergency_contact.to_owned()),
                    supporting_docs: self.supporting_docs.len(),
                    duration: inclusive_days(start_date, end_date),
                })
            }
            _ => Err(errors),
        }
    }

    /// Snapshot the form as a draft without validating it.
    #[must_use]
    pub fn to_draft(&self, id: LeaveRequestId, owner: &Session, at: DateTime<Utc>) -> LeaveDraft {
        LeaveDraft {
            id,
            employee_name: owner.name.clone(),
            employee_email: owner.email.to_string(),
            leave_type: self.leave_type.clone(),
            priority: self.priority.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            reason: self.reason.clone(),
            emergency_contact: self.emergency_contact.clone(),
            supporting_docs: self.supporting_docs.len(),
            status: LeaveStatus::Draft,
            submission_date: at,
            duration: self.duration().unwrap_or(0),
        }
    }

    /// Restore a form from a saved draft.
    ///
    /// Attachments are not kept in drafts and must be picked again.
    #[must_use]
    pub fn from_draft(draft: &LeaveDraft) -> Self {
        Self {
            leave_type: draft.leave_type.clone(),
            priority: draft.priority.clone(),
            start_date: draft.start_date.clone(),
            end_date: draft.end_date.clone(),
            reason: truncate_chars(&draft.reason, MAX_REASON_CHARS),
            emergency_contact: draft.emergency_contact.clone(),
            supporting_docs: Vec::new(),
        }
    }
}

/// Leave form contents that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLeave {
    pub leave_type: LeaveType,
    pub priority: Priority,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub emergency_contact: Option<String>,
    pub supporting_docs: usize,
    pub duration: u32,
}

impl ValidatedLeave {
    /// Turn into a pending request filed by `owner`.
    #[must_use]
    pub fn into_request(
        self,
        id: LeaveRequestId,
        owner: &Session,
        submitted_at: DateTime<Utc>,
    ) -> LeaveRequest {
        LeaveRequest {
            id,
            employee_name: owner.name.clone(),
            employee_email: owner.email.to_string(),
            leave_type: self.leave_type,
            priority: self.priority,
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason,
            emergency_contact: self.emergency_contact,
            supporting_docs: self.supporting_docs,
            status: LeaveStatus::Pending,
            submission_date: submitted_at,
            duration: self.duration,
        }
    }
}

/// Yearly allowance for one leave type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaveBalance {
    pub leave_type: LeaveType,
    pub total: u32,
    pub used: u32,
}

impl LeaveBalance {
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.used)
    }
}

/// Fixed balances shown beside the form until real accounting exists.
pub const LEAVE_BALANCES: [LeaveBalance; 3] = [
    LeaveBalance {
        leave_type: LeaveType::Annual,
        total: 25,
        used: 7,
    },
    LeaveBalance {
        leave_type: LeaveType::Sick,
        total: 15,
        used: 3,
    },
    LeaveBalance {
        leave_type: LeaveType::Personal,
        total: 6,
        used: 1,
    },
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use deer_hub_core::{Email, Role};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()
    }

    fn filled(start: &str, end: &str) -> LeaveForm {
        let mut form = LeaveForm::new();
        form.select_leave_type(LeaveType::Annual);
        form.start_date = start.to_owned();
        form.end_date = end.to_owned();
        form.set_reason("Family trip");
        form
    }

    fn owner() -> Session {
        Session::new(
            "John Employee",
            Email::parse("employee@deer.com").unwrap(),
            Role::Employee,
            Utc.with_ymd_and_hms(2025, 6, 16, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_valid_form_becomes_pending_request() {
        let leave = filled("2025-07-01", "2025-07-03").validate(today()).unwrap();
        assert_eq!(leave.duration, 3);
        assert_eq!(leave.emergency_contact, None);

        let at = Utc.with_ymd_and_hms(2025, 6, 16, 9, 0, 0).unwrap();
        let request = leave.into_request(LeaveRequestId::from_timestamp(at), &owner(), at);
        assert_eq!(request.status, LeaveStatus::Pending);
        assert_eq!(request.employee_email, "employee@deer.com");
        assert_eq!(request.priority, Priority::Normal);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let errors = filled("2025-07-05", "2025-07-01").validate(today()).unwrap_err();
        assert_eq!(errors.get("endDate"), Some(END_BEFORE_START));
    }

    #[test]
    fn test_same_day_is_one_day() {
        let leave = filled("2025-06-16", "2025-06-16").validate(today()).unwrap();
        assert_eq!(leave.duration, 1);
    }

    #[test]
    fn test_start_in_past_rejected() {
        let errors = filled("2025-06-15", "2025-06-20").validate(today()).unwrap_err();
        assert_eq!(errors.get("startDate"), Some(START_IN_PAST));
    }

    #[test]
    fn test_required_fields() {
        let errors = LeaveForm::new().validate(today()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["leaveType", "startDate", "endDate", "reason", "priority"]
        );
    }

    #[test]
    fn test_invalid_values() {
        let mut form = filled("2025-07-01", "July 3rd");
        form.leave_type = "sabbatical".to_owned();
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.get("leaveType"), Some(INVALID_OPTION));
        assert_eq!(errors.get("endDate"), Some(INVALID_DATE));
    }

    #[test]
    fn test_long_leave_needs_emergency_contact() {
        let mut form = filled("2025-07-01", "2025-07-06");
        assert_eq!(form.duration(), Some(6));
        assert!(form.needs_emergency_contact());
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.get("emergencyContact"), Some(REQUIRED_MESSAGE));

        form.emergency_contact = "Mary, 555-0100".to_owned();
        let leave = form.validate(today()).unwrap();
        assert_eq!(leave.emergency_contact.as_deref(), Some("Mary, 555-0100"));

        let five = filled("2025-07-01", "2025-07-05");
        assert!(!five.needs_emergency_contact());
    }

    #[test]
    fn test_reason_truncated() {
        let mut form = LeaveForm::new();
        form.set_reason(&"é".repeat(600));
        assert_eq!(form.reason().chars().count(), MAX_REASON_CHARS);
        assert_eq!(form.reason_chars_left(), 0);
    }

    #[test]
    fn test_suggested_priority_on_type_change() {
        let mut form = LeaveForm::new();
        form.select_leave_type(LeaveType::Bereavement);
        assert_eq!(form.priority, "urgent");
        form.select_leave_type(LeaveType::Sick);
        assert_eq!(form.priority, "high");
    }

    #[test]
    fn test_attach_rejects_whole_selection() {
        let mut form = LeaveForm::new();
        form.attach(vec![FileSelection::new("note.pdf", 1000, "application/pdf")])
            .unwrap();
        assert_eq!(form.supporting_docs().len(), 1);

        let errors = form
            .attach(vec![
                FileSelection::new("ok.png", 1000, "image/png"),
                FileSelection::new("huge.zip", 6 * MEGABYTE, "application/zip"),
            ])
            .unwrap_err();
        assert_eq!(
            errors,
            vec!["huge.zip exceeds 5MB limit", "huge.zip has unsupported format"]
        );
        assert!(form.supporting_docs().is_empty());
    }

    #[test]
    fn test_draft_keeps_raw_fields() {
        let mut form = filled("2025-07-01", "not a date");
        form.priority = String::new();
        let at = Utc.with_ymd_and_hms(2025, 6, 16, 9, 0, 0).unwrap();
        let draft = form.to_draft(LeaveRequestId::new(1), &owner(), at);
        assert_eq!(draft.status, LeaveStatus::Draft);
        assert_eq!(draft.end_date, "not a date");
        assert_eq!(draft.duration, 0);
        assert_eq!(LeaveForm::from_draft(&draft), form);
    }

    #[test]
    fn test_balances() {
        let remaining: Vec<_> = LEAVE_BALANCES.iter().map(LeaveBalance::remaining).collect();
        assert_eq!(remaining, vec![18, 12, 5]);
    }
}

//! Role and status enums for portal records.
//!
//! All enums serialize to the lowercase names used in the persisted JSON.

use serde::{Deserialize, Serialize};

/// Role of a logged-in portal user.
///
/// Only these three roles are ever persisted in a session. Visitors without
/// a session are treated as guests by the UI projection, which is not a role
/// a session can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular staff member.
    Employee,
    /// Team manager, may manage shared documents.
    Manager,
    /// Portal administrator.
    Admin,
}

impl Role {
    /// All persisted roles.
    pub const ALL: [Self; 3] = [Self::Employee, Self::Manager, Self::Admin];

    /// Returns true for roles with access to team resources.
    #[must_use]
    pub const fn is_manager_or_admin(self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }

    /// Returns the persisted name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Self::Employee),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Lifecycle status of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Saved from the form without submitting.
    Draft,
    /// Submitted and awaiting a decision.
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    /// Returns the persisted name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Annual,
    Sick,
    Personal,
    Emergency,
    Bereavement,
}

impl LeaveType {
    /// Priority pre-selected on the form when this leave type is chosen.
    #[must_use]
    pub const fn suggested_priority(self) -> Priority {
        match self {
            Self::Emergency | Self::Bereavement => Priority::Urgent,
            Self::Sick => Priority::High,
            Self::Annual | Self::Personal => Priority::Normal,
        }
    }

    /// Returns the persisted name of the leave type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Sick => "sick",
            Self::Personal => "personal",
            Self::Emergency => "emergency",
            Self::Bereavement => "bereavement",
        }
    }

    /// Heading used when listing a request, e.g. "Annual Leave".
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Annual => "Annual Leave",
            Self::Sick => "Sick Leave",
            Self::Personal => "Personal Leave",
            Self::Emergency => "Emergency Leave",
            Self::Bereavement => "Bereavement Leave",
        }
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LeaveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annual" => Ok(Self::Annual),
            "sick" => Ok(Self::Sick),
            "personal" => Ok(Self::Personal),
            "emergency" => Ok(Self::Emergency),
            "bereavement" => Ok(Self::Bereavement),
            _ => Err(format!("invalid leave type: {s}")),
        }
    }
}

/// Priority of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    /// Returns the persisted name of the priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(format!("invalid priority: {s}")),
        }
    }
}

/// Status of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Active,
    Archived,
}

/// Importance of a ticker announcement.
///
/// Ordered so that `High > Medium > Low`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl AnnouncementPriority {
    /// Badge colour for the priority.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::High => "#f44336",
            Self::Medium => "#ff9800",
            Self::Low => "#4CAF50",
        }
    }

    /// Returns the persisted name of the priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip_names() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_manager_or_admin() {
        assert!(!Role::Employee.is_manager_or_admin());
        assert!(Role::Manager.is_manager_or_admin());
        assert!(Role::Admin.is_manager_or_admin());
    }

    #[test]
    fn test_guest_role_does_not_deserialize() {
        assert!(serde_json::from_str::<Role>("\"guest\"").is_err());
    }

    #[test]
    fn test_suggested_priority() {
        assert_eq!(LeaveType::Emergency.suggested_priority(), Priority::Urgent);
        assert_eq!(LeaveType::Bereavement.suggested_priority(), Priority::Urgent);
        assert_eq!(LeaveType::Sick.suggested_priority(), Priority::High);
        assert_eq!(LeaveType::Annual.suggested_priority(), Priority::Normal);
        assert_eq!(LeaveType::Personal.suggested_priority(), Priority::Normal);
    }

    #[test]
    fn test_leave_status_serializes_lowercase() {
        let json = serde_json::to_string(&LeaveStatus::Draft).unwrap();
        assert_eq!(json, "\"draft\"");
    }

    #[test]
    fn test_announcement_priority_ordering() {
        assert!(AnnouncementPriority::High > AnnouncementPriority::Medium);
        assert!(AnnouncementPriority::Medium > AnnouncementPriority::Low);
    }
}

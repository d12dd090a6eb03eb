//! Session record held by the portal's session storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::status::Role;

/// The currently logged-in user, as persisted under the session key.
///
/// Field names serialize in camelCase so the stored JSON matches the
/// portal's existing schema (`isLoggedIn`, `loginTime`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Whether the record represents an active login.
    pub is_logged_in: bool,
    /// Display name.
    pub name: String,
    /// Login email address.
    pub email: Email,
    /// Role granted for this session.
    pub role: Role,
    /// When the session was created.
    pub login_time: DateTime<Utc>,
}

impl Session {
    /// Create an active session.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: Email,
        role: Role,
        login_time: DateTime<Utc>,
    ) -> Self {
        Self {
            is_logged_in: true,
            name: name.into(),
            email,
            role,
            login_time,
        }
    }

    /// Role of the session if it represents an active login.
    #[must_use]
    pub const fn active_role(&self) -> Option<Role> {
        if self.is_logged_in {
            Some(self.role)
        } else {
            None
        }
    }
}

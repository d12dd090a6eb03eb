//! Access policy.
//!
//! Pure decisions over the current session. Every (session, capability)
//! pair maps to exactly one [`Decision`]; nothing here reads storage or
//! mutates state.
//!
//! | Capability | Required |
//! |---|---|
//! | [`Capability::ViewLeavePage`] | authenticated |
//! | [`Capability::SubmitLeave`] | authenticated |
//! | [`Capability::ViewUploadPage`] | authenticated, manager or admin |
//! | [`Capability::UploadDocuments`] | authenticated, manager or admin |
//! | [`Capability::SeeUploadNav`] | manager or admin |

use std::fmt;

use deer_hub_core::{Role, Session};

use crate::pages::Page;

/// Roles allowed to manage shared documents.
pub const MANAGER_ROLES: &[Role] = &[Role::Manager, Role::Admin];

pub const LOGIN_REQUIRED: &str = "Please login to access this feature";
pub const LOGIN_REQUIRED_FOR_LEAVE: &str = "Please login to access leave request";
pub const MANAGERS_ONLY: &str = "This feature is only available to managers";

/// A gated page view or action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ViewLeavePage,
    ViewUploadPage,
    SeeUploadNav,
    SubmitLeave,
    UploadDocuments,
}

impl Capability {
    /// Capability required to open `page`, if the page is gated.
    #[must_use]
    pub const fn for_page(page: Page) -> Option<Self> {
        match page {
            Page::Leave => Some(Self::ViewLeavePage),
            Page::Upload => Some(Self::ViewUploadPage),
            Page::Home | Page::Login => None,
        }
    }
}

/// Why a capability was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenyReason {
    /// No active session.
    NotAuthenticated,
    /// Active session without an allowed role.
    InsufficientRole,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => f.write_str("must log in"),
            Self::InsufficientRole => f.write_str("insufficient role"),
        }
    }
}

/// A denied capability and the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denial {
    pub reason: DenyReason,
    pub message: &'static str,
}

impl Denial {
    /// Where the user is sent after being denied.
    ///
    /// Unauthenticated users go to the login page; users lacking a role
    /// stay where they are.
    #[must_use]
    pub const fn redirect(&self) -> Option<Page> {
        match self.reason {
            DenyReason::NotAuthenticated => Some(Page::Login),
            DenyReason::InsufficientRole => None,
        }
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// The denial, if any.
    #[must_use]
    pub const fn denial(&self) -> Option<&Denial> {
        match self {
            Self::Allow => None,
            Self::Deny(denial) => Some(denial),
        }
    }

    const fn not_authenticated(message: &'static str) -> Self {
        Self::Deny(Denial {
            reason: DenyReason::NotAuthenticated,
            message,
        })
    }
}

/// Maps sessions to access decisions.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    upload_roles: &'static [Role],
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(MANAGER_ROLES)
    }
}

impl AccessPolicy {
    /// Create a policy granting document management to `upload_roles`.
    #[must_use]
    pub const fn new(upload_roles: &'static [Role]) -> Self {
        Self { upload_roles }
    }

    /// Allow any active session.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn require_authenticated(&self, session: Option<&Session>) -> Decision {
        match session.and_then(Session::active_role) {
            Some(_) => Decision::Allow,
            None => Decision::not_authenticated(LOGIN_REQUIRED),
        }
    }

    /// Allow an active session whose role is in `allowed`.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn require_role(&self, session: Option<&Session>, allowed: &[Role]) -> Decision {
        match session.and_then(Session::active_role) {
            None => Decision::not_authenticated(LOGIN_REQUIRED),
            Some(role) if allowed.contains(&role) => Decision::Allow,
            Some(_) => Decision::Deny(Denial {
                reason: DenyReason::InsufficientRole,
                message: MANAGERS_ONLY,
            }),
        }
    }

    /// Decide whether `session` may use `capability`.
    #[must_use]
    pub fn check(&self, session: Option<&Session>, capability: Capability) -> Decision {
        match capability {
            Capability::ViewLeavePage => match self.require_authenticated(session) {
                Decision::Allow => Decision::Allow,
                Decision::Deny(_) => Decision::not_authenticated(LOGIN_REQUIRED_FOR_LEAVE),
            },
            Capability::SubmitLeave => self.require_authenticated(session),
            Capability::ViewUploadPage
            | Capability::UploadDocuments
            | Capability::SeeUploadNav => self.require_role(session, self.upload_roles),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use deer_hub_core::Email;

    use super::*;

    fn session(role: Role) -> Session {
        Session::new(
            "Someone",
            Email::parse("someone@deer.com").unwrap(),
            role,
            Utc.with_ymd_and_hms(2025, 6, 16, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_require_authenticated() {
        let policy = AccessPolicy::default();
        assert!(policy.require_authenticated(Some(&session(Role::Employee))).is_allowed());

        let denied = policy.require_authenticated(None);
        let denial = denied.denial().unwrap();
        assert_eq!(denial.reason, DenyReason::NotAuthenticated);
        assert_eq!(denial.reason.to_string(), "must log in");
        assert_eq!(denial.redirect(), Some(Page::Login));
    }

    #[test]
    fn test_logged_out_session_is_unauthenticated() {
        let policy = AccessPolicy::default();
        let mut s = session(Role::Admin);
        s.is_logged_in = false;
        assert_eq!(
            policy.require_role(Some(&s), MANAGER_ROLES).denial().unwrap().reason,
            DenyReason::NotAuthenticated
        );
    }

    #[test]
    fn test_require_role_denies_every_role_outside_set() {
        let policy = AccessPolicy::default();
        for role in Role::ALL {
            let decision = policy.require_role(Some(&session(role)), MANAGER_ROLES);
            if role.is_manager_or_admin() {
                assert!(decision.is_allowed(), "{role} should be allowed");
            } else {
                let denial = decision.denial().unwrap();
                assert_eq!(denial.reason, DenyReason::InsufficientRole);
                assert_eq!(denial.message, "This feature is only available to managers");
                assert_eq!(denial.redirect(), None);
            }
        }
    }

    #[test]
    fn test_leave_page_message() {
        let policy = AccessPolicy::default();
        let decision = policy.check(None, Capability::ViewLeavePage);
        assert_eq!(
            decision.denial().unwrap().message,
            "Please login to access leave request"
        );
        assert!(
            policy
                .check(Some(&session(Role::Employee)), Capability::ViewLeavePage)
                .is_allowed()
        );
    }

    #[test]
    fn test_capability_table() {
        let policy = AccessPolicy::default();
        let employee = session(Role::Employee);
        let manager = session(Role::Manager);
        let admin = session(Role::Admin);

        for capability in [
            Capability::ViewUploadPage,
            Capability::UploadDocuments,
            Capability::SeeUploadNav,
        ] {
            assert!(!policy.check(None, capability).is_allowed());
            assert!(!policy.check(Some(&employee), capability).is_allowed());
            assert!(policy.check(Some(&manager), capability).is_allowed());
            assert!(policy.check(Some(&admin), capability).is_allowed());
        }

        assert!(policy.check(Some(&employee), Capability::SubmitLeave).is_allowed());
        assert!(!policy.check(None, Capability::SubmitLeave).is_allowed());
    }

    #[test]
    fn test_capability_for_page() {
        assert_eq!(Capability::for_page(Page::Leave), Some(Capability::ViewLeavePage));
        assert_eq!(Capability::for_page(Page::Upload), Some(Capability::ViewUploadPage));
        assert_eq!(Capability::for_page(Page::Home), None);
        assert_eq!(Capability::for_page(Page::Login), None);
    }
}

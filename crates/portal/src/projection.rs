//! UI projection.
//!
//! Derives everything the page chrome shows from the current session:
//! which navbar controls are visible, the hero call-to-action and the quick
//! action cards. The projection is a pure function of the session and holds
//! no state of its own, so re-projecting the same session yields the same
//! output.

use deer_hub_core::{Role, Session};
use serde::Serialize;

use crate::pages::Page;
use crate::policy::{AccessPolicy, Capability};

/// Coarse UI state derived from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// No active session.
    Guest,
    Employee,
    ManagerOrAdmin,
}

impl ViewState {
    /// Derive the state for `session`.
    #[must_use]
    pub fn from_session(session: Option<&Session>) -> Self {
        match session.and_then(Session::active_role) {
            None => Self::Guest,
            Some(Role::Employee) => Self::Employee,
            Some(Role::Manager | Role::Admin) => Self::ManagerOrAdmin,
        }
    }

    /// Quick action cards shown on the home page for this state.
    #[must_use]
    pub const fn quick_actions(self) -> &'static [QuickAction] {
        match self {
            Self::Guest => GUEST_ACTIONS,
            Self::Employee => EMPLOYEE_ACTIONS,
            Self::ManagerOrAdmin => MANAGER_ACTIONS,
        }
    }
}

/// What happens when a control is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ActionTarget {
    /// Go to a page.
    Navigate(Page),
    /// Show an informational notice.
    Notice(&'static str),
}

/// A quick action card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub target: ActionTarget,
}

const fn action(
    icon: &'static str,
    title: &'static str,
    description: &'static str,
    target: ActionTarget,
) -> QuickAction {
    QuickAction {
        icon,
        title,
        description,
        target,
    }
}

const REQUEST_LEAVE: QuickAction = action(
    "fas fa-calendar-alt",
    "Request Leave",
    "Submit leave application",
    ActionTarget::Navigate(Page::Leave),
);

const GUEST_ACTIONS: &[QuickAction] = &[
    action(
        "fas fa-sign-in-alt",
        "Login",
        "Access your account",
        ActionTarget::Navigate(Page::Login),
    ),
    action(
        "fas fa-info-circle",
        "Learn More",
        "Discover our features",
        ActionTarget::Notice("Feature overview coming soon!"),
    ),
];

const EMPLOYEE_ACTIONS: &[QuickAction] = &[
    REQUEST_LEAVE,
    action(
        "fas fa-user",
        "My Profile",
        "View and edit profile",
        ActionTarget::Notice("Profile page coming soon!"),
    ),
    action(
        "fas fa-history",
        "Leave History",
        "View past requests",
        ActionTarget::Notice("Leave history coming soon!"),
    ),
];

const MANAGER_ACTIONS: &[QuickAction] = &[
    REQUEST_LEAVE,
    action(
        "fas fa-cloud-upload-alt",
        "Upload Documents",
        "Manage team resources",
        ActionTarget::Navigate(Page::Upload),
    ),
    action(
        "fas fa-users",
        "Team Management",
        "Manage team members",
        ActionTarget::Notice("Team management coming soon!"),
    ),
    action(
        "fas fa-chart-bar",
        "Analytics",
        "View team insights",
        ActionTarget::Notice("Analytics dashboard coming soon!"),
    ),
];

/// Navbar visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavProjection {
    /// "Login" link.
    pub show_auth_link: bool,
    /// Profile dropdown with the user's name and logout.
    pub show_profile: bool,
    pub user_name: Option<String>,
    pub show_leave: bool,
    pub show_upload: bool,
}

/// Hero call-to-action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeroCta {
    pub label: &'static str,
    pub target: ActionTarget,
}

/// Render instructions for the page chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub state: ViewState,
    pub nav: NavProjection,
    pub hero: HeroCta,
    pub quick_actions: &'static [QuickAction],
}

/// Project `session` into render instructions.
#[must_use]
pub fn project(session: Option<&Session>, policy: &AccessPolicy) -> Projection {
    let state = ViewState::from_session(session);
    let logged_in = state != ViewState::Guest;

    let nav = NavProjection {
        show_auth_link: !logged_in,
        show_profile: logged_in,
        user_name: session.filter(|_| logged_in).map(|s| s.name.clone()),
        show_leave: logged_in,
        show_upload: policy
            .check(session, Capability::SeeUploadNav)
            .is_allowed(),
    };

    let hero = if logged_in {
        HeroCta {
            label: "Go to Dashboard",
            target: ActionTarget::Notice("Dashboard feature coming soon!"),
        }
    } else {
        HeroCta {
            label: "Get Started",
            target: ActionTarget::Navigate(Page::Login),
        }
    };

    Projection {
        state,
        nav,
        hero,
        quick_actions: state.quick_actions(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use deer_hub_core::Email;

    use super::*;

    fn session(name: &str, role: Role) -> Session {
        Session::new(
            name,
            Email::parse("someone@deer.com").unwrap(),
            role,
            Utc.with_ymd_and_hms(2025, 6, 16, 9, 0, 0).unwrap(),
        )
    }

    fn titles(projection: &Projection) -> Vec<&'static str> {
        projection.quick_actions.iter().map(|a| a.title).collect()
    }

    #[test]
    fn test_guest_projection() {
        let p = project(None, &AccessPolicy::default());
        assert_eq!(p.state, ViewState::Guest);
        assert!(p.nav.show_auth_link);
        assert!(!p.nav.show_profile);
        assert!(!p.nav.show_leave);
        assert!(!p.nav.show_upload);
        assert_eq!(p.nav.user_name, None);
        assert_eq!(p.hero.label, "Get Started");
        assert_eq!(p.hero.target, ActionTarget::Navigate(Page::Login));
        assert_eq!(titles(&p), vec!["Login", "Learn More"]);
    }

    #[test]
    fn test_employee_projection() {
        let s = session("John Employee", Role::Employee);
        let p = project(Some(&s), &AccessPolicy::default());
        assert_eq!(p.state, ViewState::Employee);
        assert!(!p.nav.show_auth_link);
        assert!(p.nav.show_profile);
        assert_eq!(p.nav.user_name.as_deref(), Some("John Employee"));
        assert!(p.nav.show_leave);
        assert!(!p.nav.show_upload);
        assert_eq!(p.hero.label, "Go to Dashboard");
        assert_eq!(titles(&p), vec!["Request Leave", "My Profile", "Leave History"]);
    }

    #[test]
    fn test_manager_and_admin_share_projection() {
        let policy = AccessPolicy::default();
        for role in [Role::Manager, Role::Admin] {
            let s = session("Boss", role);
            let p = project(Some(&s), &policy);
            assert_eq!(p.state, ViewState::ManagerOrAdmin);
            assert!(p.nav.show_upload);
            assert_eq!(
                titles(&p),
                vec!["Request Leave", "Upload Documents", "Team Management", "Analytics"]
            );
        }
    }

    #[test]
    fn test_logged_out_session_projects_as_guest() {
        let mut s = session("Jane Manager", Role::Manager);
        s.is_logged_in = false;
        let p = project(Some(&s), &AccessPolicy::default());
        assert_eq!(p.state, ViewState::Guest);
        assert_eq!(p.nav.user_name, None);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let policy = AccessPolicy::default();
        let s = session("Jane Manager", Role::Manager);
        assert_eq!(project(Some(&s), &policy), project(Some(&s), &policy));
        assert_eq!(project(None, &policy), project(None, &policy));
    }
}

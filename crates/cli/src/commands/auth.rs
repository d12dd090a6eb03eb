//! Session commands.

use deer_hub_portal::Command;
use deer_hub_portal::auth::{LoginForm, RegistrationForm};
use serde::Serialize;

use super::{CliError, CliPortal, Output};

/// Sign in with a demo account.
///
/// # Errors
///
/// Returns an error if the credentials are rejected or the session cannot be saved.
pub async fn login(portal: &mut CliPortal, out: &Output, form: LoginForm) -> Result<(), CliError> {
    let outcome = portal.dispatch(Command::Login(form)).await;
    out.outcome(&outcome)
}

/// Register and sign in.
///
/// # Errors
///
/// Returns an error if the form is invalid or the session cannot be saved.
pub async fn register(
    portal: &mut CliPortal,
    out: &Output,
    form: RegistrationForm,
) -> Result<(), CliError> {
    let outcome = portal.dispatch(Command::Register(form)).await;
    out.outcome(&outcome)
}

/// Sign out.
///
/// # Errors
///
/// Returns an error if the session cannot be cleared.
pub async fn logout(portal: &mut CliPortal, out: &Output) -> Result<(), CliError> {
    let outcome = portal.dispatch(Command::Logout).await;
    out.outcome(&outcome)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WhoAmI<'a> {
    session: Option<&'a deer_hub_core::Session>,
    projection: &'a deer_hub_portal::projection::Projection,
}

/// Show who is signed in and what the portal would render for them.
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
pub fn whoami(portal: &CliPortal, out: &Output) -> Result<(), CliError> {
    let session = portal.session();
    let projection = portal.projection();
    let report = WhoAmI {
        session: session.as_ref(),
        projection: &projection,
    };

    out.emit(&report, |report| {
        match report.session {
            Some(session) => println!("{} <{}> ({})", session.name, session.email, session.role),
            None => println!("Not signed in"),
        }
        let nav = &report.projection.nav;
        println!("View: {:?}", report.projection.state);
        println!(
            "Navbar: login={} profile={} leave={} upload={}",
            nav.show_auth_link, nav.show_profile, nav.show_leave, nav.show_upload
        );
        println!("Hero: {}", report.projection.hero.label);
        println!("Quick actions:");
        for action in report.projection.quick_actions {
            println!("  {} - {}", action.title, action.description);
        }
    })
}

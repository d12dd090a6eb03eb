//! State kept in file stores survives reopening the portal.

use chrono::{Days, Utc};
use deer_hub_core::Role;
use deer_hub_integration_tests::annual_leave;
use deer_hub_portal::auth::{LoginForm, MOCK_PASSWORD};
use deer_hub_portal::config::PortalConfig;
use deer_hub_portal::storage::keys;
use deer_hub_portal::{Command, Portal};

fn config(dir: &tempfile::TempDir) -> PortalConfig {
    PortalConfig {
        data_dir: dir.path().to_path_buf(),
        simulate_latency: false,
        ..PortalConfig::default()
    }
}

#[tokio::test]
async fn test_session_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);

    let mut portal = Portal::open(&config).unwrap();
    let outcome = portal
        .dispatch(Command::Login(LoginForm::new("admin@deer.com", MOCK_PASSWORD)))
        .await;
    assert!(outcome.success);
    assert!(
        config
            .session_dir()
            .join(format!("{}.json", keys::SESSION))
            .exists()
    );

    let mut reopened = Portal::open(&config).unwrap();
    let session = reopened.session().unwrap();
    assert_eq!(session.role, Role::Admin);
    assert_eq!(session.email.as_str(), "admin@deer.com");

    reopened.dispatch(Command::Logout).await;
    assert!(Portal::open(&config).unwrap().session().is_none());
}

#[tokio::test]
async fn test_leave_requests_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let start = Utc::now().date_naive() + Days::new(30);
    let end = start + Days::new(1);

    let mut portal = Portal::open(&config).unwrap();
    portal
        .dispatch(Command::Login(LoginForm::new("employee@deer.com", MOCK_PASSWORD)))
        .await;
    let outcome = portal
        .dispatch(Command::SubmitLeave(annual_leave(
            &start.to_string(),
            &end.to_string(),
        )))
        .await;
    assert!(outcome.success);

    let reopened = Portal::open(&config).unwrap();
    let requests = reopened.leave_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].start_date, start);
    assert_eq!(requests[0].duration, 2);
}

#[tokio::test]
async fn test_corrupt_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let portal = Portal::open(&config).unwrap();

    std::fs::write(
        config.local_dir().join(format!("{}.json", keys::DOCUMENTS)),
        "[{\"broken\":",
    )
    .unwrap();
    assert!(portal.documents().is_empty());
}

#[tokio::test]
async fn test_quota_from_config_applies_to_stores() {
    let dir = tempfile::tempdir().unwrap();
    let config = PortalConfig {
        storage_quota_bytes: Some(16),
        ..config(&dir)
    };

    let mut portal = Portal::open(&config).unwrap();
    let outcome = portal
        .dispatch(Command::Login(LoginForm::new("manager@deer.com", MOCK_PASSWORD)))
        .await;
    assert!(!outcome.success);
    assert!(portal.session().is_none());
}

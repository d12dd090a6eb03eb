//! Leave submission and drafts, end to end.

use deer_hub_core::{LeaveStatus, LeaveType, Priority};
use deer_hub_integration_tests::{TestContext, annual_leave, now};
use deer_hub_portal::Command;
use deer_hub_portal::forms::FileSelection;
use deer_hub_portal::leave::{self, LeaveForm};
use deer_hub_portal::notify::Level;
use deer_hub_portal::pages::Page;
use deer_hub_portal::storage::{KeyValueStore, MemoryStore, keys};

#[tokio::test]
async fn test_reversed_dates_rejected_before_any_write() {
    let mut ctx = TestContext::new();
    ctx.login("employee@deer.com").await;

    let outcome = ctx
        .portal
        .dispatch(Command::SubmitLeave(annual_leave("2025-07-10", "2025-07-08")))
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.field_errors.get("endDate"), Some(leave::END_BEFORE_START));
    assert!(ctx.local_store.get_item(keys::LEAVE_REQUESTS).unwrap().is_none());
    assert!(ctx.local_store.is_empty());
}

#[tokio::test]
async fn test_submitted_request_is_stored_newest_first() {
    let mut ctx = TestContext::new();
    ctx.login("employee@deer.com").await;

    for (start, end) in [("2025-07-01", "2025-07-01"), ("2025-08-04", "2025-08-06")] {
        let outcome = ctx
            .portal
            .dispatch(Command::SubmitLeave(annual_leave(start, end)))
            .await;
        assert!(outcome.success, "{start}");
    }

    let requests = ctx.portal.leave_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].start_date.to_string(), "2025-08-04");
    assert_eq!(requests[0].duration, 3);
    assert_eq!(requests[0].duration_label(), "3 days");
    assert_eq!(requests[1].duration_label(), "1 day");
    assert_eq!(requests[0].status, LeaveStatus::Pending);
    assert_eq!(requests[0].employee_email, "employee@deer.com");
    assert_eq!(requests[0].submission_date, now());

    let raw = ctx.local_store.get_item(keys::LEAVE_REQUESTS).unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0]["employeeName"], "John Employee");
    assert_eq!(stored[0]["leaveType"], "annual");
    assert_eq!(stored[0]["status"], "pending");
}

#[tokio::test]
async fn test_long_leave_needs_emergency_contact() {
    let mut ctx = TestContext::new();
    ctx.login("employee@deer.com").await;

    let mut form = annual_leave("2025-07-01", "2025-07-10");
    assert!(form.needs_emergency_contact());
    let outcome = ctx.portal.dispatch(Command::SubmitLeave(form.clone())).await;
    assert!(outcome.field_errors.get("emergencyContact").is_some());

    form.emergency_contact = "Mary Employee, 555-0100".to_owned();
    let outcome = ctx.portal.dispatch(Command::SubmitLeave(form)).await;
    assert!(outcome.success);
    assert_eq!(
        ctx.portal.leave_requests()[0].emergency_contact.as_deref(),
        Some("Mary Employee, 555-0100")
    );
}

#[tokio::test]
async fn test_past_start_rejected() {
    let mut ctx = TestContext::new();
    ctx.login("manager@deer.com").await;

    let outcome = ctx
        .portal
        .dispatch(Command::SubmitLeave(annual_leave("2025-06-15", "2025-06-17")))
        .await;
    assert_eq!(outcome.field_errors.get("startDate"), Some(leave::START_IN_PAST));
    assert!(ctx.portal.leave_requests().is_empty());
}

#[tokio::test]
async fn test_guest_submission_redirects_to_login() {
    let mut ctx = TestContext::new();
    let outcome = ctx
        .portal
        .dispatch(Command::SubmitLeave(annual_leave("2025-07-01", "2025-07-02")))
        .await;
    assert_eq!(outcome.redirect, Some(Page::Login));
    assert!(ctx.local_store.is_empty());
}

#[tokio::test]
async fn test_sick_leave_suggests_high_priority() {
    let mut ctx = TestContext::new();
    ctx.login("employee@deer.com").await;

    let mut form = LeaveForm::new();
    form.select_leave_type(LeaveType::Sick);
    form.start_date = "2025-06-16".to_owned();
    form.end_date = "2025-06-17".to_owned();
    form.set_reason("Flu");
    form.attach(vec![FileSelection::new("note.pdf", 120_000, "application/pdf")])
        .unwrap();

    let outcome = ctx.portal.dispatch(Command::SubmitLeave(form)).await;
    assert!(outcome.success);
    let request = &ctx.portal.leave_requests()[0];
    assert_eq!(request.priority, Priority::High);
    assert_eq!(request.supporting_docs, 1);
}

#[tokio::test]
async fn test_draft_is_kept_apart_from_requests() {
    let mut ctx = TestContext::new();
    ctx.login("employee@deer.com").await;

    let mut form = annual_leave("2025-07-01", "not a date");
    form.emergency_contact = "Mary".to_owned();
    let outcome = ctx.portal.dispatch(Command::SaveLeaveDraft(form.clone())).await;
    assert!(outcome.success);

    let draft = ctx.portal.load_leave_draft().unwrap();
    assert_eq!(draft.status, LeaveStatus::Draft);
    assert_eq!(draft.duration, 0);
    assert_eq!(LeaveForm::from_draft(&draft), form);
    assert!(ctx.local_store.get_item(keys::LEAVE_REQUESTS).unwrap().is_none());
}

#[tokio::test]
async fn test_full_store_reports_failure() {
    let mut ctx = TestContext::with_stores(MemoryStore::new(), MemoryStore::with_quota(32));
    ctx.login("employee@deer.com").await;

    let outcome = ctx
        .portal
        .dispatch(Command::SubmitLeave(annual_leave("2025-07-01", "2025-07-02")))
        .await;
    assert!(!outcome.success);
    assert_eq!(outcome.notifications[0].level, Level::Error);
    assert_eq!(outcome.notifications[0].message, leave::SUBMIT_FAILED);
    assert!(ctx.portal.leave_requests().is_empty());
}

#[tokio::test]
async fn test_submit_keeps_records_it_cannot_read() {
    let mut ctx = TestContext::new();
    let legacy = serde_json::json!([{
        "id": 1_718_000_000_000_u64,
        "employeeName": "John Employee",
        "employeeEmail": "employee@deer.com",
        "leaveType": "annual",
        "priority": "low",
        "startDate": "2025-05-01",
        "endDate": "2025-05-02",
        "reason": "Old request",
        "status": "approved",
        "submissionDate": "2025-04-20T08:00:00Z",
        "duration": 2
    }]);
    ctx.local_store
        .set_item(keys::LEAVE_REQUESTS, &legacy.to_string())
        .unwrap();
    ctx.login("employee@deer.com").await;

    let outcome = ctx
        .portal
        .dispatch(Command::SubmitLeave(annual_leave("2025-07-01", "2025-07-02")))
        .await;
    assert!(outcome.success);

    let raw = ctx.local_store.get_item(keys::LEAVE_REQUESTS).unwrap().unwrap();
    let stored: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0]["startDate"], "2025-07-01");
    assert_eq!(stored[1]["priority"], "low");
    assert_eq!(stored[1]["reason"], "Old request");

    // Only the readable request is listed.
    assert_eq!(ctx.portal.leave_requests().len(), 1);
}

#[tokio::test]
async fn test_submit_refuses_to_overwrite_corrupt_list() {
    let mut ctx = TestContext::new();
    ctx.local_store.set_item(keys::LEAVE_REQUESTS, "{corrupt").unwrap();
    ctx.login("employee@deer.com").await;

    let outcome = ctx
        .portal
        .dispatch(Command::SubmitLeave(annual_leave("2025-07-01", "2025-07-02")))
        .await;
    assert!(!outcome.success);
    assert_eq!(outcome.notifications[0].message, leave::SUBMIT_FAILED);
    assert_eq!(
        ctx.local_store.get_item(keys::LEAVE_REQUESTS).unwrap().as_deref(),
        Some("{corrupt")
    );
}

//! Scenario tests for the DEER Hub portal.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p deer-hub-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `access_scenarios` - Sign-in, page gating and the UI projection
//! - `leave_scenarios` - Leave submission and drafts
//! - `upload_scenarios` - Document upload and the library
//! - `file_persistence` - State surviving across portals over file stores
//!
//! Scenarios run against in-memory stores through [`TestContext`], with no
//! simulated delays and the clock frozen at [`now`].

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use deer_hub_portal::auth::{LoginForm, MOCK_PASSWORD};
use deer_hub_portal::clock::FixedClock;
use deer_hub_portal::latency::RecordingLatency;
use deer_hub_portal::leave::LeaveForm;
use deer_hub_portal::storage::MemoryStore;
use deer_hub_portal::{Command, Outcome, Portal};

/// A portal over shared in-memory stores.
pub type TestPortal = Portal<Arc<MemoryStore>, Arc<RecordingLatency>>;

/// Instant every scenario runs at: Monday 2025-06-16 09:00 UTC.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 16, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Calendar date of [`now`].
#[must_use]
pub fn today() -> NaiveDate {
    now().date_naive()
}

/// A portal plus handles on everything it was built from.
pub struct TestContext {
    pub portal: TestPortal,
    pub session_store: Arc<MemoryStore>,
    pub local_store: Arc<MemoryStore>,
    pub latency: Arc<RecordingLatency>,
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        Self::with_stores(MemoryStore::new(), MemoryStore::new())
    }

    /// Build a context over the given stores, e.g. ones with a quota.
    #[must_use]
    pub fn with_stores(session_store: MemoryStore, local_store: MemoryStore) -> Self {
        let session_store = Arc::new(session_store);
        let local_store = Arc::new(local_store);
        let latency = Arc::new(RecordingLatency::new());
        let portal = Portal::new(
            Arc::clone(&session_store),
            Arc::clone(&local_store),
            Arc::clone(&latency),
            Arc::new(FixedClock(now())),
        );
        Self {
            portal,
            session_store,
            local_store,
            latency,
        }
    }

    /// Sign in with a demo account and the demo password.
    pub async fn login(&mut self, email: &str) -> Outcome {
        self.portal
            .dispatch(Command::Login(LoginForm::new(email, MOCK_PASSWORD)))
            .await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete annual leave form for the given dates.
#[must_use]
pub fn annual_leave(start: &str, end: &str) -> LeaveForm {
    let mut form = LeaveForm::new();
    form.select_leave_type(deer_hub_core::LeaveType::Annual);
    form.start_date = start.to_owned();
    form.end_date = end.to_owned();
    form.set_reason("Summer holiday");
    form
}

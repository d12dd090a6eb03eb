//! Simulated processing delays.
//!
//! The portal has no backend, but its flows pause as if one answered:
//! login waits before checking credentials, leave submission before saving,
//! and uploads tick a progress bar. All such pauses go through [`Latency`]
//! so that tests can run them instantly and assert on what was requested.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// A named pause in a portal flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delay {
    /// Between pressing "Sign in" and the credential check.
    Login,
    /// Between pressing "Register" and creating the session.
    Register,
    /// Between the registration notice and redirecting home.
    RegisterRedirect,
    /// Between submitting a leave request and saving it.
    LeaveSubmit,
    /// One step of the upload progress bar.
    UploadTick,
    /// Between the progress bar reaching 100% and saving documents.
    UploadFinalize,
}

impl Delay {
    /// Duration the pause lasts when latency is simulated.
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            Self::Login => Duration::from_millis(1500),
            Self::Register | Self::LeaveSubmit => Duration::from_millis(2000),
            Self::RegisterRedirect => Duration::from_millis(1000),
            Self::UploadTick => Duration::from_millis(200),
            Self::UploadFinalize => Duration::from_millis(500),
        }
    }
}

/// Boundary for simulated latency.
pub trait Latency: Send + Sync {
    /// Wait for `delay`.
    fn pause(&self, delay: Delay) -> impl Future<Output = ()> + Send;
}

/// Sleeps on the tokio timer for each delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedLatency {
    enabled: bool,
}

impl SimulatedLatency {
    /// Create a latency source. When `enabled` is false every pause returns
    /// immediately.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Latency for SimulatedLatency {
    async fn pause(&self, delay: Delay) {
        if self.enabled {
            tokio::time::sleep(delay.duration()).await;
        }
    }
}

/// Returns immediately and remembers which pauses were requested.
#[derive(Debug, Default)]
pub struct RecordingLatency {
    pauses: Mutex<Vec<Delay>>,
}

impl RecordingLatency {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pauses requested so far, in order.
    #[must_use]
    pub fn pauses(&self) -> Vec<Delay> {
        self.pauses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Latency for RecordingLatency {
    async fn pause(&self, delay: Delay) {
        self.pauses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(delay);
    }
}

impl<L: Latency> Latency for std::sync::Arc<L> {
    fn pause(&self, delay: Delay) -> impl Future<Output = ()> + Send {
        (**self).pause(delay)
    }
}

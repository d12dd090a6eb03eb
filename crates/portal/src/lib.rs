//! DEER Hub portal library.
//!
//! Everything behind the portal's pages lives here, free of any rendering
//! layer so it can be driven from the CLI or from tests:
//! - Session persistence and the role-based access policy
//! - Form validation for sign-in, registration, leave and uploads
//! - The UI projection (navigation, hero, quick actions) per session
//! - The announcement ticker and home page chrome
//!
//! # Architecture
//!
//! A [`Portal`] is built from its dependencies: a session store, a local
//! store, a [`Latency`](latency::Latency) source and a [`Clock`](clock::Clock).
//! Production code opens file stores with [`Portal::open`]; tests use
//! [`MemoryStore`](storage::MemoryStore), [`RecordingLatency`](latency::RecordingLatency)
//! and [`FixedClock`](clock::FixedClock).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod chrome;
pub mod clock;
pub mod config;
pub mod error;
pub mod forms;
pub mod latency;
pub mod leave;
pub mod notify;
pub mod pages;
pub mod policy;
mod portal;
pub mod projection;
pub mod session;
pub mod storage;
pub mod ticker;
pub mod upload;

pub use config::PortalConfig;
pub use error::PortalError;
pub use portal::{Command, Outcome, Portal};

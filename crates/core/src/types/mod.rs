//! Core types for DEER Hub.
//!
//! This module provides type-safe wrappers and records for the portal's
//! persisted state.

pub mod announcement;
pub mod document;
pub mod email;
pub mod id;
pub mod leave;
pub mod session;
pub mod status;

pub use announcement::Announcement;
pub use document::{Document, PLACEHOLDER_DOWNLOAD_URL};
pub use email::{Email, EmailError};
pub use id::*;
pub use leave::{LeaveDraft, LeaveRequest, day_label};
pub use session::Session;
pub use status::*;

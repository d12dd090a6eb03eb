//! DEER Hub Core - Shared types library.
//!
//! This crate provides the records persisted by the DEER Hub portal and the
//! value types they are built from:
//! - `portal` - Session, access policy, forms and page state
//! - `cli` - Command-line front end over file-backed storage
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no clock.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Sessions, leave requests, documents, announcements, IDs,
//!   emails, roles and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Session store.
//!
//! Holds at most one [`Session`] under [`keys::SESSION`] in the
//! session-scoped store. Every operation fails soft: reads fall back to "no
//! session" and writes report success as a boolean, so the caller decides
//! what to tell the user.

use deer_hub_core::Session;

use crate::storage::{KeyValueStore, keys, read_json, write_json};

/// Reads and writes the current login session.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Create a session store over `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored session, or `None` if absent or unreadable.
    pub fn get(&self) -> Option<Session> {
        match read_json::<Session, _>(&self.store, keys::SESSION) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Error reading session");
                None
            }
        }
    }

    /// Persist `session`, replacing any existing one.
    ///
    /// Returns false if the session could not be written.
    pub fn save(&self, session: &Session) -> bool {
        match write_json(&self.store, keys::SESSION, session) {
            Ok(()) => {
                tracing::debug!(email = %session.email, role = %session.role, "Session saved");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error saving session");
                false
            }
        }
    }

    /// Remove the stored session.
    ///
    /// Returns false if the session could not be removed.
    pub fn clear(&self) -> bool {
        match self.store.remove_item(keys::SESSION) {
            Ok(()) => {
                tracing::debug!("Session cleared");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error clearing session");
                false
            }
        }
    }
}

//! Subcommand implementations.
//!
//! Every command runs against a portal opened over the file stores, prints
//! what the portal reported and fails when the portal did not complete the
//! request.

pub mod auth;
pub mod docs;
pub mod home;
pub mod leave;

use std::path::PathBuf;

use deer_hub_portal::Outcome;
use deer_hub_portal::Portal;
use deer_hub_portal::latency::SimulatedLatency;
use deer_hub_portal::storage::FileStore;
use serde::Serialize;
use thiserror::Error;

/// The portal as the CLI opens it.
pub type CliPortal = Portal<FileStore, SimulatedLatency>;

/// Errors that end a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The portal rejected or could not finish the request.
    #[error("Request was not completed")]
    NotCompleted,

    /// A file named on the command line could not be read.
    #[error("Could not read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Files were refused by the form's size and type rules.
    #[error("{}", .0.join("; "))]
    InvalidFiles(Vec<String>),

    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    #[error("Could not encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where command results are printed.
pub struct Output {
    json: bool,
}

impl Output {
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print `value` as JSON, or through `render` in text mode.
    pub fn emit<T: Serialize + ?Sized>(
        &self,
        value: &T,
        render: impl FnOnce(&T),
    ) -> Result<(), CliError> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            render(value);
        }
        Ok(())
    }

    /// Print a command outcome and turn a failed one into an error.
    pub fn outcome(&self, outcome: &Outcome) -> Result<(), CliError> {
        self.emit(outcome, |outcome| {
            for notification in &outcome.notifications {
                println!("[{}] {}", notification.level, notification.message);
            }
            for error in outcome.field_errors.iter() {
                println!("  {}: {}", error.field, error.message);
            }
            if let Some(page) = outcome.redirect {
                println!("-> {page} ({})", page.path());
            }
        })?;

        if outcome.success {
            Ok(())
        } else {
            Err(CliError::NotCompleted)
        }
    }
}

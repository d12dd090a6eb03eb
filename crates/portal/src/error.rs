//! Errors raised while setting up a portal.
//!
//! Once a portal is running nothing is fatal: flows report problems as
//! notifications. These errors only cover loading configuration and opening
//! the stores.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum PortalError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A store could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

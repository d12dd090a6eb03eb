//! Portal configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DEER_HUB_DATA_DIR` - Directory holding the session and local stores (default: .deer-hub)
//! - `DEER_HUB_SIMULATE_LATENCY` - Pause like a real backend would (default: true)
//! - `DEER_HUB_LOG_FORMAT` - `text` or `json` (default: text)
//! - `DEER_HUB_STORAGE_QUOTA_BYTES` - Byte limit for each file store (default: unlimited)

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".deer-hub";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("expected 'text' or 'json', got '{s}'")),
        }
    }
}

/// Portal configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Root directory for persisted state
    pub data_dir: PathBuf,
    /// Whether flows pause for simulated processing time
    pub simulate_latency: bool,
    pub log_format: LogFormat,
    /// Byte limit applied to each store
    pub storage_quota_bytes: Option<usize>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            simulate_latency: true,
            log_format: LogFormat::Text,
            storage_quota_bytes: None,
        }
    }
}

impl PortalConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(get_env_or_default(
            &lookup,
            "DEER_HUB_DATA_DIR",
            DEFAULT_DATA_DIR,
        ));
        let simulate_latency = parse_bool(
            "DEER_HUB_SIMULATE_LATENCY",
            &get_env_or_default(&lookup, "DEER_HUB_SIMULATE_LATENCY", "true"),
        )?;
        let log_format = get_env_or_default(&lookup, "DEER_HUB_LOG_FORMAT", "text")
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("DEER_HUB_LOG_FORMAT".to_string(), e))?;
        let storage_quota_bytes = get_optional_env(&lookup, "DEER_HUB_STORAGE_QUOTA_BYTES")
            .map(|v| {
                v.trim().parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "DEER_HUB_STORAGE_QUOTA_BYTES".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            data_dir,
            simulate_latency,
            log_format,
            storage_quota_bytes,
        })
    }

    /// Directory of the session-scoped store.
    #[must_use]
    pub fn session_dir(&self) -> PathBuf {
        self.data_dir.join("session")
    }

    /// Directory of the local store.
    #[must_use]
    pub fn local_dir(&self) -> PathBuf {
        self.data_dir.join("local")
    }
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

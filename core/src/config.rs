//! Resolved configuration types for the Pelican client core
//!
//! Core only accepts fully resolved, validated configuration.
//! All environment variable discovery and flag merging happens in the
//! CLI layer.

use crate::error::{ConfigError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default OSDF federation director
pub const DEFAULT_DIRECTOR_URL: &str = "https://osdf-director.osg-htc.org";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Fully resolved client configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Base URL of the federation director
    pub director_url: String,

    /// Directory holding HTCondor-style credential files
    pub credential_dir: PathBuf,

    /// Total transfer attempts across candidate origins
    pub attempts: u8,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl ResolvedConfig {
    /// Create a new configuration with defaults for the optional knobs
    pub fn new(director_url: impl Into<String>, credential_dir: impl Into<PathBuf>) -> Self {
        Self {
            director_url: director_url.into(),
            credential_dir: credential_dir.into(),
            attempts: 1,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the total transfer attempt count
    pub fn with_attempts(mut self, attempts: u8) -> Self {
        self.attempts = attempts;
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.director_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "director_url".to_string(),
            }
            .into());
        }

        if self.credential_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "credential_dir".to_string(),
            }
            .into());
        }

        if self.attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "attempts".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

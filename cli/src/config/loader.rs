//! CLI configuration loader
//!
//! Resolves flag overrides and environment variables into the fully
//! resolved configuration core expects:
//! 1. Flag overrides (`--director-url`, `--cred-dir`) take priority
//! 2. Environment variables: `_CONDOR_CREDS`, `PELICAN_DIRECTOR_URL`
//! 3. Built-in default for the director (the public OSDF director)

use anyhow::{anyhow, Context, Result};
use pelican_client_core::{ResolvedConfig, DEFAULT_DIRECTOR_URL};
use std::path::PathBuf;

/// Environment variable naming the HTCondor credential directory
const CONDOR_CREDS_ENV: &str = "_CONDOR_CREDS";

/// Environment variable overriding the federation director
const DIRECTOR_URL_ENV: &str = "PELICAN_DIRECTOR_URL";

/// CLI configuration loader
pub struct ConfigLoader {
    /// Flag overrides
    director_override: Option<String>,
    cred_dir_override: Option<PathBuf>,
    attempts: u8,
}

impl ConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            director_override: None,
            cred_dir_override: None,
            attempts: 1,
        }
    }

    /// Set director URL override
    pub fn with_director_override(mut self, director_url: String) -> Self {
        self.director_override = Some(director_url);
        self
    }

    /// Set credential directory override
    pub fn with_cred_dir_override(mut self, cred_dir: PathBuf) -> Self {
        self.cred_dir_override = Some(cred_dir);
        self
    }

    /// Set the total transfer attempt count
    pub fn with_attempts(mut self, attempts: u8) -> Self {
        self.attempts = attempts;
        self
    }

    /// Load and resolve configuration
    pub fn load(&self) -> Result<ResolvedConfig> {
        let credential_dir = match &self.cred_dir_override {
            Some(dir) => dir.clone(),
            None => std::env::var(CONDOR_CREDS_ENV)
                .map(PathBuf::from)
                .map_err(|_| {
                    anyhow!(
                        "credential directory not set: pass --cred-dir or set {}",
                        CONDOR_CREDS_ENV
                    )
                })?,
        };

        let director_url = match &self.director_override {
            Some(url) => url.clone(),
            None => std::env::var(DIRECTOR_URL_ENV)
                .unwrap_or_else(|_| DEFAULT_DIRECTOR_URL.to_string()),
        };

        let config = ResolvedConfig::new(director_url, credential_dir).with_attempts(self.attempts);
        config
            .validate()
            .context("configuration validation failed")?;

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_env() {
        temp_env::with_vars(
            [
                (CONDOR_CREDS_ENV, Some("/tmp/creds")),
                (DIRECTOR_URL_ENV, Some("https://director.example.org")),
            ],
            || {
                let config = ConfigLoader::new().load().unwrap();
                assert_eq!(config.credential_dir, PathBuf::from("/tmp/creds"));
                assert_eq!(config.director_url, "https://director.example.org");
                assert_eq!(config.attempts, 1);
            },
        );
    }

    #[test]
    fn test_load_default_director() {
        temp_env::with_vars(
            [(CONDOR_CREDS_ENV, Some("/tmp/creds")), (DIRECTOR_URL_ENV, None)],
            || {
                let config = ConfigLoader::new().load().unwrap();
                assert_eq!(config.director_url, DEFAULT_DIRECTOR_URL);
            },
        );
    }

    #[test]
    fn test_load_missing_cred_dir() {
        temp_env::with_vars([(CONDOR_CREDS_ENV, None::<&str>)], || {
            assert!(ConfigLoader::new().load().is_err());
        });
    }

    #[test]
    fn test_flag_overrides_beat_env() {
        temp_env::with_vars(
            [
                (CONDOR_CREDS_ENV, Some("/tmp/creds")),
                (DIRECTOR_URL_ENV, Some("https://env.example.org")),
            ],
            || {
                let config = ConfigLoader::new()
                    .with_director_override("https://flag.example.org".to_string())
                    .with_cred_dir_override(PathBuf::from("/flag/creds"))
                    .with_attempts(3)
                    .load()
                    .unwrap();
                assert_eq!(config.director_url, "https://flag.example.org");
                assert_eq!(config.credential_dir, PathBuf::from("/flag/creds"));
                assert_eq!(config.attempts, 3);
            },
        );
    }
}

//! HTCondor credential discovery and selection
//!
//! HTCondor deposits short-lived OAuth-style tokens as `*.use` JSON files
//! in a credential directory. Each token carries a list of scopes of the
//! form `operation:path` (e.g. `storage.read:/icecube/data`) that bound
//! what it may do and where.

use crate::error::{CredentialError, Result};
use crate::transfer::Direction;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// A single credential as written by the HTCondor credmon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    /// The bearer token to present to origins
    pub access_token: String,

    /// Token type, normally `bearer`
    pub token_type: String,

    /// Token lifetime in seconds at issuance
    pub expires_in: u32,

    /// Expiry as fractional epoch seconds
    pub expires_at: f64,

    /// Authorized `operation:path` scopes
    pub scope: Vec<String>,
}

impl Credential {
    /// Whether the credential has passed its expiry time
    pub fn is_expired(&self, now: f64) -> bool {
        self.expires_at <= now
    }

    /// Whether any scope grants one of `operations` on `object_path`
    ///
    /// `object_path` is the object path relative to the federation
    /// namespace, which is the form scope paths are written in.
    fn authorizes(&self, operations: &[&str], object_path: &str) -> bool {
        self.scope.iter().any(|scope| {
            scope
                .split_once(':')
                .is_some_and(|(op, path)| operations.contains(&op) && object_path.starts_with(path))
        })
    }
}

/// All credentials found in a credential directory
#[derive(Debug, Clone)]
pub struct CredentialStore {
    credentials: Vec<Credential>,
}

impl CredentialStore {
    /// Create a store from already-loaded credentials
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self { credentials }
    }

    /// Load every `*.use` file from a credential directory
    ///
    /// Other files in the directory (`.top`, `.meta`, ...) are skipped.
    /// An unreadable or unparsable `.use` file is an error rather than a
    /// silent skip: a job with a broken credential should fail loudly.
    pub async fn load(dir: &Path) -> Result<Self> {
        debug!("reading credential directory: {}", dir.display());

        let mut entries =
            tokio::fs::read_dir(dir)
                .await
                .map_err(|e| CredentialError::DirUnreadable {
                    path: dir.display().to_string(),
                    message: e.to_string(),
                })?;

        let mut credentials = Vec::new();
        while let Some(entry) =
            entries
                .next_entry()
                .await
                .map_err(|e| CredentialError::DirUnreadable {
                    path: dir.display().to_string(),
                    message: e.to_string(),
                })?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("use") {
                continue;
            }

            debug!("reading credential file: {}", path.display());
            let contents = tokio::fs::read_to_string(&path).await?;
            let credential: Credential =
                serde_json::from_str(&contents).map_err(|e| CredentialError::Malformed {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
            debug!("found credential with scopes {:?}", credential.scope);
            credentials.push(credential);
        }

        Ok(Self::new(credentials))
    }

    /// Number of loaded credentials
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Whether the store holds no credentials
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Select the credential authorizing `direction` on `object_path`
    ///
    /// A non-expired match wins. If the only match is expired it is
    /// returned anyway with a warning; the origin is the authority on
    /// whether the token is still usable.
    pub fn select(&self, direction: Direction, object_path: &str) -> Result<&Credential> {
        let operations = direction.required_scopes();
        debug!(
            "selecting credential for scopes {:?} on path {}",
            operations, object_path
        );

        let now = Utc::now().timestamp_micros() as f64 / 1_000_000.0;
        let mut expired = None;
        for credential in &self.credentials {
            if credential.authorizes(operations, object_path) {
                if credential.is_expired(now) {
                    expired = Some(credential);
                } else {
                    return Ok(credential);
                }
            }
        }

        if let Some(credential) = expired {
            warn!("only matching credential is expired; trying it anyway");
            return Ok(credential);
        }

        Err(CredentialError::NoMatch {
            operation: operations.join("|"),
            path: object_path.to_string(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_credential(expires_at: f64) -> Credential {
        Credential {
            access_token: "token".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            expires_at,
            scope: vec![
                "storage.read:/read/scope".to_string(),
                "storage.modify:/write/scope".to_string(),
            ],
        }
    }

    fn now_epoch() -> f64 {
        Utc::now().timestamp_micros() as f64 / 1_000_000.0
    }

    #[tokio::test]
    async fn test_load_from_directory() {
        let dir = tempdir().unwrap();
        let credential = test_credential(now_epoch() + 3600.0);

        let contents = serde_json::to_vec_pretty(&credential).unwrap();
        std::fs::write(dir.path().join("test_cred.use"), &contents).unwrap();
        // Files without the .use extension are skipped
        std::fs::write(dir.path().join("test_cred.top"), b"not json").unwrap();

        let store = CredentialStore::load(dir.path()).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.credentials[0], credential);
    }

    #[tokio::test]
    async fn test_load_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nonexistent");

        let result = CredentialStore::load(&missing).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_malformed_credential() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("broken.use"), b"{not json").unwrap();

        let result = CredentialStore::load(dir.path()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_select_matching_scope() {
        let credential = test_credential(now_epoch() + 3600.0);
        let store = CredentialStore::new(vec![credential.clone()]);

        let selected = store
            .select(Direction::Get, "/read/scope/file.bin")
            .unwrap();
        assert_eq!(selected, &credential);

        // The read scope does not authorize writes
        assert!(store.select(Direction::Put, "/read/scope/file.bin").is_err());
    }

    #[test]
    fn test_select_write_scope() {
        let credential = test_credential(now_epoch() + 3600.0);
        let store = CredentialStore::new(vec![credential.clone()]);

        let selected = store
            .select(Direction::Put, "/write/scope/file.bin")
            .unwrap();
        assert_eq!(selected, &credential);
    }

    #[test]
    fn test_select_expired_fallback() {
        let credential = test_credential(now_epoch() - 3600.0);
        let store = CredentialStore::new(vec![credential.clone()]);

        let selected = store
            .select(Direction::Get, "/read/scope/file.bin")
            .unwrap();
        assert_eq!(selected, &credential);
    }

    #[test]
    fn test_select_prefers_unexpired() {
        let expired = test_credential(now_epoch() - 3600.0);
        let mut valid = test_credential(now_epoch() + 3600.0);
        valid.access_token = "fresh".to_string();
        let store = CredentialStore::new(vec![expired, valid.clone()]);

        let selected = store
            .select(Direction::Get, "/read/scope/file.bin")
            .unwrap();
        assert_eq!(selected, &valid);
    }

    #[test]
    fn test_select_no_match() {
        let credential = test_credential(now_epoch() + 3600.0);
        let store = CredentialStore::new(vec![credential]);

        assert!(store.select(Direction::Get, "/other/path/file.bin").is_err());
    }
}

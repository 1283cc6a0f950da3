//! Federation discovery
//!
//! Resolves a logical `osdf://` object URL to the concrete origin
//! endpoints serving its namespace, via the federation director.

mod director;
mod headers;

pub use director::DirectorClient;
pub use headers::{parse_link_header, parse_namespace_header};

use crate::error::{FederationError, Result, TransferError};
use rand::seq::SliceRandom;

/// URL scheme marking a federation object URL
pub const FEDERATION_SCHEME: &str = "osdf://";

/// Extract the federation path from an `osdf://` URL
pub fn federation_path(url: &str) -> Result<&str> {
    match url.split_once(FEDERATION_SCHEME) {
        Some((_, path)) => Ok(path),
        None => Err(FederationError::NotFederationUrl {
            scheme: FEDERATION_SCHEME.to_string(),
            url: url.to_string(),
        }
        .into()),
    }
}

/// Resolved federation information for one namespace
#[derive(Debug, Clone)]
pub struct FederationInfo {
    /// Origin endpoints serving the namespace
    pub origins: Vec<String>,

    /// Namespace prefix the origins serve (e.g. `/icecube/wipac`)
    pub namespace: String,
}

impl FederationInfo {
    /// Create federation info from already-resolved parts
    pub fn new(origins: Vec<String>, namespace: String) -> Self {
        Self { origins, namespace }
    }

    /// Object path relative to the federation namespace
    ///
    /// Scope paths in credentials and object paths at origins are both
    /// written relative to the namespace, so this is the form the rest
    /// of the client works in.
    pub fn object_path<'a>(&self, url: &'a str) -> Result<&'a str> {
        let path = federation_path(url)?;
        match path.strip_prefix(self.namespace.as_str()) {
            Some(rest) => Ok(rest),
            None => Err(TransferError::NamespaceMismatch {
                url: url.to_string(),
                namespace: self.namespace.clone(),
            }
            .into()),
        }
    }

    /// Candidate origins in randomized order
    ///
    /// Randomizing spreads single-shot clients across the origins the
    /// director advertises.
    pub fn candidate_origins(&self) -> Result<Vec<&str>> {
        if self.origins.is_empty() {
            return Err(FederationError::NoOrigins.into());
        }
        let mut candidates: Vec<&str> = self.origins.iter().map(String::as_str).collect();
        candidates.shuffle(&mut rand::thread_rng());
        Ok(candidates)
    }
}

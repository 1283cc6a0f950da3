//! # dumb_pelican_client Core
//!
//! Core library for dumb_pelican_client - a simpler, more-correct client
//! for Pelican-style object storage federations.
//!
//! This library provides the building blocks for a single object
//! transfer: HTCondor credential discovery, federation director
//! resolution, and the authenticated GET/PUT itself.

// Core modules
pub mod config;
pub mod credentials;
pub mod error;
pub mod federation;
pub mod transfer;

// Re-export commonly used types
pub use config::{ResolvedConfig, DEFAULT_DIRECTOR_URL};
pub use credentials::{Credential, CredentialStore};
pub use error::{Error, Result};
pub use federation::{DirectorClient, FederationInfo};
pub use transfer::{Direction, Transfer};

/// Current version of the pelican-client-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Error types and handling for the Pelican client core

use thiserror::Error;

/// Result type alias for Pelican client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Pelican client core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Credential discovery and selection errors
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    /// Federation discovery errors
    #[error("Federation error: {0}")]
    Federation(#[from] FederationError),

    /// Object transfer errors
    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

/// Credential discovery and selection errors
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Failed to read credential directory {path}: {message}")]
    DirUnreadable { path: String, message: String },

    #[error("Malformed credential file {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("No credential authorizes {operation} on {path}")]
    NoMatch { operation: String, path: String },
}

/// Federation discovery errors
#[derive(Error, Debug)]
pub enum FederationError {
    #[error("Not a federation URL (expected {scheme} scheme): {url}")]
    NotFederationUrl { scheme: String, url: String },

    #[error("Director returned {status}: {message}")]
    Director { status: u16, message: String },

    #[error("Director response missing header: {name}")]
    MissingHeader { name: String },

    #[error("Malformed {name} header: {value}")]
    MalformedHeader { name: String, value: String },

    #[error("No origins available for namespace")]
    NoOrigins,
}

/// Object transfer errors
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("URL {url} is outside the federation namespace {namespace}")]
    NamespaceMismatch { url: String, namespace: String },

    #[error("Transfer failed with status {status}: {message}")]
    Failed { status: u16, message: String },
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Generic(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Generic(msg.to_string())
    }
}

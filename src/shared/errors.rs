//! Error handling for the application

use std::path::PathBuf;
use thiserror::Error;

/// Configuration and credential errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file: {0}")]
    InvalidSettings(#[from] toml::de::Error),

    #[error("Failed to parse catalog: {0}")]
    InvalidCatalog(String),
}

/// Errors raised while verifying one category against the search model
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Model API returned {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("Model response carried no text")]
    EmptyResponse,

    #[error("Malformed model payload: {0}")]
    MalformedPayload(String),
}

/// History persistence errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt history file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<serde_json::Error> for VerificationError {
    fn from(err: serde_json::Error) -> Self {
        VerificationError::MalformedPayload(err.to_string())
    }
}

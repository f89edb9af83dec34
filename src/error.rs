//! Error types for mailsift.

use std::path::PathBuf;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Gmail API error: {0}")]
    Api(#[from] ApiError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Credential-provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token file not found at {path}. {hint}")]
    MissingToken { path: PathBuf, hint: String },

    #[error("Client credentials file not found at {path}. {hint}")]
    MissingCredentials { path: PathBuf, hint: String },

    #[error("Token file {path} is malformed: {source}")]
    MalformedToken {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Client credentials file {path} is malformed: {source}")]
    MalformedCredentials {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Token expired and no refresh token is available")]
    NoRefreshToken,

    #[error("Token refresh rejected: {status} {body}")]
    RefreshRejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the remote message-store accessor. Never caught by the
/// extraction core — a failed call aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gmail API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

/// Filesystem-projection errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for mailsift.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the app layer.

use mentorship_core::StateError;
use thiserror::Error;

/// Errors from the backend API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// An identifier cannot be used as a URL path segment.
    #[error("Invalid identifier for a request path: '{0}'")]
    InvalidId(String),

    /// Client configuration was rejected.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("{0}")]
    Usage(String),
}

//! Error types for client operations.

use thiserror::Error;

/// Client error type.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid or incomplete connection settings.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A command was given an empty required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// The request could not be sent.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Server error: {status} - {reason}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Reason taken from the error body, or the status text.
        reason: String,
    },

    /// Request or response JSON could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Query parameters could not be encoded.
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_urlencoded::ser::Error),
}

impl ClientError {
    /// True for a `404 Not Found` answer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Server { status: 404, .. })
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

//! Error types for builder configuration.

use thiserror::Error;

/// Configuration errors raised while assembling requests.
///
/// Absent optional values are never an error; they are omitted from the
/// rendered JSON. These variants cover arguments that cannot be absent.
#[derive(Error, Debug)]
pub enum BuilderError {
    /// Batch size must be at least one.
    #[error("Invalid batch size: {0} (must be greater than zero)")]
    InvalidBatchSize(usize),

    /// Field selector is not a plain member name.
    #[error("Invalid field selector '{0}': only simple member access is supported")]
    InvalidFieldSelector(String),

    /// Member is not declared (or is skipped) on the document type.
    #[error("Unknown field '{member}' on {type_name}")]
    UnknownField {
        /// Document type name.
        type_name: &'static str,
        /// Requested member.
        member: String,
    },

    /// A required argument was empty.
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// Document could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for builder operations.
pub type Result<T> = std::result::Result<T, BuilderError>;

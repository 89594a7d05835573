//! Error types for ksi-types

use thiserror::Error;

/// Errors that can occur in ksi-types
#[derive(Error, Debug)]
pub enum Error {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding error
    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Invalid hash algorithm
    #[error("Invalid hash algorithm: {0}")]
    InvalidHashAlgorithm(String),

    /// Digest does not have the length its algorithm requires
    #[error("Invalid digest length for {algorithm}: expected {expected} bytes, got {actual}")]
    InvalidDigestLength {
        algorithm: String,
        expected: usize,
        actual: usize,
    },

    /// Malformed hash imprint
    #[error("Invalid imprint: {0}")]
    InvalidImprint(String),

    /// Malformed base-32 publication string
    #[error("Invalid publication string: {0}")]
    InvalidPublicationString(String),

    /// Invalid media type
    #[error("Invalid media type: {0}")]
    InvalidMediaType(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Result type for ksi-types operations
pub type Result<T> = std::result::Result<T, Error>;

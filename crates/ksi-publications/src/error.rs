//! Error types for publications file operations

use thiserror::Error;

/// Errors that can occur while handling publications files
#[derive(Debug, Error)]
pub enum Error {
    /// JSON parsing error
    #[error("failed to parse publications file: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file carries no signature
    #[error("publications file is not signed")]
    Unsigned,

    /// Signature check failed
    #[error("publications file authentication failed: {0}")]
    Authentication(#[from] ksi_crypto::Error),

    /// Records are not in strictly increasing time order
    #[error("publications out of order: {next} follows {previous}")]
    Unordered { previous: u64, next: u64 },

    /// Unsupported file version
    #[error("unsupported publications file version: {0}")]
    UnsupportedVersion(u32),

    /// Cache location could not be determined
    #[error("cache error: {0}")]
    Cache(String),
}

/// Result type for publications file operations
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for ksi-hashchain

use thiserror::Error;

/// Errors that can occur when checking hash chains
#[derive(Error, Debug)]
pub enum Error {
    /// Recomputed hash differs from the expected one
    #[error("Hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },

    /// Time recorded in one structure differs from another
    #[error("{field} mismatch: expected {expected}, got {actual}")]
    TimeMismatch {
        field: &'static str,
        expected: u64,
        actual: u64,
    },

    /// Structurally invalid chain
    #[error("Invalid chain: {0}")]
    InvalidChain(String),
}

/// Result type for hash chain operations
pub type Result<T> = std::result::Result<T, Error>;

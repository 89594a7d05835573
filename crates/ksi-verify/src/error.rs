//! Error types for ksi-verify

use thiserror::Error;

/// Reasons a signature fails verification
#[derive(Error, Debug)]
pub enum Error {
    /// Hash chain inconsistency
    #[error("hash chain check failed: {0}")]
    Chain(#[from] ksi_hashchain::Error),

    /// A calendar chain is needed but absent
    #[error("signature has no calendar hash chain")]
    MissingCalendarChain,

    /// A publication record is needed but absent
    #[error("signature has no publication record")]
    MissingPublicationRecord,

    /// The embedded publication is unknown to the publications file
    #[error("publication at {0} not found in publications file")]
    NotInPublicationsFile(u64),

    /// Embedded calendar chain disagrees with the live calendar
    #[error("calendar root at {publication_time} differs from extender: expected {expected}, embedded {actual}")]
    CalendarMismatch {
        publication_time: u64,
        expected: String,
        actual: String,
    },

    /// Document hash differs from the one signed
    #[error("document hash mismatch: signed {expected}, got {actual}")]
    DocumentHashMismatch { expected: String, actual: String },
}

/// Result type for verification
pub type Result<T> = std::result::Result<T, Error>;

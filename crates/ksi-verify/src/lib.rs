//! Verification of keyless timestamp signatures
//!
//! Every function here is a pure check over data already in memory. Getting
//! that data (extending, downloading publications files, hashing documents)
//! is the caller's business.

pub mod error;
pub mod verify;

pub use error::{Error, Result};
pub use verify::{
    verify_against_calendar, verify_document_hash, verify_internal, verify_with_publication,
    verify_with_publications_file, VerificationPolicy, VerificationResult,
};

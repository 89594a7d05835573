//! Core types and data structures for keyless timestamp signatures
//!
//! This crate provides the data model shared by the rest of the workspace:
//! hash imprints, publication data and records, hash chains and the
//! signature itself, together with their JSON serialization.

pub mod chain;
pub mod error;
pub mod hash;
pub mod publication;
pub mod signature;

// Re-export base64_bytes for internal use
pub(crate) use hash::base64_bytes;

pub use chain::{AggregationHashChain, CalendarHashChain, HashLink};
pub use error::{Error, Result};
pub use hash::{DataHash, HashAlgorithm};
pub use publication::{PublicationData, PublicationRecord};
pub use signature::{MediaType, Signature};

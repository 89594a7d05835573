//! Cryptographic primitives for keyless timestamp signatures
//!
//! This crate provides streaming data hashing and Ed25519 signature
//! verification using aws-lc-rs as the cryptographic backend. Key pairs for
//! signing are only built with the `test-utils` feature.

pub mod error;
pub mod hasher;
#[cfg(any(test, feature = "test-utils"))]
pub mod signing;
pub mod verification;

pub use error::{Error, Result};
pub use hasher::DataHasher;
#[cfg(any(test, feature = "test-utils"))]
pub use signing::KeyPair;
pub use verification::VerificationKey;

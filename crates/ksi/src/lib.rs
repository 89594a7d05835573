//! Verification and extension of keyless timestamp signatures
//!
//! This is the main entry point of the workspace. It loads signatures,
//! decides which verification procedure a request calls for, drives the
//! extender and publications services, and classifies every failure so the
//! command-line tool can turn it into an exit code.

pub mod codec;
pub mod error;
pub mod extend;
pub mod hasher;
pub mod plan;
pub mod services;
pub mod task;

// Re-export core crates
pub use ksi_client as client;
pub use ksi_crypto as crypto;
pub use ksi_hashchain as hashchain;
pub use ksi_publications as publications;
pub use ksi_types as types;
pub use ksi_verify as verify;

pub use codec::SignatureCodec;
pub use error::{Error, ErrorKind, Result};
pub use extend::{extend_to_latest, extend_to_record, extend_to_time};
pub use hasher::FileHasher;
pub use plan::{InputCheck, VerificationPlan, VerifyOptions, VerifyRequest};
pub use services::Services;
pub use task::extend::{extend_signature, run_extend, ExtendOutcome};
pub use task::publications::{run_pubfile_verify, PubfileOutcome};
pub use task::verify::{run_verify, verify_signature, VerifyFailure, VerifyOutcome};

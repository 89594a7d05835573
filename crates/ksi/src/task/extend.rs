//! Signature extension task

use crate::codec::SignatureCodec;
use crate::error::Result;
use crate::extend::{extend_to_latest, extend_to_time};
use crate::services::Services;
use ksi_types::Signature;
use ksi_verify::{verify_internal, VerificationResult};
use std::path::Path;

/// A successful extension
#[derive(Debug)]
pub struct ExtendOutcome {
    /// Verification of the signature before extension
    pub original: VerificationResult,
    /// The extended signature
    pub extended: Signature,
}

/// Verify `signature`, then extend it
///
/// With `publication_time` the extender is asked for exactly that calendar
/// root; without it the signature is extended to the first publication
/// after its signing time.
pub async fn extend_signature(
    signature: &Signature,
    publication_time: Option<u64>,
    services: &Services,
) -> Result<ExtendOutcome> {
    tracing::debug!("verifying old signature");
    let original = verify_internal(signature)?;

    let extended = match publication_time {
        Some(time) => {
            extend_to_time(
                signature,
                services.extender.as_ref(),
                time,
                services.fetch_publications(None),
            )
            .await?
        }
        None => {
            let publications = services.fetch_publications(None).await?;
            extend_to_latest(signature, services.extender.as_ref(), &publications).await?
        }
    };

    Ok(ExtendOutcome { original, extended })
}

/// Load, extend and save a signature
///
/// The output is written only after the extended signature has been
/// assembled and verified.
pub async fn run_extend(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    publication_time: Option<u64>,
    services: &Services,
) -> Result<ExtendOutcome> {
    let signature = SignatureCodec::load(input).await?;
    let outcome = extend_signature(&signature, publication_time, services).await?;
    SignatureCodec::save(&outcome.extended, output).await?;
    Ok(outcome)
}

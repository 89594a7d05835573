//! Signature verification task

use crate::codec::SignatureCodec;
use crate::error::{Error, Result};
use crate::extend::extend_to_record;
use crate::hasher::FileHasher;
use crate::plan::{InputCheck, VerificationPlan, VerifyRequest};
use crate::services::Services;
use ksi_publications::{anchor_for_reference, is_extended, TrustAnchor};
use ksi_types::{PublicationData, Signature};
use ksi_verify::{
    verify_against_calendar, verify_document_hash, verify_internal, verify_with_publication,
    verify_with_publications_file, VerificationResult,
};
use std::path::Path;

/// Advisory when an extended signature is anchored to a different publication
pub const ADVISORY_TIME_MISMATCH: &str =
    "Publication time of publication string is not matching signature's publication time.";

/// Advisory when the signature has no publication record
pub const ADVISORY_NOT_EXTENDED: &str = "Signature is not extended.";

/// A successful verification
#[derive(Debug)]
pub struct VerifyOutcome {
    /// The signature as loaded
    pub signature: Signature,
    /// Signature extended during verification, if any
    pub extended: Option<Signature>,
    /// Publication the verification was anchored to, if any
    pub anchor: Option<TrustAnchor>,
    /// Details of the successful check
    pub result: VerificationResult,
    /// Progress description of the procedure that ran
    pub description: &'static str,
    /// Non-fatal advisories, in the order they were raised
    pub warnings: Vec<String>,
}

impl VerifyOutcome {
    /// The signature reporting should describe: the extended one when present
    pub fn effective(&self) -> &Signature {
        self.extended.as_ref().unwrap_or(&self.signature)
    }
}

/// A failed verification
///
/// A signature extended before the failure is still handed back.
#[derive(Debug)]
pub struct VerifyFailure {
    pub error: Error,
    pub extended: Option<Signature>,
    pub warnings: Vec<String>,
}

impl From<Error> for VerifyFailure {
    fn from(error: Error) -> Self {
        Self {
            error,
            extended: None,
            warnings: Vec::new(),
        }
    }
}

impl std::fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.error, f)
    }
}

/// State accumulated while a procedure runs
#[derive(Default)]
struct Run {
    extended: Option<Signature>,
    anchor: Option<TrustAnchor>,
    warnings: Vec<String>,
}

impl Run {
    fn warn(&mut self, message: &str) {
        tracing::warn!("{}", message);
        self.warnings.push(message.to_string());
    }
}

/// Load a signature and verify it
pub async fn run_verify(
    input: impl AsRef<Path>,
    request: &VerifyRequest,
    services: &Services,
) -> std::result::Result<VerifyOutcome, VerifyFailure> {
    let signature = SignatureCodec::load(input).await?;
    verify_signature(signature, request, services).await
}

/// Verify a loaded signature according to `request`
pub async fn verify_signature(
    signature: Signature,
    request: &VerifyRequest,
    services: &Services,
) -> std::result::Result<VerifyOutcome, VerifyFailure> {
    let mut run = Run::default();
    match execute(&signature, request, services, &mut run).await {
        Ok((result, description)) => Ok(VerifyOutcome {
            signature,
            extended: run.extended,
            anchor: run.anchor,
            result,
            description,
            warnings: run.warnings,
        }),
        Err(error) => Err(VerifyFailure {
            error,
            extended: run.extended,
            warnings: run.warnings,
        }),
    }
}

async fn execute(
    signature: &Signature,
    request: &VerifyRequest,
    services: &Services,
    run: &mut Run,
) -> Result<(VerificationResult, &'static str)> {
    let (result, description) = match &request.plan {
        VerificationPlan::Online => {
            let result = verify_online(signature, services).await?;
            (result, "Verifying signature online")
        }
        VerificationPlan::Internal { publications_file } => {
            verify_reference(signature, publications_file.as_deref(), services, run).await?
        }
        VerificationPlan::UserPublication {
            reference,
            publications_file,
        } => {
            let result = verify_user_publication(
                signature,
                reference,
                publications_file.as_deref(),
                services,
                run,
            )
            .await?;
            (result, "Verifying signature with publication")
        }
    };

    let target = run.extended.as_ref().unwrap_or(signature);
    for check in &request.input {
        check_input(target, check).await?;
    }

    Ok((result, description))
}

async fn verify_online(signature: &Signature, services: &Services) -> Result<VerificationResult> {
    // An extended signature is checked at its own publication time, else at the head
    let target = signature.calendar_chain().map(|c| c.publication_time);
    let fetched = services
        .extender
        .extend(signature.signing_time(), target)
        .await?;
    Ok(verify_against_calendar(signature, &fetched)?)
}

async fn verify_reference(
    signature: &Signature,
    publications_file: Option<&Path>,
    services: &Services,
    run: &mut Run,
) -> Result<(VerificationResult, &'static str)> {
    match (publications_file, signature.publication_record()) {
        (Some(path), Some(record)) => {
            let file = services.fetch_publications(Some(path)).await?;
            let result = verify_with_publications_file(signature, &file)?;
            run.anchor = Some(TrustAnchor::FromPublicationsFile(record.clone()));
            Ok((result, "Verifying signature using local publications file"))
        }
        (_, record) => {
            let result = verify_internal(signature)?;
            run.anchor = record.cloned().map(TrustAnchor::Embedded);
            Ok((result, "Verifying signature"))
        }
    }
}

async fn verify_user_publication(
    signature: &Signature,
    reference: &str,
    publications_file: Option<&Path>,
    services: &Services,
    run: &mut Run,
) -> Result<VerificationResult> {
    let publication = PublicationData::from_base32(reference)?;
    let time_b = publication.publication_time;

    let embedded = signature.publication_record();
    if let Some(record) = embedded.filter(|r| r.publication_time() == time_b) {
        tracing::debug!("signature already anchored to publication at {}", time_b);
        let result = verify_with_publication(signature, &publication)?;
        run.anchor = Some(TrustAnchor::UserReferenceExactMatch(record.clone()));
        return Ok(result);
    }

    // Mismatch is checked first: only an extended signature can be anchored elsewhere
    if is_extended(signature) {
        run.warn(ADVISORY_TIME_MISMATCH);
    } else {
        run.warn(ADVISORY_NOT_EXTENDED);
    }

    let anchor = {
        let file = services.fetch_publications(publications_file).await?;
        anchor_for_reference(&file, reference, &publication)
    };
    let extended =
        extend_to_record(signature, services.extender.as_ref(), anchor.record().clone()).await?;
    run.anchor = Some(anchor);
    let extended = run.extended.insert(extended);

    Ok(verify_with_publication(extended, &publication)?)
}

async fn check_input(signature: &Signature, check: &InputCheck) -> Result<()> {
    match check {
        InputCheck::File(path) => {
            let hash = FileHasher::matching(signature.document_hash())
                .hash(path)
                .await?;
            verify_document_hash(signature, &hash)?;
        }
        InputCheck::Imprint(imprint) => verify_document_hash(signature, imprint)?,
    }
    Ok(())
}

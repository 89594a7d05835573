//! Extension primitives
//!
//! Each function works on a clone of the input signature and returns a new
//! one; the input is never touched. Nothing is written to disk here.

use crate::error::{Error, Result};
use ksi_client::ExtendService;
use ksi_publications::{resolve_by_time, PublicationsFile};
use ksi_types::{PublicationRecord, Signature};
use ksi_verify::verify_internal;

/// Extend `signature` to a calendar root at `publication_time`
///
/// The publications file is fetched after the extender answers; the record
/// at exactly `publication_time` is attached when the file has one, else the
/// result carries no publication record. The result is verified before it
/// is returned.
pub async fn extend_to_time<F>(
    signature: &Signature,
    extender: &dyn ExtendService,
    publication_time: u64,
    fetch_publications: F,
) -> Result<Signature>
where
    F: std::future::Future<Output = Result<PublicationsFile>>,
{
    let aggregation_time = signature.signing_time();
    if publication_time < aggregation_time {
        return Err(Error::InvalidArgument(format!(
            "publication time {} precedes signing time {}",
            publication_time, aggregation_time
        )));
    }

    let working = signature.clone();
    let chain = extender
        .extend(aggregation_time, Some(publication_time))
        .await?;
    let working = working.with_calendar_chain(chain);

    let publications = fetch_publications.await?;
    let record = resolve_by_time(&publications, publication_time).cloned();
    if record.is_none() {
        tracing::debug!(
            "no publication at {}, extended signature carries no publication record",
            publication_time
        );
    }

    let extended = working.with_publication_record(record);
    verify_internal(&extended)?;
    Ok(extended)
}

/// Extend `signature` to the publication in `record`
///
/// The record is attached as the trust anchor and the result verified
/// against it.
pub async fn extend_to_record(
    signature: &Signature,
    extender: &dyn ExtendService,
    record: PublicationRecord,
) -> Result<Signature> {
    let chain = extender
        .extend(signature.signing_time(), Some(record.publication_time()))
        .await?;
    let extended = signature
        .clone()
        .with_calendar_chain(chain)
        .with_publication_record(Some(record));
    verify_internal(&extended)?;
    Ok(extended)
}

/// Extend `signature` to the earliest publication at or after its signing time
pub async fn extend_to_latest(
    signature: &Signature,
    extender: &dyn ExtendService,
    publications: &PublicationsFile,
) -> Result<Signature> {
    let record = publications
        .nearest_after(signature.signing_time())
        .cloned()
        .ok_or(Error::NoSuitablePublication(signature.signing_time()))?;
    tracing::debug!("extending to publication {}", record.published_data);
    extend_to_record(signature, extender, record).await
}

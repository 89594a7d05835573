//! Signature verification policies

use crate::error::{Error, Result};
use ksi_hashchain::{
    aggregation_root, calendar_root, verify_calendar_input, verify_calendar_publication,
};
use ksi_publications::PublicationsFile;
use ksi_types::{CalendarHashChain, DataHash, PublicationData, Signature};

/// Which trust material a verification relied on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationPolicy {
    /// Only material embedded in the signature
    Internal,
    /// The embedded record, confirmed by a publications file
    PublicationsFile,
    /// A publication supplied by the user
    UserPublication,
    /// A calendar chain fetched from the extender
    Calendar,
}

impl VerificationPolicy {
    /// Human readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationPolicy::Internal => "internal",
            VerificationPolicy::PublicationsFile => "publications file",
            VerificationPolicy::UserPublication => "user publication",
            VerificationPolicy::Calendar => "calendar-based",
        }
    }
}

impl std::fmt::Display for VerificationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Details of a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    /// Policy that succeeded
    pub policy: VerificationPolicy,
    /// Signing time of the verified signature
    pub signing_time: u64,
    /// Publication the signature was verified against, if any
    pub publication: Option<PublicationData>,
    /// Checks performed, in order
    pub steps: Vec<String>,
}

impl VerificationResult {
    fn new(policy: VerificationPolicy, signature: &Signature) -> Self {
        Self {
            policy,
            signing_time: signature.signing_time(),
            publication: None,
            steps: Vec::new(),
        }
    }

    fn step(&mut self, description: impl Into<String>) {
        let description = description.into();
        tracing::debug!("{}", description);
        self.steps.push(description);
    }
}

fn internal_steps(signature: &Signature, result: &mut VerificationResult) -> Result<()> {
    let root = aggregation_root(signature.aggregation_chain());
    result.step(format!("aggregation chain computes to {}", root));

    if let Some(calendar) = signature.calendar_chain() {
        verify_calendar_input(signature.aggregation_chain(), calendar)?;
        result.step(format!(
            "calendar chain starts from aggregation root at {}",
            calendar.aggregation_time
        ));
    }

    if let Some(record) = signature.publication_record() {
        let calendar = signature
            .calendar_chain()
            .ok_or(Error::MissingCalendarChain)?;
        verify_calendar_publication(calendar, &record.published_data)?;
        result.step(format!(
            "calendar chain matches embedded publication at {}",
            record.publication_time()
        ));
        result.publication = Some(record.published_data.clone());
    }

    Ok(())
}

/// Verify a signature using only what it carries
///
/// Checks that the calendar chain (if any) continues the aggregation chain,
/// and that the embedded publication record (if any) is the calendar root.
pub fn verify_internal(signature: &Signature) -> Result<VerificationResult> {
    let mut result = VerificationResult::new(VerificationPolicy::Internal, signature);
    internal_steps(signature, &mut result)?;
    Ok(result)
}

/// Verify a signature against a trusted publication
pub fn verify_with_publication(
    signature: &Signature,
    publication: &PublicationData,
) -> Result<VerificationResult> {
    let mut result = VerificationResult::new(VerificationPolicy::UserPublication, signature);
    let calendar = signature
        .calendar_chain()
        .ok_or(Error::MissingCalendarChain)?;
    verify_calendar_input(signature.aggregation_chain(), calendar)?;
    result.step("calendar chain starts from aggregation root");

    verify_calendar_publication(calendar, publication)?;
    result.step(format!(
        "calendar chain matches publication {}",
        publication
    ));
    result.publication = Some(publication.clone());
    Ok(result)
}

/// Verify a signature whose embedded record must appear in a publications file
pub fn verify_with_publications_file(
    signature: &Signature,
    file: &PublicationsFile,
) -> Result<VerificationResult> {
    let mut result = VerificationResult::new(VerificationPolicy::PublicationsFile, signature);
    let record = signature
        .publication_record()
        .ok_or(Error::MissingPublicationRecord)?;
    internal_steps(signature, &mut result)?;

    if file.by_publication(&record.published_data).is_none() {
        return Err(Error::NotInPublicationsFile(record.publication_time()));
    }
    result.step("embedded publication found in publications file");
    Ok(result)
}

/// Verify a signature against a calendar chain fetched from the extender
///
/// `fetched` must start at the signature's aggregation time from its
/// aggregation root. A signature carrying its own calendar chain must have
/// asked for `fetched` at that chain's publication time, and both chains
/// must compute to the same calendar root. The embedded publication record
/// is bound to the embedded chain, so it is then bound to the live calendar.
pub fn verify_against_calendar(
    signature: &Signature,
    fetched: &CalendarHashChain,
) -> Result<VerificationResult> {
    let mut result = VerificationResult::new(VerificationPolicy::Calendar, signature);
    internal_steps(signature, &mut result)?;
    verify_calendar_input(signature.aggregation_chain(), fetched)?;
    result.step(format!(
        "extender calendar chain to {} commits to aggregation root",
        fetched.publication_time
    ));

    if let Some(embedded) = signature.calendar_chain() {
        if embedded.publication_time != fetched.publication_time {
            return Err(ksi_hashchain::Error::TimeMismatch {
                field: "publication time",
                expected: fetched.publication_time,
                actual: embedded.publication_time,
            }
            .into());
        }
        let live = calendar_root(fetched);
        let claimed = calendar_root(embedded);
        if live != claimed {
            return Err(Error::CalendarMismatch {
                publication_time: fetched.publication_time,
                expected: live.to_string(),
                actual: claimed.to_string(),
            });
        }
        result.step(format!(
            "embedded calendar chain matches extender calendar root at {}",
            fetched.publication_time
        ));
    }
    Ok(result)
}

/// Require the signed document hash to equal `hash`
pub fn verify_document_hash(signature: &Signature, hash: &DataHash) -> Result<()> {
    let signed = signature.document_hash();
    if signed != hash {
        return Err(Error::DocumentHashMismatch {
            expected: signed.to_string(),
            actual: hash.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ksi_types::{AggregationHashChain, HashAlgorithm, HashLink, PublicationRecord};
    use rstest::rstest;

    fn h(byte: u8) -> DataHash {
        DataHash::new(HashAlgorithm::Sha2256, vec![byte; 32]).unwrap()
    }

    fn unextended() -> Signature {
        Signature::new(AggregationHashChain {
            aggregation_time: 1_000,
            input_hash: h(1),
            links: vec![HashLink::Left(h(2)), HashLink::Right(h(3))],
        })
    }

    fn calendar(publication_time: u64) -> CalendarHashChain {
        CalendarHashChain {
            publication_time,
            aggregation_time: 1_000,
            input_hash: aggregation_root(unextended().aggregation_chain()),
            links: vec![HashLink::Right(h(publication_time as u8))],
        }
    }

    fn extended(publication_time: u64) -> (Signature, PublicationData) {
        let chain = calendar(publication_time);
        let publication = PublicationData::new(publication_time, calendar_root(&chain));
        let sig = unextended()
            .with_calendar_chain(chain)
            .with_publication_record(Some(PublicationRecord::new(publication.clone())));
        (sig, publication)
    }

    #[test]
    fn test_internal_without_calendar() {
        let result = verify_internal(&unextended()).unwrap();
        assert_eq!(result.policy, VerificationPolicy::Internal);
        assert!(result.publication.is_none());
    }

    #[test]
    fn test_internal_extended() {
        let (sig, publication) = extended(2_000);
        let result = verify_internal(&sig).unwrap();
        assert_eq!(result.publication, Some(publication));
    }

    #[test]
    fn test_internal_record_without_calendar() {
        let (_, publication) = extended(2_000);
        let sig = unextended().with_publication_record(Some(PublicationRecord::new(publication)));
        assert!(matches!(
            verify_internal(&sig),
            Err(Error::MissingCalendarChain)
        ));
    }

    #[rstest]
    #[case(2_000, true)]
    #[case(2_001, false)]
    fn test_with_publication(#[case] publication_time: u64, #[case] ok: bool) {
        let (sig, publication) = extended(2_000);
        let candidate = PublicationData::new(publication_time, publication.published_hash);
        assert_eq!(verify_with_publication(&sig, &candidate).is_ok(), ok);
    }

    #[test]
    fn test_with_publication_wrong_hash() {
        let (sig, _) = extended(2_000);
        let forged = PublicationData::new(2_000, h(0xee));
        assert!(matches!(
            verify_with_publication(&sig, &forged),
            Err(Error::Chain(ksi_hashchain::Error::HashMismatch { .. }))
        ));
    }

    #[test]
    fn test_with_publications_file() {
        let (sig, publication) = extended(2_000);
        let file = PublicationsFile::new(vec![PublicationRecord::new(publication)]);
        verify_with_publications_file(&sig, &file).unwrap();

        let empty = PublicationsFile::new(Vec::new());
        assert!(matches!(
            verify_with_publications_file(&sig, &empty),
            Err(Error::NotInPublicationsFile(2_000))
        ));
        assert!(matches!(
            verify_with_publications_file(&unextended(), &file),
            Err(Error::MissingPublicationRecord)
        ));
    }

    #[test]
    fn test_against_calendar() {
        verify_against_calendar(&unextended(), &calendar(5_000)).unwrap();

        let mut stale = calendar(5_000);
        stale.input_hash = h(9);
        assert!(verify_against_calendar(&unextended(), &stale).is_err());
    }

    #[test]
    fn test_against_calendar_extended() {
        let (sig, _) = extended(2_000);
        verify_against_calendar(&sig, &calendar(2_000)).unwrap();

        assert!(matches!(
            verify_against_calendar(&sig, &calendar(5_000)),
            Err(Error::Chain(ksi_hashchain::Error::TimeMismatch { .. }))
        ));
    }

    #[test]
    fn test_against_calendar_rejects_forged_chain() {
        let mut forged = calendar(2_000);
        forged.links = vec![HashLink::Right(h(0xee))];
        let publication = PublicationData::new(2_000, calendar_root(&forged));
        let sig = unextended()
            .with_calendar_chain(forged)
            .with_publication_record(Some(PublicationRecord::new(publication)));
        verify_internal(&sig).unwrap();

        assert!(matches!(
            verify_against_calendar(&sig, &calendar(2_000)),
            Err(Error::CalendarMismatch {
                publication_time: 2_000,
                ..
            })
        ));
    }

    #[test]
    fn test_document_hash() {
        verify_document_hash(&unextended(), &h(1)).unwrap();
        assert!(matches!(
            verify_document_hash(&unextended(), &h(2)),
            Err(Error::DocumentHashMismatch { .. })
        ));
    }
}

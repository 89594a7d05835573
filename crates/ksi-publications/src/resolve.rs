//! Trust anchor resolution
//!
//! These helpers never mutate the publications file. Lookups hand out
//! borrowed records; anything kept past the file's lifetime is cloned into a
//! [`TrustAnchor`].

use crate::file::PublicationsFile;
use ksi_types::{PublicationData, PublicationRecord, Signature};

/// The publication a signature is extended to or verified against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustAnchor {
    /// The record already embedded in the signature
    Embedded(PublicationRecord),
    /// The embedded record, confirmed equal to a user-supplied publication string
    UserReferenceExactMatch(PublicationRecord),
    /// A record from a publications file
    FromPublicationsFile(PublicationRecord),
    /// A user-supplied publication string trusted verbatim
    Synthetic(PublicationRecord),
}

impl TrustAnchor {
    /// The anchoring record
    pub fn record(&self) -> &PublicationRecord {
        match self {
            TrustAnchor::Embedded(r)
            | TrustAnchor::UserReferenceExactMatch(r)
            | TrustAnchor::FromPublicationsFile(r)
            | TrustAnchor::Synthetic(r) => r,
        }
    }

    /// Short description of where the anchor came from
    pub fn source(&self) -> &'static str {
        match self {
            TrustAnchor::Embedded(_) => "embedded publication record",
            TrustAnchor::UserReferenceExactMatch(_) => "publication string (exact match)",
            TrustAnchor::FromPublicationsFile(_) => "publications file",
            TrustAnchor::Synthetic(_) => "publication string",
        }
    }
}

/// Look up the record published at exactly `time`
pub fn resolve_by_time(set: &PublicationsFile, time: u64) -> Option<&PublicationRecord> {
    set.by_time(time)
}

/// Look up the record matching a base-32 publication string
pub fn resolve_by_reference<'a>(
    set: &'a PublicationsFile,
    reference: &str,
) -> Option<&'a PublicationRecord> {
    set.by_reference(reference)
}

/// A signature is extended iff it carries a publication record
pub fn is_extended(signature: &Signature) -> bool {
    signature.is_extended()
}

/// Pick the extension target for a publication string
///
/// `decoded` is `reference` already decoded by the caller. A record found in
/// the file is cloned together with its bibliographic data; otherwise the
/// decoded data is wrapped in a bare record.
pub fn anchor_for_reference(
    set: &PublicationsFile,
    reference: &str,
    decoded: &PublicationData,
) -> TrustAnchor {
    match resolve_by_reference(set, reference) {
        Some(record) => TrustAnchor::FromPublicationsFile(record.clone()),
        None => {
            tracing::debug!(
                "publication {} not in publications file, trusting it verbatim",
                decoded
            );
            TrustAnchor::Synthetic(PublicationRecord::new(decoded.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ksi_types::{AggregationHashChain, DataHash, HashAlgorithm};

    fn data(time: u64, byte: u8) -> PublicationData {
        PublicationData::new(
            time,
            DataHash::new(HashAlgorithm::Sha2256, vec![byte; 32]).unwrap(),
        )
    }

    #[test]
    fn test_anchor_from_file_keeps_references() {
        let set = PublicationsFile::new(vec![
            PublicationRecord::new(data(10, 1)).with_reference("Gazette, 2014-04-01")
        ]);
        let anchor = anchor_for_reference(&set, &data(10, 1).to_base32(), &data(10, 1));
        assert!(matches!(anchor, TrustAnchor::FromPublicationsFile(_)));
        assert_eq!(anchor.record().references, vec!["Gazette, 2014-04-01"]);
    }

    #[test]
    fn test_anchor_synthetic_when_absent() {
        let set = PublicationsFile::new(vec![PublicationRecord::new(data(10, 1))]);
        let anchor = anchor_for_reference(&set, &data(20, 2).to_base32(), &data(20, 2));
        assert!(matches!(anchor, TrustAnchor::Synthetic(_)));
        assert!(anchor.record().references.is_empty());
        assert_eq!(anchor.record().published_data, data(20, 2));
    }

    #[test]
    fn test_reference_with_known_time_but_other_hash_is_synthetic() {
        let set = PublicationsFile::new(vec![PublicationRecord::new(data(10, 1))]);
        assert!(resolve_by_reference(&set, &data(10, 2).to_base32()).is_none());
        let anchor = anchor_for_reference(&set, &data(10, 2).to_base32(), &data(10, 2));
        assert!(matches!(anchor, TrustAnchor::Synthetic(_)));
    }

    #[test]
    fn test_resolved_clone_outlives_set() {
        let set = PublicationsFile::new(vec![PublicationRecord::new(data(10, 1))]);
        let owned = resolve_by_time(&set, 10).cloned();
        drop(set);
        assert_eq!(owned.unwrap().publication_time(), 10);
    }

    #[test]
    fn test_is_extended() {
        let sig = Signature::new(AggregationHashChain {
            aggregation_time: 5,
            input_hash: DataHash::new(HashAlgorithm::Sha2256, vec![0; 32]).unwrap(),
            links: Vec::new(),
        });
        assert!(!is_extended(&sig));
        let sig = sig.with_publication_record(Some(PublicationRecord::new(data(10, 1))));
        assert!(is_extended(&sig));
    }
}

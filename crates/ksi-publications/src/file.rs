//! Publications file format
//!
//! ```json
//! {
//!   "version": 1,
//!   "created": "2024-01-15T00:00:00Z",
//!   "publications": [ { "publishedData": { ... }, "references": [ ... ] } ],
//!   "signature": { "keyId": "...", "value": "<base64>" }
//! }
//! ```
//!
//! The signature is Ed25519 over the compact JSON encoding of the file with
//! the `signature` member left out.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
#[cfg(any(test, feature = "test-utils"))]
use ksi_crypto::KeyPair;
use ksi_crypto::VerificationKey;
use ksi_types::hash::base64_bytes;
use ksi_types::{PublicationData, PublicationRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported publications file version
pub const FILE_VERSION: u32 = 1;

/// Operator signature over a publications file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSignature {
    /// Hint identifying the signing key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    /// Raw Ed25519 signature
    #[serde(with = "base64_bytes")]
    pub value: Vec<u8>,
}

/// An ordered, authenticated set of publication records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationsFile {
    /// Format version
    pub version: u32,
    /// Creation time of the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Publication records in increasing time order
    #[serde(default)]
    pub publications: Vec<PublicationRecord>,
    /// Operator signature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<FileSignature>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignedBody<'a> {
    version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<&'a DateTime<Utc>>,
    publications: &'a [PublicationRecord],
}

impl PublicationsFile {
    /// Create an unsigned file from records
    pub fn new(publications: Vec<PublicationRecord>) -> Self {
        Self {
            version: FILE_VERSION,
            created: None,
            publications,
            signature: None,
        }
    }

    /// Parse a publications file from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_slice(json.as_bytes())
    }

    /// Parse a publications file from raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let file: PublicationsFile = serde_json::from_slice(bytes)?;
        file.validate()?;
        Ok(file)
    }

    /// Load a publications file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_slice(&bytes)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        if self.version != FILE_VERSION {
            return Err(Error::UnsupportedVersion(self.version));
        }
        for pair in self.publications.windows(2) {
            let (previous, next) = (pair[0].publication_time(), pair[1].publication_time());
            if next <= previous {
                return Err(Error::Unordered { previous, next });
            }
        }
        Ok(())
    }

    /// The bytes covered by the operator signature
    pub fn signed_bytes(&self) -> Result<Vec<u8>> {
        let body = SignedBody {
            version: self.version,
            created: self.created.as_ref(),
            publications: &self.publications,
        };
        Ok(serde_json::to_vec(&body)?)
    }

    /// Sign the file with an operator key, replacing any previous signature
    #[cfg(any(test, feature = "test-utils"))]
    pub fn signed(mut self, key: &KeyPair, key_id: Option<String>) -> Result<Self> {
        let value = key.sign(&self.signed_bytes()?);
        self.signature = Some(FileSignature { key_id, value });
        Ok(self)
    }

    /// Check the operator signature against a trusted key
    pub fn authenticate(&self, key: &VerificationKey) -> Result<()> {
        let signature = self.signature.as_ref().ok_or(Error::Unsigned)?;
        key.verify(&self.signed_bytes()?, &signature.value)?;
        tracing::debug!(
            "publications file authenticated ({} records)",
            self.publications.len()
        );
        Ok(())
    }

    /// Record published at exactly `time`
    pub fn by_time(&self, time: u64) -> Option<&PublicationRecord> {
        self.publications
            .binary_search_by_key(&time, |r| r.publication_time())
            .ok()
            .map(|i| &self.publications[i])
    }

    /// First record published at or after `time`
    pub fn nearest_after(&self, time: u64) -> Option<&PublicationRecord> {
        let index = self
            .publications
            .partition_point(|r| r.publication_time() < time);
        self.publications.get(index)
    }

    /// Record whose published data equals `data`
    pub fn by_publication(&self, data: &PublicationData) -> Option<&PublicationRecord> {
        self.by_time(data.publication_time)
            .filter(|r| r.published_data == *data)
    }

    /// Record matching a base-32 publication string
    ///
    /// Strings that fail to decode match nothing.
    pub fn by_reference(&self, reference: &str) -> Option<&PublicationRecord> {
        let data = PublicationData::from_base32(reference).ok()?;
        self.by_publication(&data)
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&PublicationRecord> {
        self.publications.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ksi_types::{DataHash, HashAlgorithm};

    fn record(time: u64, byte: u8) -> PublicationRecord {
        PublicationRecord::new(PublicationData::new(
            time,
            DataHash::new(HashAlgorithm::Sha2256, vec![byte; 32]).unwrap(),
        ))
    }

    fn sample() -> PublicationsFile {
        PublicationsFile::new(vec![record(100, 1), record(200, 2), record(300, 3)])
    }

    #[test]
    fn test_lookups() {
        let file = sample();
        assert_eq!(file.by_time(200).unwrap().publication_time(), 200);
        assert!(file.by_time(250).is_none());
        assert_eq!(file.nearest_after(150).unwrap().publication_time(), 200);
        assert_eq!(file.nearest_after(200).unwrap().publication_time(), 200);
        assert!(file.nearest_after(301).is_none());
        assert_eq!(file.latest().unwrap().publication_time(), 300);
    }

    #[test]
    fn test_by_reference_requires_matching_hash() {
        let file = sample();
        let known = record(200, 2).published_data.to_base32();
        assert!(file.by_reference(&known).is_some());

        let wrong_hash = record(200, 9).published_data.to_base32();
        assert!(file.by_reference(&wrong_hash).is_none());
        assert!(file.by_reference("garbage").is_none());
    }

    #[test]
    fn test_sign_and_authenticate() {
        let key = KeyPair::generate_ed25519().unwrap();
        let trusted = VerificationKey::new(key.public_key_bytes().to_vec()).unwrap();
        let file = sample().signed(&key, Some("test".into())).unwrap();
        file.authenticate(&trusted).unwrap();

        let mut tampered = file.clone();
        tampered.publications.pop();
        assert!(matches!(
            tampered.authenticate(&trusted),
            Err(Error::Authentication(_))
        ));
    }

    #[test]
    fn test_unsigned_file_fails_authentication() {
        let key = KeyPair::generate_ed25519().unwrap();
        let trusted = VerificationKey::new(key.public_key_bytes().to_vec()).unwrap();
        assert!(matches!(sample().authenticate(&trusted), Err(Error::Unsigned)));
    }
}

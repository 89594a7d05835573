//! Publication data, publication records and publication strings
//!
//! A publication is a `(time, digest)` pair committed to by the calendar and
//! published in print and online media. The base-32 publication string is
//! the human-transcribable form users quote as a trust anchor:
//!
//! ```text
//! base32( time: u64 BE || imprint || crc32(time || imprint): u32 BE )
//! ```
//!
//! grouped with `-` every six characters.

use crate::error::{Error, Result};
use crate::hash::DataHash;
use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of characters between dashes in a formatted publication string
const GROUP_LEN: usize = 6;

/// A published `(time, digest)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationData {
    /// Publication time (seconds since the Unix epoch)
    pub publication_time: u64,
    /// Calendar root hash at the publication time
    pub published_hash: DataHash,
}

impl PublicationData {
    /// Create new publication data
    pub fn new(publication_time: u64, published_hash: DataHash) -> Self {
        Self {
            publication_time,
            published_hash,
        }
    }

    /// Encode as a dash-grouped base-32 publication string
    pub fn to_base32(&self) -> String {
        let mut payload = Vec::with_capacity(8 + 1 + self.published_hash.digest().len() + 4);
        payload.extend_from_slice(&self.publication_time.to_be_bytes());
        payload.extend_from_slice(&self.published_hash.imprint());
        let crc = crc32fast::hash(&payload);
        payload.extend_from_slice(&crc.to_be_bytes());

        let encoded = BASE32_NOPAD.encode(&payload);
        encoded
            .as_bytes()
            .chunks(GROUP_LEN)
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Decode a base-32 publication string; dashes are ignored
    pub fn from_base32(s: &str) -> Result<Self> {
        let compact: String = s
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        let bytes = BASE32_NOPAD
            .decode(compact.as_bytes())
            .map_err(|e| Error::InvalidPublicationString(format!("invalid base32: {}", e)))?;

        // time (8) + algorithm id (1) + crc (4) is the minimum
        if bytes.len() < 13 {
            return Err(Error::InvalidPublicationString(format!(
                "too short: {} bytes",
                bytes.len()
            )));
        }

        let (body, crc_bytes) = bytes.split_at(bytes.len() - 4);
        let expected_crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
        let actual_crc = crc32fast::hash(body);
        if expected_crc != actual_crc {
            return Err(Error::InvalidPublicationString(format!(
                "CRC mismatch: expected {:08x}, computed {:08x}",
                expected_crc, actual_crc
            )));
        }

        let (time_bytes, imprint) = body.split_at(8);
        let mut time = [0u8; 8];
        time.copy_from_slice(time_bytes);
        let published_hash = DataHash::from_imprint(imprint)
            .map_err(|e| Error::InvalidPublicationString(e.to_string()))?;

        Ok(Self::new(u64::from_be_bytes(time), published_hash))
    }
}

impl FromStr for PublicationData {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base32(s)
    }
}

impl std::fmt::Display for PublicationData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_base32())
    }
}

/// A publication together with where it was published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRecord {
    /// The published data
    pub published_data: PublicationData,

    /// Bibliographic references to the media where the publication appeared
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,

    /// URIs of online repositories holding the publication
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repository_uris: Vec<String>,
}

impl PublicationRecord {
    /// Create a record with no bibliographic data
    pub fn new(published_data: PublicationData) -> Self {
        Self {
            published_data,
            references: Vec::new(),
            repository_uris: Vec::new(),
        }
    }

    /// Add a bibliographic reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.push(reference.into());
        self
    }

    /// Publication time of the record
    pub fn publication_time(&self) -> u64 {
        self.published_data.publication_time
    }

    /// Published hash of the record
    pub fn published_hash(&self) -> &DataHash {
        &self.published_data.published_hash
    }
}

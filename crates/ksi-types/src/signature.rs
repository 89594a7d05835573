//! Keyless timestamp signature format
//!
//! The signature is the artifact produced by signing and consumed by
//! verification and extension. It is treated as an immutable value: the
//! `with_*` methods consume a value and return a new one, so extending a
//! clone can never disturb the signature it was cloned from.

use crate::chain::{AggregationHashChain, CalendarHashChain};
use crate::error::{Error, Result};
use crate::hash::DataHash;
use crate::publication::PublicationRecord;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Signature media types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// Signature format version 1
    Signature1,
}

impl MediaType {
    /// Get the media type string
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Signature1 => "application/vnd.ksi.signature+json;version=1",
        }
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "application/vnd.ksi.signature+json;version=1" => Ok(MediaType::Signature1),
            _ => Err(Error::InvalidMediaType(s.to_string())),
        }
    }
}

/// A keyless timestamp signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    /// Media type of the signature
    media_type: String,

    /// Chain from the document hash to the aggregation root
    aggregation_chain: AggregationHashChain,

    /// Chain from the aggregation root to a calendar root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    calendar_chain: Option<CalendarHashChain>,

    /// Publication the calendar chain is anchored to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    publication_record: Option<PublicationRecord>,

    /// Identity of the signing client, as reported by the aggregator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signer_identity: Option<String>,
}

impl Signature {
    /// Create a signature from its aggregation chain
    pub fn new(aggregation_chain: AggregationHashChain) -> Self {
        Self {
            media_type: MediaType::Signature1.as_str().to_string(),
            aggregation_chain,
            calendar_chain: None,
            publication_record: None,
            signer_identity: None,
        }
    }

    /// Parse a signature from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let signature: Signature = serde_json::from_str(json).map_err(Error::Json)?;
        signature.version()?;
        Ok(signature)
    }

    /// Parse a signature from raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let signature: Signature = serde_json::from_slice(bytes).map_err(Error::Json)?;
        signature.version()?;
        Ok(signature)
    }

    /// Serialize the signature to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::Json)
    }

    /// Serialize the signature to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::Json)
    }

    /// Get the signature format version
    pub fn version(&self) -> Result<MediaType> {
        MediaType::from_str(&self.media_type)
    }

    /// The media type string
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The chain from the document hash to the aggregation root
    pub fn aggregation_chain(&self) -> &AggregationHashChain {
        &self.aggregation_chain
    }

    /// Signing (aggregation) time in seconds since the Unix epoch
    pub fn signing_time(&self) -> u64 {
        self.aggregation_chain.aggregation_time
    }

    /// The signed document hash
    pub fn document_hash(&self) -> &DataHash {
        &self.aggregation_chain.input_hash
    }

    /// The embedded calendar chain, if any
    pub fn calendar_chain(&self) -> Option<&CalendarHashChain> {
        self.calendar_chain.as_ref()
    }

    /// The embedded publication record, if any
    pub fn publication_record(&self) -> Option<&PublicationRecord> {
        self.publication_record.as_ref()
    }

    /// The signer identity, if known
    pub fn signer_identity(&self) -> Option<&str> {
        self.signer_identity.as_deref()
    }

    /// A signature is extended when it carries a publication record
    pub fn is_extended(&self) -> bool {
        self.publication_record.is_some()
    }

    /// Replace the calendar chain
    pub fn with_calendar_chain(mut self, chain: CalendarHashChain) -> Self {
        self.calendar_chain = Some(chain);
        self
    }

    /// Replace (or remove) the publication record
    pub fn with_publication_record(mut self, record: Option<PublicationRecord>) -> Self {
        self.publication_record = record;
        self
    }

    /// Set the signer identity
    pub fn with_signer_identity(mut self, identity: impl Into<String>) -> Self {
        self.signer_identity = Some(identity.into());
        self
    }
}

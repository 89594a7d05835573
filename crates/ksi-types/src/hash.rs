//! Hash algorithm and imprint types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA2-256
    #[serde(rename = "SHA2_256")]
    Sha2256,
    /// SHA2-384
    #[serde(rename = "SHA2_384")]
    Sha2384,
    /// SHA2-512
    #[serde(rename = "SHA2_512")]
    Sha2512,
}

impl HashAlgorithm {
    /// Get the digest size in bytes for this algorithm
    pub fn digest_size(&self) -> usize {
        match self {
            HashAlgorithm::Sha2256 => 32,
            HashAlgorithm::Sha2384 => 48,
            HashAlgorithm::Sha2512 => 64,
        }
    }

    /// Get the one-byte identifier that prefixes an imprint
    pub fn id(&self) -> u8 {
        match self {
            HashAlgorithm::Sha2256 => 0x01,
            HashAlgorithm::Sha2384 => 0x04,
            HashAlgorithm::Sha2512 => 0x05,
        }
    }

    /// Look up an algorithm by its imprint identifier
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0x01 => Ok(HashAlgorithm::Sha2256),
            0x04 => Ok(HashAlgorithm::Sha2384),
            0x05 => Ok(HashAlgorithm::Sha2512),
            other => Err(Error::InvalidHashAlgorithm(format!(
                "unknown algorithm id 0x{:02x}",
                other
            ))),
        }
    }

    /// Human readable name, as used in imprint strings
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha2256 => "SHA-256",
            HashAlgorithm::Sha2384 => "SHA-384",
            HashAlgorithm::Sha2512 => "SHA-512",
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "sha256" | "sha2256" | "default" => Ok(HashAlgorithm::Sha2256),
            "sha384" | "sha2384" => Ok(HashAlgorithm::Sha2384),
            "sha512" | "sha2512" => Ok(HashAlgorithm::Sha2512),
            _ => Err(Error::InvalidHashAlgorithm(s.to_string())),
        }
    }
}

/// A digest tagged with the algorithm that produced it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDataHash")]
pub struct DataHash {
    /// Hash algorithm used
    algorithm: HashAlgorithm,
    /// Hash digest (base64 encoded in JSON)
    #[serde(with = "crate::base64_bytes")]
    digest: Vec<u8>,
}

impl DataHash {
    /// Create a data hash, checking the digest length against the algorithm
    pub fn new(algorithm: HashAlgorithm, digest: Vec<u8>) -> Result<Self> {
        if digest.len() != algorithm.digest_size() {
            return Err(Error::InvalidDigestLength {
                algorithm: algorithm.to_string(),
                expected: algorithm.digest_size(),
                actual: digest.len(),
            });
        }
        Ok(Self { algorithm, digest })
    }

    /// The algorithm that produced this digest
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// The raw digest bytes
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Binary imprint: algorithm id followed by the digest
    pub fn imprint(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.digest.len());
        out.push(self.algorithm.id());
        out.extend_from_slice(&self.digest);
        out
    }

    /// Parse a binary imprint
    pub fn from_imprint(bytes: &[u8]) -> Result<Self> {
        let (&id, digest) = bytes
            .split_first()
            .ok_or_else(|| Error::InvalidImprint("empty imprint".to_string()))?;
        let algorithm = HashAlgorithm::from_id(id)?;
        Self::new(algorithm, digest.to_vec())
    }

    /// Parse a textual imprint of the form `<alg>:<hex>`
    pub fn parse_imprint(s: &str) -> Result<Self> {
        let (alg, digest_hex) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidImprint(format!("expected <alg>:<hex>, got '{}'", s)))?;
        let algorithm: HashAlgorithm = alg.trim().parse()?;
        let digest = hex::decode(digest_hex.trim())
            .map_err(|e| Error::InvalidImprint(format!("invalid hex: {}", e)))?;
        Self::new(algorithm, digest)
    }

    /// Get the digest as a hex string
    pub fn to_hex(&self) -> String {
        hex::encode(&self.digest)
    }
}

impl std::fmt::Display for DataHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

/// Unchecked wire form, validated into [`DataHash`] on deserialization
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDataHash {
    algorithm: HashAlgorithm,
    #[serde(with = "crate::base64_bytes")]
    digest: Vec<u8>,
}

impl TryFrom<RawDataHash> for DataHash {
    type Error = Error;

    fn try_from(raw: RawDataHash) -> Result<Self> {
        DataHash::new(raw.algorithm, raw.digest)
    }
}

/// Serde helper for base64 encoding/decoding of byte arrays
pub mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s).map_err(serde::de::Error::custom)
    }
}

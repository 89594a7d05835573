//! Ed25519 signature verification using aws-lc-rs

use crate::error::{Error, Result};
use aws_lc_rs::signature::{UnparsedPublicKey, ED25519};
use base64::Engine;

/// A trusted public key for verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationKey {
    /// Raw Ed25519 public key bytes
    bytes: Vec<u8>,
}

impl VerificationKey {
    /// Create a verification key from raw Ed25519 public key bytes
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(Error::InvalidKeyFormat(format!(
                "Ed25519 public key must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self { bytes })
    }

    /// Parse a base64-encoded Ed25519 public key
    pub fn from_base64(s: &str) -> Result<Self> {
        let bytes = base64::engine::general_purpose::STANDARD.decode(s.trim())?;
        Self::new(bytes)
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Verify a signature over data
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        let key = UnparsedPublicKey::new(&ED25519, &self.bytes);
        key.verify(data, signature)
            .map_err(|_| Error::Verification("Ed25519 signature invalid".to_string()))
    }
}

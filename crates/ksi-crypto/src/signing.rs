//! Ed25519 key generation and signing using aws-lc-rs
//!
//! Publications files are signed by the calendar operator. Verification only
//! needs the operator's public key; this key type produces signed files for
//! tests.

use crate::error::{Error, Result};
use aws_lc_rs::{
    rand::SystemRandom,
    signature::{Ed25519KeyPair, KeyPair as AwsKeyPair},
};
use base64::Engine;

/// An Ed25519 key pair
pub struct KeyPair {
    inner: Ed25519KeyPair,
}

impl KeyPair {
    /// Generate a new Ed25519 key pair
    pub fn generate_ed25519() -> Result<Self> {
        let rng = SystemRandom::new();
        let pkcs8 = Ed25519KeyPair::generate_pkcs8(&rng)
            .map_err(|_| Error::KeyGeneration("failed to generate Ed25519 key".to_string()))?;
        Self::from_pkcs8(pkcs8.as_ref())
    }

    /// Load a key pair from a PKCS#8 document
    pub fn from_pkcs8(pkcs8: &[u8]) -> Result<Self> {
        Ok(Self {
            inner: Ed25519KeyPair::from_pkcs8(pkcs8)?,
        })
    }

    /// Raw public key bytes
    pub fn public_key_bytes(&self) -> &[u8] {
        self.inner.public_key().as_ref()
    }

    /// Public key as standard base64
    pub fn public_key_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.public_key_bytes())
    }

    /// Sign data
    pub fn sign(&self, data: &[u8]) -> Vec<u8> {
        self.inner.sign(data).as_ref().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ed25519() {
        let kp = KeyPair::generate_ed25519().unwrap();
        assert_eq!(kp.public_key_bytes().len(), 32);
        assert_eq!(kp.sign(b"data").len(), 64);
    }
}

//! Streaming data hashing using aws-lc-rs

use crate::error::Result;
use aws_lc_rs::digest::{self, Context, SHA256, SHA384, SHA512};
use ksi_types::{DataHash, HashAlgorithm};

/// Size of the chunks streamed through a [`DataHasher`] when hashing files
pub const READ_CHUNK_SIZE: usize = 64 * 1024;

fn algorithm_of(algorithm: HashAlgorithm) -> &'static digest::Algorithm {
    match algorithm {
        HashAlgorithm::Sha2256 => &SHA256,
        HashAlgorithm::Sha2384 => &SHA384,
        HashAlgorithm::Sha2512 => &SHA512,
    }
}

/// Incremental hasher producing a [`DataHash`]
pub struct DataHasher {
    algorithm: HashAlgorithm,
    context: Context,
}

impl DataHasher {
    /// Create a new hasher for the given algorithm
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            context: Context::new(algorithm_of(algorithm)),
        }
    }

    /// Create a hasher configured like the one that produced `hash`
    pub fn matching(hash: &DataHash) -> Self {
        Self::new(hash.algorithm())
    }

    /// The algorithm of this hasher
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Update the hasher with data
    pub fn update(&mut self, data: &[u8]) {
        self.context.update(data);
    }

    /// Finalize and get the digest
    pub fn finalize(self) -> Result<DataHash> {
        let digest = self.context.finish();
        Ok(DataHash::new(self.algorithm, digest.as_ref().to_vec())?)
    }
}

/// Hash a byte slice in one call
pub fn hash_bytes(algorithm: HashAlgorithm, data: &[u8]) -> Result<DataHash> {
    let mut hasher = DataHasher::new(algorithm);
    hasher.update(data);
    hasher.finalize()
}

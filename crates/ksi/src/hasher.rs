//! Hashing of input documents

use crate::error::{Error, Result};
use ksi_crypto::hasher::READ_CHUNK_SIZE;
use ksi_crypto::DataHasher;
use ksi_types::{DataHash, HashAlgorithm};
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Streams a file through a [`DataHasher`]
#[derive(Debug, Clone, Copy)]
pub struct FileHasher {
    algorithm: HashAlgorithm,
}

impl FileHasher {
    /// Hasher for `algorithm`
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Hasher configured like the one that produced `hash`
    pub fn matching(hash: &DataHash) -> Self {
        Self::new(hash.algorithm())
    }

    /// Hash a file, or standard input when `path` is `-`
    pub async fn hash(&self, path: impl AsRef<Path>) -> Result<DataHash> {
        let path = path.as_ref();
        if path == Path::new("-") {
            return self.hash_reader(tokio::io::stdin(), "<stdin>").await;
        }
        let label = path.display().to_string();
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| Error::io(&label, e))?;
        self.hash_reader(file, &label).await
    }

    async fn hash_reader<R: AsyncRead + Unpin>(
        &self,
        mut reader: R,
        label: &str,
    ) -> Result<DataHash> {
        let mut hasher = DataHasher::new(self.algorithm);
        let mut buf = vec![0u8; READ_CHUNK_SIZE];
        loop {
            let n = reader
                .read(&mut buf)
                .await
                .map_err(|e| Error::io(label, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(hasher.finalize()?)
    }
}

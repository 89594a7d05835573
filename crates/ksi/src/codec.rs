//! Loading and saving signatures
//!
//! The path `-` stands for standard input when loading and standard output
//! when saving.

use crate::error::{Error, Result};
use ksi_types::Signature;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn is_stdio(path: &Path) -> bool {
    path == Path::new("-")
}

/// Signature reader and writer
pub struct SignatureCodec;

impl SignatureCodec {
    /// Load a signature from a file or standard input
    pub async fn load(path: impl AsRef<Path>) -> Result<Signature> {
        let path = path.as_ref();
        let bytes = if is_stdio(path) {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .map_err(|e| Error::io("<stdin>", e))?;
            buf
        } else {
            tokio::fs::read(path)
                .await
                .map_err(|e| Error::io(path.display(), e))?
        };
        tracing::debug!("loaded {} byte signature from {}", bytes.len(), path.display());
        Ok(Signature::from_slice(&bytes)?)
    }

    /// Save a signature to a file or standard output
    pub async fn save(signature: &Signature, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut json = signature.to_json_pretty()?;
        json.push('\n');
        if is_stdio(path) {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(json.as_bytes())
                .await
                .map_err(|e| Error::io("<stdout>", e))?;
            stdout.flush().await.map_err(|e| Error::io("<stdout>", e))?;
        } else {
            tokio::fs::write(path, json)
                .await
                .map_err(|e| Error::io(path.display(), e))?;
        }
        tracing::debug!("saved signature to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use ksi_types::{AggregationHashChain, DataHash, HashAlgorithm};

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.ksig");
        let sig = Signature::new(AggregationHashChain {
            aggregation_time: 42,
            input_hash: DataHash::new(HashAlgorithm::Sha2256, vec![7; 32]).unwrap(),
            links: Vec::new(),
        });
        SignatureCodec::save(&sig, &path).await.unwrap();
        assert_eq!(SignatureCodec::load(&path).await.unwrap(), sig);
    }

    #[tokio::test]
    async fn test_load_errors_are_classified() {
        let dir = tempfile::tempdir().unwrap();
        let missing = SignatureCodec::load(dir.path().join("missing.ksig"))
            .await
            .unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::Io);

        let garbage = dir.path().join("garbage.ksig");
        std::fs::write(&garbage, b"not json").unwrap();
        let parse = SignatureCodec::load(&garbage).await.unwrap_err();
        assert_eq!(parse.kind(), ErrorKind::Parse);
    }
}

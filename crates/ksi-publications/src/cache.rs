//! On-disk cache for downloaded publications files
//!
//! The raw file is stored next to a metadata file recording when it expires:
//!
//! ```text
//! cache_dir/
//! ├── publications.json
//! └── publications.meta
//! ```

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Default lifetime of a cached publications file
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheMetadata {
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// File system cache holding the most recent publications file
#[derive(Debug, Clone)]
pub struct PublicationsCache {
    dir: PathBuf,
    ttl: Duration,
}

impl PublicationsCache {
    /// Create a cache in `dir` with the default TTL
    ///
    /// The directory is created on first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Cache directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn data_path(&self) -> PathBuf {
        self.dir.join("publications.json")
    }

    fn meta_path(&self) -> PathBuf {
        self.dir.join("publications.meta")
    }

    /// Cached bytes, if present and not expired
    pub async fn get(&self) -> Result<Option<Vec<u8>>> {
        let metadata: CacheMetadata = match fs::read_to_string(self.meta_path()).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if Utc::now() >= metadata.expires_at {
            tracing::debug!("cached publications file expired at {}", metadata.expires_at);
            self.remove().await;
            return Ok(None);
        }

        match fs::read(self.data_path()).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store bytes, replacing any previous entry
    pub async fn put(&self, data: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;

        let now = Utc::now();
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::days(1));
        let metadata = CacheMetadata {
            created_at: now,
            expires_at: now + ttl,
        };

        // Metadata last; an entry without it reads as a miss
        fs::write(self.data_path(), data).await?;
        fs::write(self.meta_path(), serde_json::to_string_pretty(&metadata)?).await?;
        Ok(())
    }

    /// Drop the cached entry; missing files are ignored
    pub async fn remove(&self) {
        let _ = fs::remove_file(self.meta_path()).await;
        let _ = fs::remove_file(self.data_path()).await;
    }
}

/// Platform-specific default cache directory
pub fn default_cache_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "guardtime", "ksi")
        .ok_or_else(|| Error::Cache("could not determine cache directory".into()))?;
    Ok(dirs.cache_dir().to_path_buf())
}

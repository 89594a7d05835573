//! Publications file retrieval

use crate::error::{Error, Result};
use crate::BoxFuture;
use ksi_crypto::VerificationKey;
use ksi_publications::{PublicationsCache, PublicationsFile};
use std::path::PathBuf;

/// Something that yields an authenticated publications file
pub trait PublicationsSource: Send + Sync {
    /// Retrieve the publications file
    fn fetch(&self) -> BoxFuture<'_, Result<PublicationsFile>>;
}

/// The key publications files are checked against
///
/// A publications file is never used unauthenticated, so a missing key
/// fails every fetch.
pub fn trusted_key(key: Option<&VerificationKey>) -> Result<&VerificationKey> {
    key.ok_or(Error::NotConfigured("publications file key"))
}

/// HTTP client for the publications file endpoint
pub struct PublicationsClient {
    /// Publications file URL
    url: String,
    /// HTTP client
    client: reqwest::Client,
}

impl PublicationsClient {
    /// Create a publications client sharing an existing HTTP client
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// Download the raw publications file
    pub async fn download(&self) -> Result<Vec<u8>> {
        tracing::debug!("downloading publications file from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Api(format!(
                "failed to download publications file: {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(body.to_vec())
    }
}

/// Remote publications file, optionally served from an on-disk cache
pub struct RemotePublications {
    client: PublicationsClient,
    key: Option<VerificationKey>,
    cache: Option<PublicationsCache>,
}

impl RemotePublications {
    /// Create a source downloading through `client`
    pub fn new(client: PublicationsClient, key: Option<VerificationKey>) -> Self {
        Self {
            client,
            key,
            cache: None,
        }
    }

    /// Consult and fill a cache
    pub fn with_cache(mut self, cache: PublicationsCache) -> Self {
        self.cache = Some(cache);
        self
    }

    async fn cached(
        &self,
        cache: &PublicationsCache,
        key: &VerificationKey,
    ) -> Option<PublicationsFile> {
        let bytes = match cache.get().await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("failed to read publications cache: {}", e);
                return None;
            }
        };
        let checked = PublicationsFile::from_slice(&bytes)
            .and_then(|file| file.authenticate(key).map(|()| file));
        match checked {
            Ok(file) => {
                tracing::debug!("using cached publications file in {}", cache.dir().display());
                Some(file)
            }
            Err(e) => {
                tracing::warn!("discarding cached publications file: {}", e);
                cache.remove().await;
                None
            }
        }
    }
}

impl PublicationsSource for RemotePublications {
    fn fetch(&self) -> BoxFuture<'_, Result<PublicationsFile>> {
        Box::pin(async move {
            let key = trusted_key(self.key.as_ref())?;
            if let Some(cache) = &self.cache {
                if let Some(file) = self.cached(cache, key).await {
                    return Ok(file);
                }
            }

            let bytes = self.client.download().await?;
            let file = PublicationsFile::from_slice(&bytes)?;
            file.authenticate(key)?;

            if let Some(cache) = &self.cache {
                if let Err(e) = cache.put(&bytes).await {
                    tracing::warn!("failed to cache publications file: {}", e);
                }
            }
            Ok(file)
        })
    }
}

/// Publications file read from the local file system
pub struct LocalPublications {
    path: PathBuf,
    key: Option<VerificationKey>,
}

impl LocalPublications {
    /// Create a source reading `path`
    pub fn new(path: impl Into<PathBuf>, key: Option<VerificationKey>) -> Self {
        Self {
            path: path.into(),
            key,
        }
    }
}

impl PublicationsSource for LocalPublications {
    fn fetch(&self) -> BoxFuture<'_, Result<PublicationsFile>> {
        Box::pin(async move {
            let key = trusted_key(self.key.as_ref())?;
            let bytes = tokio::fs::read(&self.path)
                .await
                .map_err(ksi_publications::Error::from)?;
            let file = PublicationsFile::from_slice(&bytes)?;
            file.authenticate(key)?;
            Ok(file)
        })
    }
}

/// Stand-in used when no publications URL is configured
pub struct UnconfiguredPublications;

impl PublicationsSource for UnconfiguredPublications {
    fn fetch(&self) -> BoxFuture<'_, Result<PublicationsFile>> {
        Box::pin(async { Err(Error::NotConfigured("publications file URL")) })
    }
}

//! Service endpoint configuration
//!
//! Settings are layered: built-in defaults, then an optional JSON
//! configuration file, then command-line overrides. Every field of
//! [`ServiceSettings`] is optional and an absent field leaves the current
//! value untouched.

use crate::error::{Error, Result};
use crate::extender::{ExtendService, ExtenderClient, UnconfiguredExtender};
use crate::publications::{
    PublicationsClient, PublicationsSource, RemotePublications, UnconfiguredPublications,
};
use ksi_crypto::VerificationKey;
use ksi_publications::PublicationsCache;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default transfer timeout
pub const DEFAULT_TRANSFER_TIMEOUT: Duration = Duration::from_secs(30);

/// A partial configuration layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extender_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publications_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_sec: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_timeout_sec: Option<u64>,
    /// Base64 Ed25519 key the publications file must be signed with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publications_file_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

impl ServiceSettings {
    /// Read a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Resolved endpoints and transport settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    pub signing_url: Option<String>,
    pub extender_url: Option<String>,
    pub publications_url: Option<String>,
    pub connect_timeout: Duration,
    pub transfer_timeout: Duration,
    pub publications_file_key: Option<String>,
    pub cache_dir: Option<PathBuf>,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            signing_url: None,
            extender_url: None,
            publications_url: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            transfer_timeout: DEFAULT_TRANSFER_TIMEOUT,
            publications_file_key: None,
            cache_dir: None,
        }
    }
}

impl ServiceEndpoints {
    /// Apply a settings layer over the current values
    pub fn configure(&mut self, settings: &ServiceSettings) {
        fn set<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                target.clone_from(value);
            }
        }

        set(&mut self.signing_url, &settings.signing_url);
        set(&mut self.extender_url, &settings.extender_url);
        set(&mut self.publications_url, &settings.publications_url);
        set(&mut self.publications_file_key, &settings.publications_file_key);
        set(&mut self.cache_dir, &settings.cache_dir);
        if let Some(secs) = settings.connect_timeout_sec {
            self.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = settings.transfer_timeout_sec {
            self.transfer_timeout = Duration::from_secs(secs);
        }
    }

    /// Build the HTTP client carrying the configured timeouts
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.transfer_timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))
    }

    /// Decode the configured publications file key
    pub fn publications_key(&self) -> Result<Option<VerificationKey>> {
        self.publications_file_key
            .as_deref()
            .map(|key| {
                VerificationKey::from_base64(key)
                    .map_err(|e| Error::Config(format!("publications file key: {}", e)))
            })
            .transpose()
    }

    /// Client for the configured extender
    pub fn extender(&self, client: &reqwest::Client) -> Result<ExtenderClient> {
        let url = self
            .extender_url
            .as_deref()
            .ok_or(Error::NotConfigured("extender URL"))?;
        Ok(ExtenderClient::with_client(url, client.clone()))
    }

    /// Extend service for the configured extender
    ///
    /// Without an extender URL every request fails with
    /// [`Error::NotConfigured`].
    pub fn extend_service(&self, client: &reqwest::Client) -> Box<dyn ExtendService> {
        match self.extender(client) {
            Ok(extender) => Box::new(extender),
            Err(_) => Box::new(UnconfiguredExtender),
        }
    }

    /// Source for the configured publications file
    ///
    /// Without a publications URL every fetch fails with
    /// [`Error::NotConfigured`].
    pub fn publications(&self, client: &reqwest::Client) -> Result<Box<dyn PublicationsSource>> {
        let Some(url) = self.publications_url.as_deref() else {
            return Ok(Box::new(UnconfiguredPublications));
        };
        let mut source = RemotePublications::new(
            PublicationsClient::with_client(url, client.clone()),
            self.publications_key()?,
        );
        if let Some(dir) = &self.cache_dir {
            source = source.with_cache(PublicationsCache::new(dir));
        }
        Ok(Box::new(source))
    }
}

//! Remote collaborators of the verify and extend tasks

use crate::error::Result;
use ksi_client::{ExtendService, LocalPublications, PublicationsSource, ServiceEndpoints};
use ksi_crypto::VerificationKey;
use ksi_publications::PublicationsFile;
use std::path::Path;

/// The services a task may call
pub struct Services {
    /// Extender
    pub extender: Box<dyn ExtendService>,
    /// Publications file source used when no local file is given
    pub publications: Box<dyn PublicationsSource>,
    /// Key local publications files must be signed with
    pub publications_key: Option<VerificationKey>,
}

impl Services {
    /// Build services from resolved endpoints
    ///
    /// Missing URLs are not an error here; the first call to the missing
    /// service fails instead.
    pub fn from_endpoints(endpoints: &ServiceEndpoints) -> Result<Self> {
        let client = endpoints.http_client()?;
        Ok(Self {
            extender: endpoints.extend_service(&client),
            publications: endpoints.publications(&client)?,
            publications_key: endpoints.publications_key()?,
        })
    }

    /// Get the publications file from `local` if given, else from the configured source
    pub async fn fetch_publications(&self, local: Option<&Path>) -> Result<PublicationsFile> {
        let file = match local {
            Some(path) => {
                tracing::debug!("reading publications file {}", path.display());
                LocalPublications::new(path, self.publications_key.clone())
                    .fetch()
                    .await?
            }
            None => self.publications.fetch().await?,
        };
        Ok(file)
    }
}

//! Publications file verification task

use crate::error::{Error, Result};
use crate::services::Services;
use ksi_publications::PublicationsFile;
use std::path::Path;

/// An authenticated publications file
#[derive(Debug)]
pub struct PubfileOutcome {
    pub file: PublicationsFile,
}

/// Fetch and authenticate a publications file
///
/// `local` reads a file from disk instead of the configured source. A
/// trusted key is required: a file that cannot be authenticated has not
/// been verified.
pub async fn run_pubfile_verify(
    local: Option<&Path>,
    services: &Services,
) -> Result<PubfileOutcome> {
    if services.publications_key.is_none() {
        return Err(Error::NotConfigured("publications file key"));
    }
    let file = services.fetch_publications(local).await?;
    if let Some(latest) = file.latest() {
        tracing::debug!("latest publication {}", latest.published_data);
    }
    Ok(PubfileOutcome { file })
}

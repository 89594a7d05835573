//! Resolution of service endpoints from defaults, file and flags

use crate::cli::GlobalOptions;
use ksi::client::{ServiceEndpoints, ServiceSettings};
use ksi::publications::default_cache_dir;

/// Layer defaults, the configuration file and command-line flags
///
/// `--cache` falls back to the platform cache directory when no cache
/// directory was configured.
pub fn resolve_endpoints(options: &GlobalOptions) -> ksi::Result<ServiceEndpoints> {
    let mut endpoints = ServiceEndpoints::default();
    if let Some(path) = &options.conf {
        tracing::debug!("reading configuration from {}", path.display());
        endpoints.configure(&ServiceSettings::from_file(path)?);
    }
    endpoints.configure(&options.settings());
    if options.cache && endpoints.cache_dir.is_none() {
        endpoints.cache_dir = Some(default_cache_dir()?);
    }
    Ok(endpoints)
}

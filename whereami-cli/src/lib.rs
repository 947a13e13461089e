//! whereami-cli
//!
//! Front-ends over the `whereami` resolver: a one-shot lookup that prints a
//! JSON payload, and an axum REST facade serving `GET /geo/{address}`.
#![warn(missing_docs)]

/// Boundary payload rendering shared by both front-ends.
pub mod payload;
/// REST facade.
pub mod server;

use std::path::Path;

use whereami::{GeoError, ProviderFactory, Resolver, ServiceConfig};

/// Environment variable overriding the configuration path.
pub const CONFIG_ENV: &str = "WHEREAMI_CONFIG";
/// Configuration path used when neither flag nor environment names one.
pub const DEFAULT_CONFIG: &str = "config.yml";

/// Load the configuration at `path` and build the resolver once.
///
/// # Errors
/// Returns `GeoError::Config` if the file cannot be read or validated.
pub fn load_resolver(path: &Path) -> Result<Resolver, GeoError> {
    let config = ServiceConfig::from_path(path)?;
    tracing::info!(
        path = %path.display(),
        services = config.len(),
        "configuration loaded"
    );
    ProviderFactory::with_defaults().build(&config)
}

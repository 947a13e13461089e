use std::time::Duration;

use async_trait::async_trait;

use crate::{GeoError, LookupResult, ProviderKey, ProviderSettings};

/// Main provider trait implemented by adapter crates.
///
/// An adapter holds only immutable configuration, so one instance can serve
/// any number of concurrent lookups.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Configured name of this provider (e.g. "Google Maps API").
    ///
    /// Results and errors are attributed to this name.
    fn name(&self) -> &str;

    /// Typed key constructed from the configured name.
    fn key(&self) -> ProviderKey {
        ProviderKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Deadline applied to a single lookup.
    fn timeout(&self) -> Duration;

    /// Resolve `query` to the coordinates of the backend's first result.
    ///
    /// Issues exactly one outbound request and never retries.
    ///
    /// # Errors
    /// Returns `GeoError::Lookup` classified from the backend's failure signal.
    async fn lookup(&self, query: &str) -> Result<LookupResult, GeoError>;
}

/// Providers that can be built from a configuration entry.
///
/// Construction validates settings only; it never touches the network.
pub trait ConfigurableProvider: GeoProvider + Sized + 'static {
    /// Credential fields this provider requires, in validation order.
    const REQUIRED_CREDENTIALS: &'static [&'static str];

    /// Build the provider under the configured `name`.
    ///
    /// # Errors
    /// Returns `GeoError::Config` if a required credential is missing or a
    /// setting is invalid.
    fn from_settings(name: &str, settings: &ProviderSettings) -> Result<Self, GeoError>;
}

/// Check that `settings` carries every field in `required`.
///
/// # Errors
/// Returns `GeoError::Config` naming the first missing field and the provider.
pub fn require_credentials(
    provider: &str,
    settings: &ProviderSettings,
    required: &[&str],
) -> Result<(), GeoError> {
    match required
        .iter()
        .find(|field| settings.credential(field).is_none())
    {
        Some(field) => Err(GeoError::missing_credential(provider, field)),
        None => Ok(()),
    }
}

/// Fetch a required credential, failing with a configuration error.
///
/// # Errors
/// Returns `GeoError::Config` if `field` is absent.
pub fn credential<'a>(
    provider: &str,
    settings: &'a ProviderSettings,
    field: &str,
) -> Result<&'a str, GeoError> {
    settings
        .credential(field)
        .ok_or_else(|| GeoError::missing_credential(provider, field))
}

//! whereami-google
//!
//! Provider that implements `GeoProvider` on top of the Google Maps
//! Geocoding API. One lookup is one `GET /maps/api/geocode/json` request;
//! the first result's `geometry.location` is reported.
//!
//! Configuration entry:
//!
//! ```yaml
//! services:
//!   Google Maps API:
//!     credentials:
//!       api_key: "..."
//!     timeout: 5
//! ```
#![warn(missing_docs)]

mod response;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;
use whereami_core::{
    ConfigurableProvider, GeoError, GeoProvider, LookupResult, ProviderSettings, credential,
    require_credentials, transport,
};

/// Vendor base URL used when no `endpoint` is configured.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";
const GEOCODE_PATH: &str = "/maps/api/geocode/json";

/// Google Maps geocoding provider.
pub struct GoogleProvider {
    name: String,
    api_key: String,
    url: Url,
    client: reqwest::Client,
    timeout: Duration,
}

impl GoogleProvider {
    /// Conventional configuration name for this provider.
    pub const DEFAULT_NAME: &'static str = "Google Maps API";

    /// Build a provider with an explicit key and deadline against the vendor endpoint.
    ///
    /// # Errors
    /// Returns `GeoError::Config` if the HTTP client cannot be constructed.
    pub fn new(
        name: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GeoError> {
        let settings = ProviderSettings::new(timeout).with_credential("api_key", api_key);
        Self::from_settings(&name.into(), &settings)
    }

    /// Request URL for `query`, key included.
    fn request_url(&self, query: &str) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("address", query)
            .append_pair("key", &self.api_key);
        url
    }
}

impl fmt::Debug for GoogleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleProvider")
            .field("name", &self.name)
            .field("url", &self.url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ConfigurableProvider for GoogleProvider {
    const REQUIRED_CREDENTIALS: &'static [&'static str] = &["api_key"];

    fn from_settings(name: &str, settings: &ProviderSettings) -> Result<Self, GeoError> {
        require_credentials(name, settings, Self::REQUIRED_CREDENTIALS)?;
        let api_key = credential(name, settings, "api_key")?.to_string();
        let url = transport::endpoint_url(
            name,
            settings.endpoint.as_deref(),
            DEFAULT_BASE_URL,
            GEOCODE_PATH,
        )?;
        let client = transport::build_client(name, settings.timeout)?;
        Ok(Self {
            name: name.to_string(),
            api_key,
            url,
            client,
            timeout: settings.timeout,
        })
    }
}

#[async_trait]
impl GeoProvider for GoogleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn vendor(&self) -> &'static str {
        "Google"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "whereami_google::lookup",
            skip(self),
            fields(provider = %self.name),
        )
    )]
    async fn lookup(&self, query: &str) -> Result<LookupResult, GeoError> {
        let raw =
            transport::get(&self.name, &self.client, self.request_url(query), self.timeout).await?;
        let coordinates = response::interpret(&self.name, query, &raw)?;
        Ok(LookupResult::new(self.name.clone(), coordinates))
    }
}

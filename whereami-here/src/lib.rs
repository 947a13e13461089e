//! whereami-here
//!
//! Provider that implements `GeoProvider` on top of the HERE Geocoder 6.2
//! REST API. The first view's first result is reported using its
//! `DisplayPosition`.
//!
//! Configuration entry:
//!
//! ```yaml
//! services:
//!   HERE:
//!     credentials:
//!       app_id: "..."
//!       app_code: "..."
//!     timeout: 2.5
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
pub const DEFAULT_BASE_URL: &str = "https://geocoder.api.here.com";
const GEOCODE_PATH: &str = "/6.2/geocode.json";
// Response generation the parser is written against.
const API_GENERATION: &str = "9";

/// HERE geocoding provider.
pub struct HereProvider {
    name: String,
    app_id: String,
    app_code: String,
    url: Url,
    client: reqwest::Client,
    timeout: Duration,
}

impl HereProvider {
    /// Conventional configuration name for this provider.
    pub const DEFAULT_NAME: &'static str = "HERE";

    /// Build a provider with explicit application credentials against the vendor endpoint.
    ///
    /// # Errors
    /// Returns `GeoError::Config` if the HTTP client cannot be constructed.
    pub fn new(
        name: impl Into<String>,
        app_id: impl Into<String>,
        app_code: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GeoError> {
        let settings = ProviderSettings::new(timeout)
            .with_credential("app_id", app_id)
            .with_credential("app_code", app_code);
        Self::from_settings(&name.into(), &settings)
    }

    fn request_url(&self, query: &str) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("searchtext", query)
            .append_pair("app_id", &self.app_id)
            .append_pair("app_code", &self.app_code)
            .append_pair("gen", API_GENERATION);
        url
    }
}

impl fmt::Debug for HereProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HereProvider")
            .field("name", &self.name)
            .field("app_id", &self.app_id)
            .field("url", &self.url.as_str())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ConfigurableProvider for HereProvider {
    const REQUIRED_CREDENTIALS: &'static [&'static str] = &["app_id", "app_code"];

    fn from_settings(name: &str, settings: &ProviderSettings) -> Result<Self, GeoError> {
        require_credentials(name, settings, Self::REQUIRED_CREDENTIALS)?;
        let url = transport::endpoint_url(
            name,
            settings.endpoint.as_deref(),
            DEFAULT_BASE_URL,
            GEOCODE_PATH,
        )?;
        Ok(Self {
            name: name.to_string(),
            app_id: credential(name, settings, "app_id")?.to_string(),
            app_code: credential(name, settings, "app_code")?.to_string(),
            url,
            client: transport::build_client(name, settings.timeout)?,
            timeout: settings.timeout,
        })
    }
}

#[async_trait]
impl GeoProvider for HereProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn vendor(&self) -> &'static str {
        "HERE"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "whereami_here::lookup",
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

//! Configuration types shared by the factory, the resolver and the front-ends.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::GeoError;

/// Settings for one configured provider: credentials, deadline and an
/// optional endpoint override.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Backend-specific credential fields (e.g. `api_key`, `app_id`).
    pub credentials: BTreeMap<String, String>,
    /// Deadline for a single outbound request.
    pub timeout: Duration,
    /// Base URL replacing the vendor default, if set.
    pub endpoint: Option<String>,
}

impl ProviderSettings {
    /// Settings with the given timeout and no credentials.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            credentials: BTreeMap::new(),
            timeout,
            endpoint: None,
        }
    }

    /// Add or replace a credential field.
    #[must_use]
    pub fn with_credential(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.credentials.insert(key.into(), value.into());
        self
    }

    /// Override the vendor base URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Look up a credential field.
    #[must_use]
    pub fn credential(&self, key: &str) -> Option<&str> {
        self.credentials.get(key).map(String::as_str)
    }
}

// Credential values stay out of logs.
impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("credentials", &self.credentials.keys().collect::<Vec<_>>())
            .field("timeout", &self.timeout)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Resolver-wide options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Optional overall deadline for one resolution across all providers.
    pub request_timeout: Option<Duration>,
}

/// Ordered provider configuration. Entry order is the preference order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Provider name → settings, most preferred first.
    pub services: IndexMap<String, ProviderSettings>,
    /// Resolver-wide options.
    pub resolver: ResolverConfig,
}

impl ServiceConfig {
    /// An empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append (or replace in place) a provider entry.
    #[must_use]
    pub fn with_service(mut self, name: impl Into<String>, settings: ProviderSettings) -> Self {
        self.services.insert(name.into(), settings);
        self
    }

    /// Set the overall request deadline.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.resolver.request_timeout = Some(timeout);
        self
    }

    /// Iterate entries in preference order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProviderSettings)> {
        self.services.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of configured providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether no provider is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Read and parse a YAML configuration file.
    ///
    /// # Errors
    /// Returns `GeoError::Config` if the file cannot be read or does not
    /// describe a valid configuration.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GeoError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            GeoError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Parse a YAML configuration document.
    ///
    /// Provider names are not checked here; that is the factory's job.
    ///
    /// # Errors
    /// Returns `GeoError::Config` on malformed YAML, a missing `services`
    /// mapping, an entry without `credentials` or `timeout`, a non-scalar
    /// credential value, or a timeout that is not a positive number.
    pub fn from_yaml_str(text: &str) -> Result<Self, GeoError> {
        let raw: RawDocument = serde_yaml::from_str(text)
            .map_err(|e| GeoError::config(format!("malformed configuration: {e}")))?;

        let entries = raw
            .services
            .ok_or_else(|| GeoError::config("missing top-level 'services' list"))?;

        let mut services = IndexMap::with_capacity(entries.len());
        for (name, entry) in entries {
            let entry = entry.unwrap_or_default();
            let raw_creds = entry.credentials.ok_or_else(|| {
                GeoError::config(format!("service '{name}' is missing 'credentials'"))
            })?;
            let secs = entry.timeout.ok_or_else(|| {
                GeoError::config(format!("service '{name}' is missing 'timeout'"))
            })?;
            let timeout = parse_timeout(secs)
                .ok_or_else(|| GeoError::config(format!("service '{name}' has invalid timeout")))?;

            let mut credentials = BTreeMap::new();
            for (key, value) in raw_creds {
                let value = scalar_to_string(value).ok_or_else(|| {
                    GeoError::config(format!(
                        "credential '{key}' of service '{name}' must be a scalar"
                    ))
                })?;
                credentials.insert(key, value);
            }

            services.insert(
                name,
                ProviderSettings {
                    credentials,
                    timeout,
                    endpoint: entry.endpoint,
                },
            );
        }

        let request_timeout = raw
            .request_timeout
            .map(|secs| {
                parse_timeout(secs)
                    .ok_or_else(|| GeoError::config("invalid top-level 'request_timeout'"))
            })
            .transpose()?;

        Ok(Self {
            services,
            resolver: ResolverConfig { request_timeout },
        })
    }
}

#[derive(Deserialize)]
struct RawDocument {
    services: Option<IndexMap<String, Option<RawService>>>,
    request_timeout: Option<f64>,
}

#[derive(Deserialize, Default)]
struct RawService {
    credentials: Option<IndexMap<String, serde_yaml::Value>>,
    timeout: Option<f64>,
    endpoint: Option<String>,
}

fn parse_timeout(secs: f64) -> Option<Duration> {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}

fn scalar_to_string(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

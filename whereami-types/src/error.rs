use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code reported for configuration errors at the boundary layer.
pub const CONFIG_ERROR_CODE: u16 = 500;

/// Classification of a single provider's failed lookup.
///
/// Each kind maps to a stable numeric code. The codes are shaped like HTTP
/// statuses so a front-end can expose them directly, but inside the resolver
/// they are an opaque classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LookupErrorKind {
    /// The backend rejected the outgoing query as malformed.
    BadQuery,
    /// The backend rejected the configured credentials.
    InvalidCredentials,
    /// The backend answered with a structurally valid but empty result set.
    NotFound,
    /// The request did not complete within the provider's deadline.
    Timeout,
    /// The backend could not be reached or reported it is unable to serve.
    ServiceUnavailable,
    /// The backend answered with a body lacking the expected fields.
    BadUpstreamPayload,
}

impl LookupErrorKind {
    /// Every lookup kind, in code order.
    pub const ALL: [Self; 6] = [
        Self::BadQuery,
        Self::InvalidCredentials,
        Self::NotFound,
        Self::Timeout,
        Self::BadUpstreamPayload,
        Self::ServiceUnavailable,
    ];

    /// Stable numeric classification code for this kind.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::BadQuery => 400,
            Self::InvalidCredentials => 401,
            Self::NotFound => 404,
            Self::Timeout => 408,
            Self::BadUpstreamPayload => 502,
            Self::ServiceUnavailable => 503,
        }
    }

    /// Short human-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadQuery => "bad query",
            Self::InvalidCredentials => "invalid credentials",
            Self::NotFound => "not found",
            Self::Timeout => "timed out",
            Self::ServiceUnavailable => "service unavailable",
            Self::BadUpstreamPayload => "bad upstream payload",
        }
    }
}

impl fmt::Display for LookupErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the whereami workspace.
///
/// `Config` is raised while building a resolver and is always fatal.
/// `Lookup` is raised by a single provider attempt; the resolver absorbs it
/// and moves on to the next provider unless it came from the last one.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeoError {
    /// The resolver setup is invalid (unknown provider, missing field, bad document).
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of what is wrong.
        message: String,
    },

    /// A single provider failed to resolve the query.
    #[error("{provider}: {kind}: {message}")]
    Lookup {
        /// Configured name of the provider that failed.
        provider: String,
        /// Classification of the failure.
        kind: LookupErrorKind,
        /// Human-readable error message.
        message: String,
    },
}

impl GeoError {
    /// Helper: build a `Config` error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Helper: the error returned when resolving against an empty chain.
    #[must_use]
    pub fn no_services() -> Self {
        Self::config("no configured services")
    }

    /// Helper: a configuration entry names a provider nobody registered.
    pub fn unknown_service(name: impl AsRef<str>) -> Self {
        Self::config(format!("unknown geocoding service: {}", name.as_ref()))
    }

    /// Helper: a provider entry lacks a credential its adapter requires.
    pub fn missing_credential(provider: impl AsRef<str>, field: impl AsRef<str>) -> Self {
        Self::config(format!(
            "service '{}' is missing required credential '{}'",
            provider.as_ref(),
            field.as_ref()
        ))
    }

    /// Helper: build a `Lookup` error of the given kind.
    pub fn lookup(
        provider: impl Into<String>,
        kind: LookupErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self::Lookup {
            provider: provider.into(),
            kind,
            message: message.into(),
        }
    }

    /// Helper: build a `BadQuery` lookup error.
    pub fn bad_query(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::lookup(provider, LookupErrorKind::BadQuery, message)
    }

    /// Helper: build an `InvalidCredentials` lookup error.
    pub fn invalid_credentials(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::lookup(provider, LookupErrorKind::InvalidCredentials, message)
    }

    /// Helper: build a `NotFound` lookup error for the given query.
    pub fn not_found(provider: impl Into<String>, query: &str) -> Self {
        Self::lookup(
            provider,
            LookupErrorKind::NotFound,
            format!("no result found for {query:?}"),
        )
    }

    /// Helper: build a `Timeout` lookup error.
    pub fn timeout(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::lookup(provider, LookupErrorKind::Timeout, message)
    }

    /// Helper: build a `ServiceUnavailable` lookup error.
    pub fn service_unavailable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::lookup(provider, LookupErrorKind::ServiceUnavailable, message)
    }

    /// Helper: build a `BadUpstreamPayload` lookup error.
    pub fn bad_upstream_payload(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::lookup(provider, LookupErrorKind::BadUpstreamPayload, message)
    }

    /// Stable numeric code for this error.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Config { .. } => CONFIG_ERROR_CODE,
            Self::Lookup { kind, .. } => kind.code(),
        }
    }

    /// The lookup classification, or `None` for configuration errors.
    #[must_use]
    pub const fn lookup_kind(&self) -> Option<LookupErrorKind> {
        match self {
            Self::Config { .. } => None,
            Self::Lookup { kind, .. } => Some(*kind),
        }
    }

    /// Name of the provider that produced this error, if any.
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::Config { .. } => None,
            Self::Lookup { provider, .. } => Some(provider),
        }
    }

    /// The bare message without the provider/kind prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Config { message } | Self::Lookup { message, .. } => message,
        }
    }

    /// Returns true for construction-time errors.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Returns true if the resolver may fall through to the next provider.
    ///
    /// Lookup errors are recoverable within a chain; configuration errors never are.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }
}

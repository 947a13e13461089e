//! HTTP plumbing shared by adapter crates.
//!
//! Only vendor-neutral failures are classified here: transport errors and
//! undecodable bodies. Mapping backend status codes and error bodies onto
//! [`LookupErrorKind`](crate::LookupErrorKind) is vendor knowledge and stays in
//! each adapter.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::GeoError;

const USER_AGENT: &str = concat!("whereami/", env!("CARGO_PKG_VERSION"));

/// Raw response of a provider request.
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Full response body.
    pub body: Vec<u8>,
}

/// Build the HTTP client an adapter keeps for its lifetime.
///
/// # Errors
/// Returns `GeoError::Config` if the client cannot be constructed.
pub fn build_client(provider: &str, timeout: Duration) -> Result<reqwest::Client, GeoError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| GeoError::config(format!("service '{provider}': cannot build client: {e}")))
}

/// Join `path` onto the configured endpoint, or onto `default_base`.
///
/// Any path already present on the endpoint is kept as a prefix.
///
/// # Errors
/// Returns `GeoError::Config` if the endpoint is not an absolute http(s) URL.
pub fn endpoint_url(
    provider: &str,
    endpoint: Option<&str>,
    default_base: &str,
    path: &str,
) -> Result<Url, GeoError> {
    let base = endpoint.unwrap_or(default_base).trim_end_matches('/');
    let url = Url::parse(&format!("{base}{path}")).map_err(|e| {
        GeoError::config(format!("service '{provider}': invalid endpoint {base:?}: {e}"))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(GeoError::config(format!(
            "service '{provider}': unsupported endpoint scheme {other:?}"
        ))),
    }
}

/// Map a client failure onto the shared lookup kinds.
#[must_use]
pub fn classify_transport_error(provider: &str, err: &reqwest::Error) -> GeoError {
    if err.is_timeout() {
        GeoError::timeout(provider, "request exceeded the provider deadline")
    } else if err.is_body() || err.is_decode() {
        GeoError::bad_upstream_payload(provider, format!("unreadable response body: {err}"))
    } else if err.is_connect() {
        GeoError::service_unavailable(provider, format!("connection failed: {err}"))
    } else {
        GeoError::service_unavailable(provider, format!("request failed: {err}"))
    }
}

/// Issue one GET request and read the whole body.
///
/// The adapter's deadline covers both the send and the body read.
///
/// # Errors
/// Returns a classified `GeoError::Lookup` on any transport failure.
pub async fn get(
    provider: &str,
    client: &reqwest::Client,
    url: Url,
    timeout: Duration,
) -> Result<RawResponse, GeoError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| classify_transport_error(provider, &e))?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| classify_transport_error(provider, &e))?;

    #[cfg(feature = "tracing")]
    tracing::debug!(provider, status = %status, bytes = body.len(), "provider responded");

    Ok(RawResponse {
        status,
        body: body.to_vec(),
    })
}

/// Decode a JSON body, mapping failures to `BadUpstreamPayload`.
///
/// # Errors
/// Returns `GeoError::Lookup` with kind `BadUpstreamPayload` if the body is
/// not JSON or lacks fields required by `T`.
pub fn decode_json<T: DeserializeOwned>(provider: &str, body: &[u8]) -> Result<T, GeoError> {
    serde_json::from_slice(body)
        .map_err(|e| GeoError::bad_upstream_payload(provider, format!("unexpected response: {e}")))
}

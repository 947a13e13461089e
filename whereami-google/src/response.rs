//! Google Geocoding API response shape and failure mapping.

use reqwest::StatusCode;
use serde::Deserialize;
use whereami_core::transport::{RawResponse, decode_json};
use whereami_core::{Coordinates, GeoError, LookupErrorKind};

#[derive(Deserialize)]
struct GeocodeResponse {
    status: Option<String>,
    results: Option<Vec<serde_json::Value>>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Backend `status` values that signal a failure, and their kinds.
///
/// `OK` is handled by the caller; unlisted values are treated as a bad payload.
fn status_kind(status: &str) -> Option<LookupErrorKind> {
    match status {
        "ZERO_RESULTS" => Some(LookupErrorKind::NotFound),
        "REQUEST_DENIED" => Some(LookupErrorKind::InvalidCredentials),
        "INVALID_REQUEST" => Some(LookupErrorKind::BadQuery),
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" | "UNKNOWN_ERROR" => {
            Some(LookupErrorKind::ServiceUnavailable)
        }
        _ => None,
    }
}

fn http_kind(status: StatusCode) -> LookupErrorKind {
    match status.as_u16() {
        400 => LookupErrorKind::BadQuery,
        401 | 403 => LookupErrorKind::InvalidCredentials,
        408 | 504 => LookupErrorKind::Timeout,
        _ => LookupErrorKind::ServiceUnavailable,
    }
}

/// Turn a raw Google response into the first result's coordinates.
pub(crate) fn interpret(
    provider: &str,
    query: &str,
    raw: &RawResponse,
) -> Result<Coordinates, GeoError> {
    if !raw.status.is_success() {
        let detail = serde_json::from_slice::<GeocodeResponse>(&raw.body)
            .ok()
            .and_then(|b| b.error_message)
            .unwrap_or_else(|| format!("HTTP {}", raw.status));
        return Err(GeoError::lookup(provider, http_kind(raw.status), detail));
    }

    let body: GeocodeResponse = decode_json(provider, &raw.body)?;

    if let Some(status) = body.status.as_deref()
        && status != "OK"
    {
        return Err(match status_kind(status) {
            Some(LookupErrorKind::NotFound) => GeoError::not_found(provider, query),
            Some(kind) => GeoError::lookup(
                provider,
                kind,
                body.error_message
                    .unwrap_or_else(|| format!("backend status {status}")),
            ),
            None => GeoError::bad_upstream_payload(
                provider,
                format!("unrecognized backend status {status:?}"),
            ),
        });
    }

    let first = body
        .results
        .ok_or_else(|| GeoError::bad_upstream_payload(provider, "response lacks 'results'"))?
        .into_iter()
        .next()
        .ok_or_else(|| GeoError::not_found(provider, query))?;

    let result: GeocodeResult = serde_json::from_value(first).map_err(|e| {
        GeoError::bad_upstream_payload(provider, format!("result lacks geometry.location: {e}"))
    })?;
    Ok(Coordinates::new(
        result.geometry.location.lat,
        result.geometry.location.lng,
    ))
}

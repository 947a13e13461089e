//! HERE Geocoder 6.2 response shape and failure mapping.

use reqwest::StatusCode;
use serde::Deserialize;
use whereami_core::transport::{RawResponse, decode_json};
use whereami_core::{Coordinates, GeoError, LookupErrorKind};

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GeocodeResponse {
    response: ResponseBody,
}

// Views and results stay untyped so only the first one has to be well formed.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResponseBody {
    view: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct View {
    #[serde(default)]
    result: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GeocodeResult {
    location: Location,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Location {
    display_position: DisplayPosition,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DisplayPosition {
    latitude: f64,
    longitude: f64,
}

/// Error document returned by the geocoder on rejected requests.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: String,
    subtype: Option<String>,
    #[serde(rename = "Details")]
    details: Option<String>,
}

fn error_body_kind(kind: &str, subtype: Option<&str>) -> Option<LookupErrorKind> {
    match (kind, subtype) {
        ("PermissionError", _) | (_, Some("InvalidCredentials")) => {
            Some(LookupErrorKind::InvalidCredentials)
        }
        ("ApplicationError", Some("InvalidInputData")) => Some(LookupErrorKind::BadQuery),
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

fn classify_error_body(provider: &str, raw: &RawResponse) -> Option<GeoError> {
    let body: ErrorBody = serde_json::from_slice(&raw.body).ok()?;
    let kind = error_body_kind(&body.kind, body.subtype.as_deref())?;
    let message = body.details.unwrap_or_else(|| match body.subtype {
        Some(subtype) => format!("{}: {subtype}", body.kind),
        None => body.kind,
    });
    Some(GeoError::lookup(provider, kind, message))
}

/// Turn a raw HERE response into the first result's display position.
pub(crate) fn interpret(
    provider: &str,
    query: &str,
    raw: &RawResponse,
) -> Result<Coordinates, GeoError> {
    if let Some(err) = classify_error_body(provider, raw) {
        return Err(err);
    }
    if !raw.status.is_success() {
        return Err(GeoError::lookup(
            provider,
            http_kind(raw.status),
            format!("HTTP {}", raw.status),
        ));
    }

    let body: GeocodeResponse = decode_json(provider, &raw.body)?;
    let Some(view) = body.response.view.into_iter().next() else {
        return Err(GeoError::not_found(provider, query));
    };
    let view: View = serde_json::from_value(view).map_err(|e| {
        GeoError::bad_upstream_payload(provider, format!("malformed View entry: {e}"))
    })?;
    let first = view
        .result
        .into_iter()
        .next()
        .ok_or_else(|| GeoError::not_found(provider, query))?;
    let result: GeocodeResult = serde_json::from_value(first).map_err(|e| {
        GeoError::bad_upstream_payload(
            provider,
            format!("result lacks Location.DisplayPosition: {e}"),
        )
    })?;
    let position = result.location.display_position;

    Ok(Coordinates::new(position.latitude, position.longitude))
}

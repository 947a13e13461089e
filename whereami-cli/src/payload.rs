use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use whereami::{ErrorPayload, GeoError, LookupResult, SuccessPayload};

/// Outcome of one resolution as exposed at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `{"status":"success","result":{..}}`
    Success(SuccessPayload),
    /// `{"status":<message>,"code":<integer>}`
    Failure(ErrorPayload),
}

impl Payload {
    /// Render a resolver outcome.
    #[must_use]
    pub fn from_outcome(outcome: &Result<LookupResult, GeoError>) -> Self {
        match outcome {
            Ok(hit) => Self::Success(SuccessPayload::from(hit)),
            Err(e) => Self::Failure(ErrorPayload::from(e)),
        }
    }

    /// Whether this is a success payload.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// HTTP status for this payload: 200 on success, otherwise the error code.
    #[must_use]
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success(_) => StatusCode::OK,
            Self::Failure(e) => {
                StatusCode::from_u16(e.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// Serialize to a JSON string.
    ///
    /// # Errors
    /// Returns the serializer error; not expected for these payload types.
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            Self::Success(p) => serde_json::to_string(p),
            Self::Failure(p) => serde_json::to_string(p),
        }
    }
}

impl IntoResponse for Payload {
    fn into_response(self) -> Response {
        let status = self.http_status();
        match self {
            Self::Success(p) => (status, Json(p)).into_response(),
            Self::Failure(p) => (status, Json(p)).into_response(),
        }
    }
}

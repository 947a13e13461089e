//! Wire payloads exposed by the front-ends.

use serde::{Deserialize, Serialize};

use crate::error::GeoError;
use crate::location::{Coordinates, LookupResult};

/// Value of `status` in a successful payload.
pub const SUCCESS_STATUS: &str = "success";

/// `{"status":"success","result":{"service":..,"location":{"lat":..,"lng":..}}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessPayload {
    /// Always [`SUCCESS_STATUS`].
    pub status: String,
    /// The resolved location.
    pub result: ResultBody,
}

/// Body of a successful payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBody {
    /// Name of the provider that answered.
    pub service: String,
    /// Resolved coordinates.
    pub location: Coordinates,
}

/// `{"status":<message>,"code":<integer>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Human-readable error message.
    pub status: String,
    /// Classification code of the error.
    pub code: u16,
}

impl From<&LookupResult> for SuccessPayload {
    fn from(r: &LookupResult) -> Self {
        Self {
            status: SUCCESS_STATUS.to_string(),
            result: ResultBody {
                service: r.provider.clone(),
                location: r.coordinates,
            },
        }
    }
}

impl From<&GeoError> for ErrorPayload {
    fn from(e: &GeoError) -> Self {
        Self {
            status: e.to_string(),
            code: e.code(),
        }
    }
}

//! Lookup results.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl Coordinates {
    /// Construct a coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Successful resolution of a query by one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    /// Configured name of the provider that answered.
    pub provider: String,
    /// Coordinates of the first result the provider returned.
    pub coordinates: Coordinates,
}

impl LookupResult {
    /// Construct a result attributed to `provider`.
    pub fn new(provider: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            provider: provider.into(),
            coordinates,
        }
    }
}

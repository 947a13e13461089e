//! Whereami-specific data transfer objects, error taxonomy and configuration primitives.
#![warn(missing_docs)]

mod config;
mod connector;
mod error;
mod location;
mod reports;
mod response;

pub use config::{ProviderSettings, ResolverConfig, ServiceConfig};
pub use connector::ProviderKey;
pub use error::{CONFIG_ERROR_CODE, GeoError, LookupErrorKind};
pub use location::{Coordinates, LookupResult};
pub use reports::{Attempt, AttemptOutcome, ResolveReport};
pub use response::{ErrorPayload, ResultBody, SUCCESS_STATUS, SuccessPayload};

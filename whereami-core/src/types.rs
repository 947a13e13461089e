//! Re-export of foundational types from `whereami-types`.
// Consolidated re-exports so downstream crates can depend on `whereami-core` only

pub use whereami_types::{CONFIG_ERROR_CODE, GeoError, LookupErrorKind};

pub use whereami_types::{Coordinates, LookupResult, ProviderKey};

pub use whereami_types::{ProviderSettings, ResolverConfig, ServiceConfig};

pub use whereami_types::{Attempt, AttemptOutcome, ResolveReport};

pub use whereami_types::{ErrorPayload, ResultBody, SUCCESS_STATUS, SuccessPayload};

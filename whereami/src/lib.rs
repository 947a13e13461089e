//! whereami resolves free-text place descriptions through an ordered chain
//! of geocoding providers.
//!
//! Overview
//! - Providers implement the `whereami_core::GeoProvider` contract; each
//!   adapter owns its vendor's request encoding and failure mapping.
//! - The [`Resolver`] tries providers one at a time in configured order.
//!   The first success wins and later providers are not contacted.
//! - When every provider fails, the error of the *last* provider attempted
//!   is returned unchanged. Earlier failures are visible only through
//!   [`Resolver::resolve_with_report`].
//! - [`ProviderFactory`] turns a [`ServiceConfig`] into a `Resolver`,
//!   failing fast with a configuration error before any provider is built.
//!
//! Key behaviors and trade-offs
//! - Sequential fallback: at most one outbound request is in flight per
//!   resolution, so rate limits are spent economically at the cost of
//!   latency when early providers fail slowly.
//! - Every attempt is bounded by its provider's timeout at the resolver
//!   level, and optionally by an overall `request_timeout`.
//! - The chain is immutable after construction. Build it once and share the
//!   `Resolver` behind an `Arc`.
//!
//! Examples
//! Building a resolver from a YAML file:
//! ```rust,ignore
//! use whereami::{ProviderFactory, ServiceConfig};
//!
//! let config = ServiceConfig::from_path("config.yml")?;
//! let resolver = ProviderFactory::with_defaults().build(&config)?;
//! let hit = resolver.resolve("Empire State Building").await?;
//! println!("{} says {:?}", hit.provider, hit.coordinates);
//! ```
//!
//! Registering an extra backend next to the bundled ones:
//! ```rust,ignore
//! use std::sync::Arc;
//! use whereami::ProviderFactory;
//!
//! let factory = ProviderFactory::with_defaults()
//!     .register("In-house", |name, settings| {
//!         Ok(Arc::new(InHouse::new(name, settings)?) as _)
//!     });
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod factory;

pub use core::{Resolver, ResolverBuilder};
pub use factory::{ProviderCtor, ProviderFactory};

// Re-export core types for convenience
pub use whereami_core::{
    Attempt, AttemptOutcome, CONFIG_ERROR_CODE, ConfigurableProvider, Coordinates, ErrorPayload,
    GeoError, GeoProvider, LookupErrorKind, LookupResult, ProviderKey, ProviderSettings,
    ResolveReport, ResolverConfig, ResultBody, SUCCESS_STATUS, ServiceConfig, SuccessPayload,
};

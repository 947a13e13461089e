//! whereami-core
//!
//! Core types, traits, and utilities shared across the whereami ecosystem.
//!
//! - `types`: re-exported DTOs, configuration and the `GeoError` taxonomy.
//! - `connector`: the `GeoProvider` trait and construction helpers.
//! - `transport`: vendor-neutral HTTP plumbing used by adapter crates.
//!
//! Async runtime (Tokio)
//! ---------------------
//! `GeoProvider::lookup` is async and the bundled adapters use `reqwest`,
//! so callers must run under a Tokio 1.x runtime.
#![warn(missing_docs)]

/// Provider trait and construction helpers.
pub mod connector;
/// Shared HTTP helpers for adapter crates.
pub mod transport;
pub mod types;

pub use connector::{ConfigurableProvider, GeoProvider, credential, require_credentials};
pub use types::*;

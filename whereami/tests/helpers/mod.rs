#![allow(dead_code)]


pub use mock_provider::MockProvider;

use std::sync::Arc;

use whereami::{GeoError, GeoProvider, LookupErrorKind, Resolver};

// ---------- Lightweight fixtures and helpers for tests ----------

/// Common queries used across tests.
pub const EMPIRE: &str = "Empire State Building";
pub const BERLIN: &str = "Berlin";

/// Provider named `name` that always resolves to `(lat, lng)`.
pub fn ok(name: &str, lat: f64, lng: f64) -> Arc<MockProvider> {
    MockProvider::builder().name(name).returns(lat, lng).build()
}

/// Provider named `name` that always fails with `kind`.
pub fn failing(name: &str, kind: LookupErrorKind) -> Arc<MockProvider> {
    MockProvider::builder()
        .name(name)
        .fails(GeoError::lookup(name, kind, format!("{name} failed")))
        .build()
}

/// Resolver over `providers` in the given order.
pub fn chain(providers: &[Arc<MockProvider>]) -> Resolver {
    providers
        .iter()
        .fold(Resolver::builder(), |b, p| {
            b.with_provider(Arc::clone(p) as Arc<dyn GeoProvider>)
        })
        .build()
}

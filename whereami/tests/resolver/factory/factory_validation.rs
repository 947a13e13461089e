use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use whereami::{GeoError, GeoProvider, ProviderFactory, ProviderSettings, ServiceConfig};

use crate::helpers::ok;

fn settings() -> ProviderSettings {
    ProviderSettings::new(Duration::from_secs(1))
}

/// Factory whose only constructor counts how often it runs.
fn counting_factory(built: &Arc<AtomicUsize>) -> ProviderFactory {
    let built = Arc::clone(built);
    ProviderFactory::new().register("Counted", move |name, _settings| {
        built.fetch_add(1, Ordering::SeqCst);
        Ok(ok(name, 0.0, 0.0) as Arc<dyn GeoProvider>)
    })
}

#[test]
fn unknown_name_fails_before_any_construction() {
    let built = Arc::new(AtomicUsize::new(0));
    let config = ServiceConfig::new()
        .with_service("Counted", settings())
        .with_service("Bing", settings())
        .with_service("Yandex", settings());

    let err = counting_factory(&built).build(&config).unwrap_err();
    assert_eq!(err, GeoError::unknown_service("Bing"));
    assert_eq!(built.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_credential_names_field_and_provider() {
    let config = ServiceConfig::new().with_service(
        "HERE",
        settings().with_credential("app_id", "id"),
    );
    let err = ProviderFactory::with_defaults().build(&config).unwrap_err();
    assert_eq!(err, GeoError::missing_credential("HERE", "app_code"));
}

#[test]
fn first_construction_error_wins() {
    let config = ServiceConfig::new()
        .with_service("Google Maps API", settings())
        .with_service("HERE", settings());
    let err = ProviderFactory::with_defaults().build(&config).unwrap_err();
    assert_eq!(err, GeoError::missing_credential("Google Maps API", "api_key"));
}

#[test]
fn bad_endpoint_is_config_error() {
    let config = ServiceConfig::new().with_service(
        "Google Maps API",
        settings()
            .with_credential("api_key", "k")
            .with_endpoint("definitely not a url"),
    );
    assert!(ProviderFactory::with_defaults().build(&config).unwrap_err().is_config());
}

#[test]
fn chain_follows_configured_order() {
    let config = ServiceConfig::new()
        .with_service(
            "HERE",
            settings()
                .with_credential("app_id", "id")
                .with_credential("app_code", "code"),
        )
        .with_service("Google Maps API", settings().with_credential("api_key", "k"))
        .with_request_timeout(Duration::from_secs(3));

    let resolver = ProviderFactory::with_defaults().build(&config).unwrap();
    let names: Vec<String> = resolver.providers().iter().map(ToString::to_string).collect();
    assert_eq!(names, vec!["HERE", "Google Maps API"]);
    assert_eq!(resolver.config().request_timeout, Some(Duration::from_secs(3)));
}

#[test]
fn register_replaces_existing_constructor() {
    let built = Arc::new(AtomicUsize::new(0));
    let factory = ProviderFactory::with_defaults().register("HERE", {
        let built = Arc::clone(&built);
        move |name, _settings| {
            built.fetch_add(1, Ordering::SeqCst);
            Ok(ok(name, 1.0, 1.0) as Arc<dyn GeoProvider>)
        }
    });
    // No credentials: the bundled HERE constructor would reject this.
    let config = ServiceConfig::new().with_service("HERE", settings());
    let resolver = factory.build(&config).unwrap();
    assert_eq!(resolver.providers().len(), 1);
    assert_eq!(built.load(Ordering::SeqCst), 1);
}

#[test]
fn defaults_know_bundled_providers() {
    let factory = ProviderFactory::with_defaults();
    assert!(factory.knows("Google Maps API"));
    assert!(factory.knows("HERE"));
    assert!(!factory.knows("Bing"));
    assert!(!ProviderFactory::new().knows("HERE"));
}

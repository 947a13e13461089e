use std::sync::Arc;

use tokio::time::Duration;
use whereami::{
    Coordinates, GeoProvider, LookupErrorKind, ProviderFactory, Resolver, ServiceConfig,
};
use whereami_mock::{DynamicMockProvider, MockBehavior};

use crate::helpers::{BERLIN, EMPIRE, MockProvider, chain, failing, ok};

fn slow(name: &str) -> Arc<MockProvider> {
    MockProvider::builder()
        .name(name)
        .delay(Duration::from_secs(30))
        .timeout(Duration::from_secs(10))
        .build()
}

#[tokio::test]
async fn budget_caps_the_attempt_and_stops_the_chain() {
    let a = slow("a");
    let b = ok("b", 1.0, 1.0);
    let resolver = chain(&[a.clone(), b.clone()]);

    let err = resolver
        .resolve_with_deadline(EMPIRE, Duration::from_millis(30))
        .await
        .unwrap_err();
    assert_eq!(err.lookup_kind(), Some(LookupErrorKind::Timeout));
    assert_eq!(err.provider(), Some("a"));
    assert_eq!(a.calls(), 1);
    assert_eq!(b.calls(), 0, "no attempt starts once the budget is spent");
}

#[tokio::test]
async fn zero_budget_times_out_on_first_provider_without_attempts() {
    let a = ok("a", 1.0, 1.0);
    let resolver = chain(&[a.clone()]);

    let err = resolver
        .resolve_with_deadline(EMPIRE, Duration::ZERO)
        .await
        .unwrap_err();
    assert_eq!(err.lookup_kind(), Some(LookupErrorKind::Timeout));
    assert_eq!(err.provider(), Some("a"));
    assert_eq!(a.calls(), 0);
}

#[tokio::test]
async fn generous_budget_changes_nothing() {
    let resolver = chain(&[failing("a", LookupErrorKind::NotFound), ok("b", 1.0, 2.0)]);
    let hit = resolver
        .resolve_with_deadline(EMPIRE, Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(hit.provider, "b");
}

#[tokio::test]
async fn configured_request_timeout_applies_to_resolve() {
    let a = slow("a");
    let resolver = Resolver::builder()
        .with_provider(a.clone())
        .request_timeout(Duration::from_millis(30))
        .build();

    let started = tokio::time::Instant::now();
    let err = resolver.resolve(EMPIRE).await.unwrap_err();
    assert_eq!(err.lookup_kind(), Some(LookupErrorKind::Timeout));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(resolver.config().request_timeout, Some(Duration::from_millis(30)));
}

#[tokio::test]
async fn empty_chain_ignores_budget() {
    let resolver = Resolver::builder().build();
    let err = resolver
        .resolve_with_deadline(EMPIRE, Duration::ZERO)
        .await
        .unwrap_err();
    assert!(err.is_config());
}

#[tokio::test]
async fn unbounded_budget_behaves_like_no_deadline() {
    let resolver = Resolver::builder()
        .with_provider(Arc::new(whereami_mock::MockProvider::named("mock")))
        .build();

    let hit = resolver
        .resolve_with_deadline(BERLIN, Duration::MAX)
        .await
        .unwrap();
    assert_eq!(hit.provider, "mock");
    assert_eq!(hit.coordinates, Coordinates::new(52.52, 13.405));
}

#[tokio::test]
async fn huge_configured_request_timeout_still_resolves() {
    let config = ServiceConfig::from_yaml_str(
        "request_timeout: 1e19\nservices:\n  Mock:\n    credentials: {}\n    timeout: 1\n",
    )
    .unwrap();
    assert!(config.resolver.request_timeout.is_some());

    let resolver = ProviderFactory::new()
        .register("Mock", |name, settings| {
            Ok(Arc::new(
                whereami_mock::MockProvider::named(name).with_timeout(settings.timeout),
            ) as Arc<dyn GeoProvider>)
        })
        .build(&config)
        .unwrap();

    let hit = resolver.resolve(BERLIN).await.unwrap();
    assert_eq!(hit.provider, "Mock");
}

#[tokio::test]
async fn hanging_provider_is_cut_by_budget_before_fallback() {
    let (hang, hang_ctl) =
        DynamicMockProvider::new_with_controller("stalled", Duration::from_secs(10));
    hang_ctl.set_default_behavior(MockBehavior::Hang).await;
    let (next, next_ctl) =
        DynamicMockProvider::new_with_controller("next", Duration::from_secs(10));
    next_ctl
        .set_default_behavior(MockBehavior::Return(Coordinates::new(1.0, 2.0)))
        .await;

    let resolver = Resolver::builder()
        .with_provider(hang)
        .with_provider(next)
        .build();

    let err = resolver
        .resolve_with_deadline(EMPIRE, Duration::from_millis(40))
        .await
        .unwrap_err();
    assert_eq!(err.lookup_kind(), Some(LookupErrorKind::Timeout));
    assert_eq!(err.provider(), Some("stalled"));
    assert_eq!(hang_ctl.calls().await, vec![EMPIRE.to_string()]);
    assert_eq!(next_ctl.call_count().await, 0);
}

#[tokio::test]
async fn hanging_provider_falls_through_on_its_own_timeout() {
    let (hang, hang_ctl) =
        DynamicMockProvider::new_with_controller("stalled", Duration::from_millis(30));
    hang_ctl.set_behavior(EMPIRE, MockBehavior::Hang).await;
    let (next, next_ctl) =
        DynamicMockProvider::new_with_controller("next", Duration::from_secs(1));
    next_ctl
        .set_behavior(EMPIRE, MockBehavior::Return(Coordinates::new(40.7484, -73.9857)))
        .await;

    let resolver = Resolver::builder()
        .with_provider(hang)
        .with_provider(next)
        .build();

    let hit = resolver.resolve(EMPIRE).await.unwrap();
    assert_eq!(hit.provider, "next");
    assert_eq!(next_ctl.call_count().await, 1);
}

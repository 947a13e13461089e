use crate::helpers::{EMPIRE, chain, failing, ok};
use whereami::{GeoError, LookupErrorKind, Resolver};

#[tokio::test]
async fn first_success_short_circuits() {
    let a = ok("a", 1.0, 1.0);
    let b = ok("b", 2.0, 2.0);
    let resolver = chain(&[a.clone(), b.clone()]);

    let hit = resolver.resolve(EMPIRE).await.unwrap();
    assert_eq!(hit.provider, "a");
    assert_eq!(a.calls(), 1);
    assert_eq!(b.calls(), 0, "later providers must not be contacted");
}

#[tokio::test]
async fn last_provider_success_after_earlier_failures() {
    let a = failing("a", LookupErrorKind::ServiceUnavailable);
    let b = failing("b", LookupErrorKind::Timeout);
    let c = ok("c", 52.52, 13.405);
    let d = ok("d", 0.0, 0.0);
    let resolver = chain(&[a.clone(), b.clone(), c.clone(), d.clone()]);

    let hit = resolver.resolve(EMPIRE).await.unwrap();
    assert_eq!(hit.provider, "c");
    assert_eq!((a.calls(), b.calls(), c.calls(), d.calls()), (1, 1, 1, 0));
}

#[tokio::test]
async fn all_fail_returns_last_error_verbatim() {
    let a = failing("a", LookupErrorKind::InvalidCredentials);
    let b = failing("b", LookupErrorKind::BadUpstreamPayload);
    let c = failing("c", LookupErrorKind::NotFound);
    let resolver = chain(&[a, b, c]);

    let err = resolver.resolve(EMPIRE).await.unwrap_err();
    assert_eq!(err, GeoError::lookup("c", LookupErrorKind::NotFound, "c failed"));
    assert_eq!(err.code(), 404);
}

#[tokio::test]
async fn empty_chain_is_config_error() {
    let resolver = Resolver::builder().build();
    let err = resolver.resolve(EMPIRE).await.unwrap_err();
    assert!(err.is_config());
    assert_eq!(err.to_string(), "configuration error: no configured services");
    assert_eq!(err.code(), 500);
}

#[tokio::test]
async fn order_is_stable_across_calls() {
    let a = failing("a", LookupErrorKind::NotFound);
    let b = ok("b", 1.0, 2.0);
    let resolver = chain(&[a.clone(), b.clone()]);

    for _ in 0..5 {
        assert_eq!(resolver.resolve(EMPIRE).await.unwrap().provider, "b");
    }
    assert_eq!(a.calls(), 5);
    assert_eq!(b.calls(), 5);
}

#[tokio::test]
async fn config_error_from_provider_stops_the_chain() {
    let a = crate::helpers::MockProvider::builder()
        .name("a")
        .fails(GeoError::config("broken adapter"))
        .build();
    let b = ok("b", 1.0, 2.0);
    let resolver = chain(&[a, b.clone()]);

    let err = resolver.resolve(EMPIRE).await.unwrap_err();
    assert!(err.is_config());
    assert_eq!(b.calls(), 0);
}

#[tokio::test]
async fn hung_provider_is_bounded_by_its_timeout() {
    use tokio::time::Duration;
    let slow = crate::helpers::MockProvider::builder()
        .name("slow")
        .delay(Duration::from_secs(30))
        .timeout(Duration::from_millis(20))
        .build();
    let fast = ok("fast", 3.0, 4.0);
    let resolver = chain(&[slow.clone(), fast]);

    let hit = resolver.resolve(EMPIRE).await.unwrap();
    assert_eq!(hit.provider, "fast");
    assert_eq!(slow.calls(), 1);
}

#[tokio::test]
async fn timeout_on_last_provider_is_attributed_to_it() {
    use tokio::time::Duration;
    let a = failing("a", LookupErrorKind::NotFound);
    let slow = crate::helpers::MockProvider::builder()
        .name("slow")
        .delay(Duration::from_secs(30))
        .timeout(Duration::from_millis(20))
        .build();
    let resolver = chain(&[a, slow]);

    let err = resolver.resolve(EMPIRE).await.unwrap_err();
    assert_eq!(err.lookup_kind(), Some(LookupErrorKind::Timeout));
    assert_eq!(err.provider(), Some("slow"));
    assert_eq!(err.code(), 408);
}

#[test]
fn providers_lists_keys_in_order() {
    let resolver = chain(&[ok("x", 0.0, 0.0), ok("y", 0.0, 0.0)]);
    let names: Vec<String> = resolver
        .providers()
        .iter()
        .map(|k| k.as_str().to_string())
        .collect();
    assert_eq!(names, vec!["x", "y"]);
}

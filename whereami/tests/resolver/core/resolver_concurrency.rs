use std::sync::Arc;

use tokio::time::Duration;
use whereami::LookupErrorKind;

use crate::helpers::{EMPIRE, MockProvider, chain, failing};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shared_resolver_serves_concurrent_callers() {
    let first = failing("first", LookupErrorKind::NotFound);
    let second = MockProvider::builder()
        .name("second")
        .delay(Duration::from_millis(10))
        .returns(40.7484, -73.9857)
        .build();
    let resolver = Arc::new(chain(&[first.clone(), second.clone()]));

    let tasks: Vec<_> = (0..32)
        .map(|_| {
            let r = Arc::clone(&resolver);
            tokio::spawn(async move { r.resolve(EMPIRE).await })
        })
        .collect();

    for res in futures::future::join_all(tasks).await {
        let hit = res.expect("task joined").expect("resolved");
        assert_eq!(hit.provider, "second");
    }
    assert_eq!(first.calls(), 32);
    assert_eq!(second.calls(), 32);
}

#[tokio::test]
async fn faster_lower_priority_does_not_beat_higher_priority_success() {
    let high = MockProvider::builder()
        .name("high")
        .delay(Duration::from_millis(40))
        .returns(99.0, 99.0)
        .build();
    let low = MockProvider::builder().name("low").returns(1.0, 1.0).build();
    let resolver = chain(&[high, low.clone()]);

    let hit = resolver.resolve(EMPIRE).await.unwrap();
    assert_eq!(hit.provider, "high");
    assert_eq!(low.calls(), 0);
}

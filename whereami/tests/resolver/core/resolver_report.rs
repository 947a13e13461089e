use whereami::{AttemptOutcome, LookupErrorKind, Resolver};

use crate::helpers::{BERLIN, chain, failing, ok};

#[tokio::test]
async fn report_lists_attempts_in_order() {
    let resolver = chain(&[
        failing("g", LookupErrorKind::InvalidCredentials),
        ok("h", 52.52, 13.405),
        ok("never", 0.0, 0.0),
    ]);

    let report = resolver.resolve_with_report(BERLIN).await;
    assert_eq!(report.outcome.as_ref().unwrap().provider, "h");
    let seen: Vec<(&str, AttemptOutcome)> = report
        .attempts
        .iter()
        .map(|a| (a.provider.as_str(), a.outcome))
        .collect();
    assert_eq!(
        seen,
        vec![
            ("g", AttemptOutcome::Failed(LookupErrorKind::InvalidCredentials)),
            ("h", AttemptOutcome::Success),
        ]
    );
    assert_eq!(report.failures().count(), 1);
}

#[tokio::test]
async fn report_outcome_matches_resolve() {
    let resolver = chain(&[
        failing("g", LookupErrorKind::InvalidCredentials),
        failing("h", LookupErrorKind::NotFound),
    ]);

    let report = resolver.resolve_with_report(BERLIN).await;
    let direct = resolver.resolve(BERLIN).await;
    assert_eq!(report.outcome, direct);
    assert_eq!(report.attempts.len(), 2);
}

#[tokio::test]
async fn empty_chain_reports_no_attempts() {
    let report = Resolver::builder().build().resolve_with_report(BERLIN).await;
    assert!(report.attempts.is_empty());
    assert!(report.outcome.unwrap_err().is_config());
}

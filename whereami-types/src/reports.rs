//! Report envelopes produced by the resolver.

use serde::{Deserialize, Serialize};

use crate::connector::ProviderKey;
use crate::error::{GeoError, LookupErrorKind};
use crate::location::LookupResult;

/// Outcome of a single provider attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptOutcome {
    /// The provider resolved the query.
    Success,
    /// The provider failed with the given kind.
    Failed(LookupErrorKind),
    /// The provider raised a configuration error; resolution stopped there.
    Fatal,
}

/// One provider attempt made while resolving a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    /// Provider that was attempted.
    pub provider: ProviderKey,
    /// What happened.
    pub outcome: AttemptOutcome,
}

/// Summary of one resolution.
///
/// `outcome` is exactly what `Resolver::resolve` would have returned;
/// `attempts` lists every provider tried, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveReport {
    /// Final result or error.
    pub outcome: Result<LookupResult, GeoError>,
    /// Providers attempted, in order.
    pub attempts: Vec<Attempt>,
}

impl ResolveReport {
    /// Providers that failed before the final outcome, with their kinds.
    pub fn failures(&self) -> impl Iterator<Item = (&ProviderKey, LookupErrorKind)> {
        self.attempts.iter().filter_map(|a| match a.outcome {
            AttemptOutcome::Failed(kind) => Some((&a.provider, kind)),
            AttemptOutcome::Success | AttemptOutcome::Fatal => None,
        })
    }
}

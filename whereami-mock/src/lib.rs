use std::time::Duration;

use async_trait::async_trait;
use whereami_core::{GeoError, GeoProvider, LookupResult};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockProvider, MockBehavior};

/// Mock provider for CI-safe examples and tests. Resolves a handful of
/// well-known places from static fixtures and never touches the network.
///
/// A few queries trigger failure paths:
/// - `"FAIL"`: `ServiceUnavailable`
/// - `"DENIED"`: `InvalidCredentials`
/// - `"BAD"`: `BadQuery`
/// - `"TIMEOUT"`: sleeps briefly, then resolves like an unknown place
pub struct MockProvider {
    name: String,
    timeout: Duration,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Name used by [`MockProvider::new`].
    pub const DEFAULT_NAME: &'static str = "whereami-mock";

    /// Mock named [`MockProvider::DEFAULT_NAME`] with a one second deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::named(Self::DEFAULT_NAME)
    }

    /// Mock reporting results and errors under `name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timeout: Duration::from_secs(1),
        }
    }

    /// Override the reported per-lookup deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn maybe_fail_or_sleep(&self, query: &str) -> Result<(), GeoError> {
        match query {
            "FAIL" => Err(GeoError::service_unavailable(&self.name, "forced failure")),
            "DENIED" => Err(GeoError::invalid_credentials(&self.name, "forced rejection")),
            "BAD" => Err(GeoError::bad_query(&self.name, "forced bad query")),
            "TIMEOUT" => {
                // Long enough for a short resolver deadline to fire.
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl GeoProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn lookup(&self, query: &str) -> Result<LookupResult, GeoError> {
        self.maybe_fail_or_sleep(query).await?;
        fixtures::by_query(query)
            .map(|c| LookupResult::new(self.name.clone(), c))
            .ok_or_else(|| GeoError::not_found(&self.name, query))
    }
}

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use whereami_core::{
    Attempt, AttemptOutcome, GeoError, GeoProvider, LookupResult, ProviderKey, ResolveReport,
    ResolverConfig,
};

/// Fallback resolver over an ordered chain of providers.
///
/// The chain is fixed at construction. Providers hold only immutable
/// configuration, so one `Resolver` can be shared behind an `Arc` and used by
/// any number of concurrent callers.
pub struct Resolver {
    pub(crate) providers: Vec<Arc<dyn GeoProvider>>,
    pub(crate) cfg: ResolverConfig,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("Resolver")
            .field("providers", &names)
            .field("cfg", &self.cfg)
            .finish()
    }
}

/// Builder for constructing a `Resolver` with custom configuration.
pub struct ResolverBuilder {
    providers: Vec<Arc<dyn GeoProvider>>,
    cfg: ResolverConfig,
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverBuilder {
    /// Create a new builder with an empty chain and no overall deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: vec![],
            cfg: ResolverConfig::default(),
        }
    }

    /// Append a provider to the chain.
    ///
    /// Registration order is preference order: the first provider that
    /// succeeds wins. Duplicates are not removed.
    #[must_use]
    pub fn with_provider(mut self, p: Arc<dyn GeoProvider>) -> Self {
        self.providers.push(p);
        self
    }

    /// Bound every resolution by an overall deadline.
    ///
    /// Each attempt gets the smaller of its provider's timeout and the
    /// remaining budget; once the budget is spent no further provider is tried.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Replace the resolver-wide options wholesale.
    #[must_use]
    pub const fn config(mut self, cfg: ResolverConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Resolver`.
    ///
    /// An empty chain is a valid resolver; every resolution against it fails
    /// with a configuration error.
    #[must_use]
    pub fn build(self) -> Resolver {
        Resolver {
            providers: self.providers,
            cfg: self.cfg,
        }
    }
}

impl Resolver {
    /// Start building a new `Resolver`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use whereami::Resolver;
    /// use whereami_google::GoogleProvider;
    ///
    /// let google = GoogleProvider::new("Google Maps API", "key", Duration::from_secs(5))?;
    /// let resolver = Resolver::builder()
    ///     .with_provider(Arc::new(google))
    ///     .request_timeout(Duration::from_secs(8))
    ///     .build();
    /// let hit = resolver.resolve("Empire State Building").await?;
    /// ```
    #[must_use]
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// Ordered keys of the configured providers.
    #[must_use]
    pub fn providers(&self) -> Vec<ProviderKey> {
        self.providers.iter().map(|p| p.key()).collect()
    }

    /// Resolver-wide options in effect.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.cfg
    }

    /// Resolve `query` to the first successful provider's result.
    ///
    /// Providers are tried one at a time in chain order. A lookup failure on
    /// any provider but the last is discarded; the last provider's error is
    /// returned unchanged.
    ///
    /// # Errors
    /// Returns `GeoError::Config` if the chain is empty, otherwise the last
    /// attempted provider's `GeoError::Lookup`.
    pub async fn resolve(&self, query: &str) -> Result<LookupResult, GeoError> {
        self.run(query, self.cfg.request_timeout).await.outcome
    }

    /// Resolve `query` within an explicit overall budget.
    ///
    /// The budget replaces any configured `request_timeout` for this call.
    ///
    /// # Errors
    /// As [`Resolver::resolve`]. If the budget is spent before the first
    /// attempt, a `Timeout` attributed to the first provider.
    pub async fn resolve_with_deadline(
        &self,
        query: &str,
        budget: Duration,
    ) -> Result<LookupResult, GeoError> {
        self.run(query, Some(budget)).await.outcome
    }

    /// Resolve `query` and also report every attempt made.
    ///
    /// The report's `outcome` is exactly what [`Resolver::resolve`] returns.
    pub async fn resolve_with_report(&self, query: &str) -> ResolveReport {
        self.run(query, self.cfg.request_timeout).await
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "whereami::core::provider_call_with_timeout",
            skip(fut),
            fields(timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        provider: &str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, GeoError>
    where
        Fut: core::future::Future<Output = Result<T, GeoError>>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(GeoError::timeout(
                provider,
                format!("no response within {} ms", timeout.as_millis()),
            ))
        })
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "whereami::core::resolve",
            skip(self),
            fields(providers = self.providers.len()),
        )
    )]
    async fn run(&self, query: &str, budget: Option<Duration>) -> ResolveReport {
        let Some(first) = self.providers.first() else {
            return ResolveReport {
                outcome: Err(GeoError::no_services()),
                attempts: Vec::new(),
            };
        };

        // A budget past the clock's range is no deadline at all.
        let deadline = budget.and_then(|b| Instant::now().checked_add(b));
        let mut attempts = Vec::with_capacity(self.providers.len());
        let mut last_err: Option<GeoError> = None;

        for p in &self.providers {
            let mut timeout = p.timeout();
            if let Some(deadline) = deadline {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(provider = p.name(), "request deadline spent; stopping");
                    break;
                }
                timeout = timeout.min(remaining);
            }

            match Self::provider_call_with_timeout(p.name(), timeout, p.lookup(query)).await {
                Ok(hit) => {
                    attempts.push(Attempt {
                        provider: p.key(),
                        outcome: AttemptOutcome::Success,
                    });
                    return ResolveReport {
                        outcome: Ok(hit),
                        attempts,
                    };
                }
                Err(e) => {
                    let Some(kind) = e.lookup_kind() else {
                        attempts.push(Attempt {
                            provider: p.key(),
                            outcome: AttemptOutcome::Fatal,
                        });
                        return ResolveReport {
                            outcome: Err(e),
                            attempts,
                        };
                    };
                    #[cfg(feature = "tracing")]
                    tracing::debug!(provider = p.name(), kind = %kind, "lookup failed; falling through");
                    attempts.push(Attempt {
                        provider: p.key(),
                        outcome: AttemptOutcome::Failed(kind),
                    });
                    last_err = Some(e);
                }
            }
        }

        let err = last_err.unwrap_or_else(|| {
            GeoError::timeout(first.name(), "request deadline spent before any attempt")
        });
        ResolveReport {
            outcome: Err(err),
            attempts,
        }
    }
}

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use whereami_core::{ConfigurableProvider, GeoError, GeoProvider, ProviderSettings, ServiceConfig};

use crate::core::{Resolver, ResolverBuilder};

/// Constructor registered under a provider name.
///
/// Receives the configured name and its settings; must not touch the network.
pub type ProviderCtor =
    Arc<dyn Fn(&str, &ProviderSettings) -> Result<Arc<dyn GeoProvider>, GeoError> + Send + Sync>;

/// Explicit name → constructor map used to turn a `ServiceConfig` into a `Resolver`.
///
/// Validation is fail-fast and deterministic:
/// 1. every configured name is checked against the registry in order, and
///    the first unknown name is reported before any provider is constructed;
/// 2. providers are then constructed in order, and the first construction
///    error (missing credential, bad endpoint) is reported.
#[derive(Clone, Default)]
pub struct ProviderFactory {
    ctors: HashMap<String, ProviderCtor>,
}

impl fmt::Debug for ProviderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.ctors.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ProviderFactory")
            .field("providers", &names)
            .finish()
    }
}

impl ProviderFactory {
    /// An empty factory that knows no providers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory with the bundled providers registered under their
    /// conventional names ("Google Maps API", "HERE").
    #[must_use]
    pub fn with_defaults() -> Self {
        let factory = Self::new();
        #[cfg(feature = "google")]
        let factory = factory.register_type::<whereami_google::GoogleProvider>(
            whereami_google::GoogleProvider::DEFAULT_NAME,
        );
        #[cfg(feature = "here")]
        let factory = factory
            .register_type::<whereami_here::HereProvider>(whereami_here::HereProvider::DEFAULT_NAME);
        factory
    }

    /// Add or replace the constructor for `name`.
    #[must_use]
    pub fn register<F>(mut self, name: impl Into<String>, ctor: F) -> Self
    where
        F: Fn(&str, &ProviderSettings) -> Result<Arc<dyn GeoProvider>, GeoError>
            + Send
            + Sync
            + 'static,
    {
        self.ctors.insert(name.into(), Arc::new(ctor));
        self
    }

    /// Register a [`ConfigurableProvider`] type under `name`.
    #[must_use]
    pub fn register_type<P: ConfigurableProvider>(self, name: impl Into<String>) -> Self {
        self.register(name, |name, settings| {
            P::from_settings(name, settings).map(|p| Arc::new(p) as Arc<dyn GeoProvider>)
        })
    }

    /// Whether a constructor is registered for `name`.
    #[must_use]
    pub fn knows(&self, name: &str) -> bool {
        self.ctors.contains_key(name)
    }

    /// Construct one provider from its configuration entry.
    ///
    /// # Errors
    /// Returns `GeoError::Config` if `name` is unknown or construction fails.
    pub fn construct(
        &self,
        name: &str,
        settings: &ProviderSettings,
    ) -> Result<Arc<dyn GeoProvider>, GeoError> {
        let ctor = self
            .ctors
            .get(name)
            .ok_or_else(|| GeoError::unknown_service(name))?;
        ctor(name, settings)
    }

    /// Build a `Resolver` whose chain follows the configured order.
    ///
    /// An empty `services` mapping yields an empty (but valid) resolver.
    ///
    /// # Errors
    /// Returns `GeoError::Config` for the first unknown name, or else for the
    /// first provider that fails to construct.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "whereami::factory::build",
            skip(self, config),
            fields(services = config.len()),
        )
    )]
    pub fn build(&self, config: &ServiceConfig) -> Result<Resolver, GeoError> {
        if let Some((name, _)) = config.iter().find(|(name, _)| !self.knows(name)) {
            return Err(GeoError::unknown_service(name));
        }

        let mut builder = ResolverBuilder::new().config(config.resolver);
        for (name, settings) in config.iter() {
            builder = builder.with_provider(self.construct(name, settings)?);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("resolver chain constructed");

        Ok(builder.build())
    }
}

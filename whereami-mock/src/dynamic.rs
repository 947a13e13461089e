use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use whereami_core::{Coordinates, GeoError, GeoProvider, LookupResult};

/// Instruction for how a lookup should behave for a given query.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Resolve to the provided coordinates immediately.
    Return(Coordinates),
    /// Fail immediately with the provided error.
    Fail(GeoError),
    /// Resolve to the provided coordinates after a delay.
    Delay(Duration, Coordinates),
    /// Hang indefinitely (simulate a stalled backend).
    Hang,
}

struct InternalState {
    rules: HashMap<String, MockBehavior>,
    default: MockBehavior,
    initial_default: MockBehavior,
    calls: Vec<String>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for lookups of one exact query.
    pub async fn set_behavior(&self, query: impl Into<String>, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(query.into(), behavior);
    }

    /// Set the behavior for queries without a dedicated rule.
    pub async fn set_default_behavior(&self, behavior: MockBehavior) {
        self.state.lock().await.default = behavior;
    }

    /// Queries received so far, in arrival order.
    pub async fn calls(&self) -> Vec<String> {
        self.state.lock().await.calls.clone()
    }

    /// Number of lookups received so far.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }

    /// Clear all configured behaviors and the call log, and restore the
    /// initial `NotFound` default.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.default = guard.initial_default.clone();
        guard.calls.clear();
    }
}

/// A provider that defers all behavior to an external controller.
///
/// Queries without a rule fall back to the default behavior, which starts
/// out as a `NotFound` failure attributed to this provider.
pub struct DynamicMockProvider {
    name: String,
    timeout: Duration,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockProvider {
    /// Create a new dynamic mock provider and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: impl Into<String>,
        timeout: Duration,
    ) -> (Arc<dyn GeoProvider>, DynamicMockController) {
        let name = name.into();
        let initial_default = MockBehavior::Fail(GeoError::not_found(&name, "*"));
        let state = Arc::new(Mutex::new(InternalState {
            rules: HashMap::new(),
            default: initial_default.clone(),
            initial_default,
            calls: Vec::new(),
        }));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self {
            name,
            timeout,
            state,
        });
        (me as Arc<dyn GeoProvider>, controller)
    }
}

#[async_trait]
impl GeoProvider for DynamicMockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn lookup(&self, query: &str) -> Result<LookupResult, GeoError> {
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(query.to_string());
            guard
                .rules
                .get(query)
                .cloned()
                .unwrap_or_else(|| guard.default.clone())
        };

        match behavior {
            MockBehavior::Return(c) => Ok(LookupResult::new(self.name.clone(), c)),
            MockBehavior::Fail(e) => Err(e),
            MockBehavior::Delay(d, c) => {
                tokio::time::sleep(d).await;
                Ok(LookupResult::new(self.name.clone(), c))
            }
            MockBehavior::Hang => std::future::pending().await,
        }
    }
}

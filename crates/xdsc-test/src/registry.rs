use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use xdsc_policy::{BodyMode, Policy, PolicyMetadata, RegistryError, RegistryResult};

/// Builds a fresh [`Policy`] instance on demand.
pub type PolicyFactory = Box<dyn Fn() -> Box<dyn Policy> + Send + Sync>;

struct Registration {
    defaults: HashMap<String, serde_json::Value>,
    factory: PolicyFactory,
}

/// An in-memory [`xdsc_policy::PolicyRegistry`] for tests: definitions are
/// registered up front by `(name, version)`, each with its own defaults
/// and factory, the way a real registry would load them from a policy
/// catalog.
#[derive(Default)]
pub struct FakePolicyRegistry {
    definitions: Mutex<HashMap<(String, String), Registration>>,
}

impl FakePolicyRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a policy definition. Later calls to `create` for the same
    /// `(name, version)` build a fresh instance via `factory` and merge
    /// `defaults` under the caller's runtime parameters.
    #[must_use]
    pub fn register(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        defaults: HashMap<String, serde_json::Value>,
        factory: PolicyFactory,
    ) -> Self {
        self.definitions.get_mut().unwrap().insert(
            (name.into(), version.into()),
            Registration { defaults, factory },
        );
        self
    }
}

#[async_trait]
impl xdsc_policy::PolicyRegistry for FakePolicyRegistry {
    async fn create(
        &self,
        name: &str,
        version: &str,
        _metadata: &PolicyMetadata,
        parameters: &HashMap<String, serde_json::Value>,
    ) -> RegistryResult<(Box<dyn Policy>, HashMap<String, serde_json::Value>)> {
        let definitions = self.definitions.lock().unwrap();
        let registration = definitions
            .get(&(name.to_owned(), version.to_owned()))
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_owned(),
                version: version.to_owned(),
            })?;

        let mut merged = registration.defaults.clone();
        for (key, value) in parameters {
            merged.insert(key.clone(), value.clone());
        }

        Ok(((registration.factory)(), merged))
    }
}

/// A no-op [`Policy`] double whose declared [`BodyMode`]s are fixed at
/// construction, for asserting body-mode aggregation and call counts
/// without pulling in a real policy implementation.
pub struct TestPolicy {
    request_mode: BodyMode,
    response_mode: BodyMode,
    on_request_calls: std::sync::atomic::AtomicUsize,
    on_response_calls: std::sync::atomic::AtomicUsize,
}

impl TestPolicy {
    /// A policy declaring the given request/response body modes.
    #[must_use]
    pub fn new(request_mode: BodyMode, response_mode: BodyMode) -> Self {
        Self {
            request_mode,
            response_mode,
            on_request_calls: std::sync::atomic::AtomicUsize::new(0),
            on_response_calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// How many times `on_request` has been called.
    pub fn on_request_calls(&self) -> usize {
        self.on_request_calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// How many times `on_response` has been called.
    pub fn on_response_calls(&self) -> usize {
        self.on_response_calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait]
impl Policy for TestPolicy {
    async fn on_request(&self, _parameters: &HashMap<String, serde_json::Value>) {
        self.on_request_calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    async fn on_response(&self, _parameters: &HashMap<String, serde_json::Value>) {
        self.on_response_calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn mode(&self) -> (BodyMode, BodyMode) {
        (self.request_mode, self.response_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdsc_policy::PolicyRegistry as _;

    fn metadata() -> PolicyMetadata {
        PolicyMetadata {
            route_key: "r".to_owned(),
            api_id: "a".to_owned(),
            api_name: "a".to_owned(),
            api_version: "1".to_owned(),
            attached_to: None,
        }
    }

    #[tokio::test]
    async fn create_merges_defaults_under_runtime_parameters() {
        let mut defaults = HashMap::new();
        defaults.insert("level".to_owned(), serde_json::json!("info"));
        defaults.insert("format".to_owned(), serde_json::json!("json"));

        let registry = FakePolicyRegistry::new().register(
            "log",
            "1.0.0",
            defaults,
            Box::new(|| Box::new(TestPolicy::new(BodyMode::None, BodyMode::None))),
        );

        let mut runtime = HashMap::new();
        runtime.insert("level".to_owned(), serde_json::json!("debug"));

        let (_policy, merged) = registry.create("log", "1.0.0", &metadata(), &runtime).await.unwrap();
        assert_eq!(merged["level"], serde_json::json!("debug"));
        assert_eq!(merged["format"], serde_json::json!("json"));
    }

    #[tokio::test]
    async fn create_unknown_definition_is_not_found() {
        let registry = FakePolicyRegistry::new();
        let err = registry
            .create("nope", "1.0.0", &metadata(), &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { .. }));
    }
}

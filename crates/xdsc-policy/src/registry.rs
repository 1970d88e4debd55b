use std::collections::HashMap;

use async_trait::async_trait;

use crate::capability::{Policy, PolicyMetadata};
use crate::error::RegistryResult;

/// Looks up a policy definition by `(name, version)` and instantiates it
/// (component D, a collaborator owned outside this crate — the gateway
/// runtime supplies the concrete implementation; `xdsc-test` supplies a
/// fake for tests).
#[async_trait]
pub trait PolicyRegistry: Send + Sync {
    /// Resolve and instantiate the policy named `(name, version)`.
    ///
    /// Returns the boxed instance plus the "merged parameters" mapping:
    /// the policy's declared defaults overlaid with `parameters` (§4.4
    /// step 2). The merged mapping, not the raw input, is what gets
    /// recorded on the built chain's spec.
    async fn create(
        &self,
        name: &str,
        version: &str,
        metadata: &PolicyMetadata,
        parameters: &HashMap<String, serde_json::Value>,
    ) -> RegistryResult<(Box<dyn Policy>, HashMap<String, serde_json::Value>)>;
}

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;
use xdsc_core::domain::StoredPolicyConfig;
use xdsc_core::envelope::decode_resource;
use xdsc_core::type_urls::api_name_from_route_key;
use xdsc_core::CoreError;
use xdsc_policy::{build_chain, BuiltPolicyChain, PolicyRegistry};
use xdsc_telemetry::Metrics;

use crate::error::{KernelError, KernelResult};
use crate::route_table::Kernel;

/// Translates a batch of policy-chain resources into a new whole-table for
/// the kernel (§4.5, component G).
pub struct PolicyChainResourceHandler {
    kernel: Arc<Kernel>,
    registry: Arc<dyn PolicyRegistry>,
    metrics: Metrics,
}

impl PolicyChainResourceHandler {
    /// Build a handler bound to a kernel, a registry collaborator, and the
    /// shared metrics handles.
    #[must_use]
    pub fn new(kernel: Arc<Kernel>, registry: Arc<dyn PolicyRegistry>, metrics: Metrics) -> Self {
        Self {
            kernel,
            registry,
            metrics,
        }
    }

    /// Run the full protocol from §4.5 over one discovery response's
    /// resource batch and atomically install the result in the kernel.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::Decode`] only when a resource's outer
    /// envelope or inner structured document cannot be decoded at all —
    /// a malformed wire frame. Every other per-resource problem (empty
    /// `routeKey`, unknown policy, build failure) is logged at warning
    /// level and the offending chain is skipped; this function still
    /// returns `Ok` and the surviving chains are still installed.
    pub async fn handle_policy_chain_update(&self, resources: &[Vec<u8>]) -> KernelResult<()> {
        let mut installed: HashMap<String, Arc<BuiltPolicyChain>> = HashMap::new();

        for resource in resources {
            let stored: StoredPolicyConfig = match decode_resource(resource) {
                Ok(stored) => stored,
                Err(CoreError::TargetDecode(err)) => {
                    warn!(error = %err, "policy-chain resource did not match the expected shape, skipping");
                    continue;
                }
                Err(other) => return Err(KernelError::Decode(other)),
            };

            for route_config in &stored.configuration.routes {
                if route_config.route_key.is_empty() {
                    warn!(api_id = %stored.id, "policy chain has an empty routeKey, skipping");
                    continue;
                }
                if let Some(invalid) = route_config
                    .policies
                    .iter()
                    .find(|instance| instance.name.is_empty() || instance.version.is_empty())
                {
                    warn!(
                        route_key = %route_config.route_key,
                        name = %invalid.name,
                        version = %invalid.version,
                        "policy instance has an empty name or version, skipping chain"
                    );
                    continue;
                }

                match build_chain(route_config, &stored.configuration.metadata, self.registry.as_ref()).await {
                    Ok(built) => {
                        installed.insert(route_config.route_key.clone(), Arc::new(built));
                    }
                    Err(err) => {
                        warn!(route_key = %route_config.route_key, error = %err, "failed to build policy chain, skipping");
                    }
                }
            }
        }

        let loaded = i64::try_from(installed.len()).unwrap_or(i64::MAX);
        self.metrics.set_policy_chains_loaded("ads", loaded);
        for (route_key, chain) in &installed {
            let api = api_name_from_route_key(route_key);
            let count = i64::try_from(chain.len()).unwrap_or(i64::MAX);
            self.metrics.set_policies_per_chain(route_key, api, count);
        }

        self.kernel.replace_routes(installed);
        Ok(())
    }
}

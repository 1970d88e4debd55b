use std::sync::Arc;

use tracing::warn;
use xdsc_apikeys::ApiKeyResourceHandler;
use xdsc_core::type_urls::{API_KEY_STATE_TYPE_URL, LAZY_RESOURCE_TYPE_URL, POLICY_CHAIN_TYPE_URL};
use xdsc_kernel::PolicyChainResourceHandler;
use xdsc_lazy::LazyResourceHandler;

use crate::error::ClientResult;

/// Routes a discovery response's resource batch to the single handler
/// registered for its `type_url` (§4.8 "response dispatch", §9 "dynamic
/// dispatch on resource type": a table populated at construction, not
/// reflection).
pub struct Dispatcher {
    policy: Arc<PolicyChainResourceHandler>,
    api_keys: Arc<ApiKeyResourceHandler>,
    lazy: Arc<LazyResourceHandler>,
}

impl Dispatcher {
    /// Bind a dispatcher to the three resource-type handlers.
    #[must_use]
    pub fn new(
        policy: Arc<PolicyChainResourceHandler>,
        api_keys: Arc<ApiKeyResourceHandler>,
        lazy: Arc<LazyResourceHandler>,
    ) -> Self {
        Self {
            policy,
            api_keys,
            lazy,
        }
    }

    /// Dispatch one response's resource batch.
    ///
    /// An unrecognized `type_url` is logged and skipped, not an error — the
    /// closed set is enforced at the envelope layer (§4.3 step 1), this is
    /// just the outer routing table.
    ///
    /// # Errors
    ///
    /// Propagates whatever the matched handler returns.
    pub async fn dispatch(&self, type_url: &str, resources: Vec<Vec<u8>>) -> ClientResult<()> {
        match type_url {
            POLICY_CHAIN_TYPE_URL => Ok(self.policy.handle_policy_chain_update(&resources).await?),
            API_KEY_STATE_TYPE_URL => Ok(self.api_keys.handle_resources(&resources).await?),
            LAZY_RESOURCE_TYPE_URL => Ok(self.lazy.handle_resources(&resources).await?),
            other => {
                warn!(type_url = %other, "unrecognized type_url, skipping response");
                Ok(())
            }
        }
    }
}

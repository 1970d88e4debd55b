use std::sync::Arc;

use tracing::{debug, warn};
use xdsc_core::domain::LazyResourceSnapshot;
use xdsc_core::envelope::decode_resource;

use crate::error::LazyResult;
use crate::store::LazyResourceStore;

/// Decodes a lazy-resource snapshot and installs it wholesale (§4.7,
/// component I).
pub struct LazyResourceHandler {
    store: Arc<dyn LazyResourceStore>,
}

impl LazyResourceHandler {
    /// Bind a handler to a store.
    #[must_use]
    pub fn new(store: Arc<dyn LazyResourceStore>) -> Self {
        Self { store }
    }

    /// Decode `resource_bytes` as a [`LazyResourceSnapshot`] and replace
    /// the whole store with it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::LazyError`] if the decoded snapshot could
    /// not be installed. Decode failures are logged and skipped, matching
    /// the other state-of-world handlers' "control plane is authoritative"
    /// posture, since a malformed snapshot here carries no per-resource
    /// ACK/NACK path of its own.
    pub async fn handle_snapshot(&self, resource_bytes: &[u8]) -> LazyResult<()> {
        let snapshot: LazyResourceSnapshot = match decode_resource(resource_bytes) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "lazy resource snapshot failed to decode, ignoring");
                return Ok(());
            }
        };

        for resource in &snapshot.resources {
            debug!(id = %resource.id, resource_type = %resource.resource_type, "replacing lazy resource");
        }

        self.store.replace_all(snapshot.resources).await
    }

    /// Apply every envelope in a discovery response's resource batch, in
    /// order. Later snapshots in the same batch replace earlier ones.
    ///
    /// # Errors
    ///
    /// See [`Self::handle_snapshot`].
    pub async fn handle_resources(&self, resources: &[Vec<u8>]) -> LazyResult<()> {
        for resource in resources {
            self.handle_snapshot(resource).await?;
        }
        Ok(())
    }
}

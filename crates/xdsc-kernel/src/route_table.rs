use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use xdsc_policy::BuiltPolicyChain;

/// The live route table (§5, §8 invariant 4): a `routeKey → BuiltPolicyChain`
/// mapping, replaced wholesale on every successful policy-chain update and
/// never mutated in place.
///
/// Readers clone the `Arc<HashMap<..>>` snapshot once per lookup; the old
/// map is freed once the last clone referencing it drops, with no explicit
/// generation bookkeeping. This is the `arc-swap` discipline already used
/// by `ninelives`'s resilience primitives for its own shared state.
pub struct Kernel {
    routes: ArcSwap<HashMap<String, Arc<BuiltPolicyChain>>>,
}

impl Kernel {
    /// Construct a kernel with an empty route table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Atomically replace the entire route table (§4.5 step 6, §8
    /// invariant 4 — no residue from a prior call).
    pub fn replace_routes(&self, routes: HashMap<String, Arc<BuiltPolicyChain>>) {
        self.routes.store(Arc::new(routes));
    }

    /// Take a consistent snapshot of the current route table for the hot
    /// path to consult without holding a lock across the lookup.
    #[must_use]
    pub fn routes(&self) -> Arc<HashMap<String, Arc<BuiltPolicyChain>>> {
        self.routes.load_full()
    }

    /// Look up the chain bound to `route_key`, if any.
    #[must_use]
    pub fn route(&self, route_key: &str) -> Option<Arc<BuiltPolicyChain>> {
        self.routes.load().get(route_key).cloned()
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdsc_policy::PolicySpec;

    fn empty_chain() -> Arc<BuiltPolicyChain> {
        Arc::new(BuiltPolicyChain {
            policies: Vec::new(),
            specs: Vec::<PolicySpec>::new(),
            requires_request_body: false,
            requires_response_body: false,
            has_execution_conditions: false,
        })
    }

    #[test]
    fn starts_empty() {
        let kernel = Kernel::new();
        assert!(kernel.routes().is_empty());
    }

    #[test]
    fn replace_is_whole_table() {
        let kernel = Kernel::new();
        let mut first = HashMap::new();
        first.insert("demo::r1".to_owned(), empty_chain());
        kernel.replace_routes(first);
        assert_eq!(kernel.routes().len(), 1);

        let mut second = HashMap::new();
        second.insert("demo::r2".to_owned(), empty_chain());
        kernel.replace_routes(second);

        let snapshot = kernel.routes();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains_key("demo::r2"));
        assert!(!snapshot.contains_key("demo::r1"));
    }

    #[test]
    fn snapshot_is_stable_across_a_later_replace() {
        let kernel = Kernel::new();
        let mut first = HashMap::new();
        first.insert("demo::r1".to_owned(), empty_chain());
        kernel.replace_routes(first);

        let held = kernel.routes();
        kernel.replace_routes(HashMap::new());

        assert_eq!(held.len(), 1, "a snapshot taken before a replace must not change");
        assert!(kernel.routes().is_empty());
    }
}

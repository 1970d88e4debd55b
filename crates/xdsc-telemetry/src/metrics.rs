use prometheus::{IntCounter, IntGauge, IntGaugeVec, Opts, Registry};

use crate::error::TelemetryResult;

/// The four metrics named in §3.1/§4.5/§4.8, registered once against a
/// caller-supplied `prometheus::Registry`.
///
/// Cheap to clone: every field is a `prometheus` metric handle, which is
/// itself `Arc`-backed, mirroring how `ninelives-prometheus::PrometheusSink`
/// is constructed once and shared across call sites.
#[derive(Debug, Clone)]
pub struct Metrics {
    policy_chains_loaded: IntGaugeVec,
    policies_per_chain: IntGaugeVec,
    reconnect_attempts_total: IntCounter,
    connection_state: IntGauge,
}

impl Metrics {
    /// Register every metric against `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TelemetryError::Metrics`] if any metric name
    /// collides with one already registered.
    pub fn new(registry: &Registry) -> TelemetryResult<Self> {
        let policy_chains_loaded = IntGaugeVec::new(
            Opts::new(
                "policy_chains_loaded",
                "Number of policy chains currently installed in the kernel",
            ),
            &["source"],
        )?;
        registry.register(Box::new(policy_chains_loaded.clone()))?;

        let policies_per_chain = IntGaugeVec::new(
            Opts::new("policies_per_chain", "Number of policies bound to one route"),
            &["route", "api"],
        )?;
        registry.register(Box::new(policies_per_chain.clone()))?;

        let reconnect_attempts_total = IntCounter::new(
            "xds_reconnect_attempts_total",
            "Number of reconnect delays computed by the reconnect controller",
        )?;
        registry.register(Box::new(reconnect_attempts_total.clone()))?;

        let connection_state = IntGauge::new(
            "xds_connection_state",
            "Current ConnectionState, as its integer discriminant",
        )?;
        registry.register(Box::new(connection_state.clone()))?;

        Ok(Self {
            policy_chains_loaded,
            policies_per_chain,
            reconnect_attempts_total,
            connection_state,
        })
    }

    /// Record the number of chains installed from `source` (e.g. `"ads"`).
    pub fn set_policy_chains_loaded(&self, source: &str, count: i64) {
        self.policy_chains_loaded.with_label_values(&[source]).set(count);
    }

    /// Record the policy count for one route, labeled by its API name.
    pub fn set_policies_per_chain(&self, route: &str, api: &str, count: i64) {
        self.policies_per_chain.with_label_values(&[route, api]).set(count);
    }

    /// Increment the reconnect-attempt counter by one.
    pub fn incr_reconnect_attempts(&self) {
        self.reconnect_attempts_total.inc();
    }

    /// Mirror the current `ConnectionState` discriminant for dashboards.
    pub fn set_connection_state(&self, state: i64) {
        self.connection_state.set(state);
    }
}

use xdsc_core::{ConnectionState, ConnectionStateHandle, IllegalTransition};
use xdsc_telemetry::Metrics;

/// Pairs the connection state handle with the metric that mirrors it for
/// dashboards, so every transition updates both in one call (§4.8 "state
/// transitions", §3.1 `xds_connection_state`).
pub struct ObservedState {
    handle: ConnectionStateHandle,
    metrics: Metrics,
}

impl ObservedState {
    /// Create a handle initialized to `Disconnected` and bound to `metrics`.
    #[must_use]
    pub fn new(metrics: Metrics) -> Self {
        let handle = ConnectionStateHandle::new();
        metrics.set_connection_state(ConnectionState::Disconnected as i64);
        Self { handle, metrics }
    }

    /// The current state.
    #[must_use]
    pub fn get(&self) -> ConnectionState {
        self.handle.get()
    }

    /// Attempt a transition and mirror it into the metric on success.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalTransition`] if the edge is not legal.
    pub fn transition(&self, next: ConnectionState) -> Result<(), IllegalTransition> {
        self.handle.transition(next)?;
        self.metrics.set_connection_state(next as i64);
        Ok(())
    }

    /// Unconditionally transition to `Stopped` and mirror it.
    pub fn stop(&self) {
        self.handle.stop();
        self.metrics.set_connection_state(ConnectionState::Stopped as i64);
    }
}

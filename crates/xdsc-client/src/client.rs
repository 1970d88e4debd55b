use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tonic::Request;
use tracing::warn;
use xdsc_core::type_urls::RECOGNIZED_TYPE_URLS;
use xdsc_core::{ConnectionConfig, ConnectionState};
use xdsc_proto::{DiscoveryRequest, DiscoveryResponse, ErrorDetail, Node};
use xdsc_reconnect::ReconnectController;
use xdsc_telemetry::{Metrics, RequestContext};

use crate::connection;
use crate::dispatch::Dispatcher;
use crate::error::ClientResult;
use crate::state::ObservedState;

const OUTBOUND_CHANNEL_CAPACITY: usize = 16;

/// The W3C trace-propagation triplet lifted from the stream call's
/// response metadata, once per connection (§4.8, §6). Missing headers are
/// not an error — every field is simply absent.
#[derive(Debug, Default, Clone)]
struct TraceHeaders {
    traceparent: Option<String>,
    tracestate: Option<String>,
    baggage: Option<String>,
}

impl TraceHeaders {
    fn extract(metadata: &tonic::metadata::MetadataMap) -> Self {
        let header = |name: &str| metadata.get(name).and_then(|value| value.to_str().ok()).map(str::to_owned);
        Self {
            traceparent: header("traceparent"),
            tracestate: header("tracestate"),
            baggage: header("baggage"),
        }
    }
}

/// The aggregated-discovery client: owns the connection lifecycle, the
/// reconnect loop, and response dispatch (§4.8, component J).
pub struct XdsClient {
    config: ConnectionConfig,
    state: ObservedState,
    dispatcher: Dispatcher,
    metrics: Metrics,
    cancellation: CancellationToken,
}

impl XdsClient {
    /// Validate `config` and build a client. Does not dial.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ClientError::InvalidConfig`] if `config`
    /// fails validation.
    pub fn new(config: ConnectionConfig, dispatcher: Dispatcher, metrics: Metrics) -> ClientResult<Self> {
        config
            .validate()
            .map_err(|err| crate::error::ClientError::InvalidConfig(err.to_string()))?;
        let state = ObservedState::new(metrics.clone());
        Ok(Self {
            config,
            state,
            dispatcher,
            metrics,
            cancellation: CancellationToken::new(),
        })
    }

    /// The current connection state, readable concurrently with [`Self::run`]
    /// (§4.8 "state transitions ... readable by observers").
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Cancel the root context and transition to `Stopped`. Idempotent;
    /// safe to call from any state, including before `run` starts.
    pub fn stop(&self) {
        self.cancellation.cancel();
        self.state.stop();
    }

    /// Run the connect/receive/reconnect loop until [`Self::stop`] is
    /// called. Returns `Ok(())` on a clean stop; an error from a dial or
    /// transport failure is logged and treated as a trigger to reconnect,
    /// never returned to the caller, since the whole point of this loop is
    /// to keep retrying (§4.8 "reconnect").
    ///
    /// # Errors
    ///
    /// This function only returns `Err` if `config` somehow fails
    /// validation again after construction, which cannot happen in
    /// practice; it is `Result` for symmetry with the rest of this crate.
    pub async fn run(&self) -> ClientResult<()> {
        let mut reconnect = ReconnectController::new(
            self.config.initial_reconnect_delay,
            self.config.max_reconnect_delay,
        );

        loop {
            if self.state.get() == ConnectionState::Stopped {
                return Ok(());
            }
            if self.state.transition(ConnectionState::Connecting).is_err() {
                return Ok(());
            }

            match self.run_once(&mut reconnect).await {
                Ok(()) => {}
                Err(err) => warn!(error = %err, "xds stream ended with an error"),
            }

            if self.state.get() == ConnectionState::Stopped {
                return Ok(());
            }
            if self.state.transition(ConnectionState::Reconnecting).is_err() {
                return Ok(());
            }
            self.metrics.incr_reconnect_attempts();
            if reconnect.wait_with_context(&self.cancellation).await.is_err() {
                return Ok(());
            }
        }
    }

    async fn run_once(&self, reconnect: &mut ReconnectController) -> ClientResult<()> {
        let mut client = connection::dial(&self.config).await?;

        let (tx, rx) = mpsc::channel::<DiscoveryRequest>(OUTBOUND_CHANNEL_CAPACITY);
        for type_url in RECOGNIZED_TYPE_URLS {
            let _ = tx.send(self.subscribe_request(type_url)).await;
        }

        let outbound = ReceiverStream::new(rx);
        let response = client.stream_aggregated_resources(Request::new(outbound)).await?;
        let trace_headers = TraceHeaders::extract(response.metadata());
        let mut inbound = response.into_inner();

        if self.state.transition(ConnectionState::Connected).is_err() {
            return Ok(());
        }

        let mut last_acked: HashMap<String, String> = HashMap::new();

        loop {
            tokio::select! {
                () = self.cancellation.cancelled() => return Ok(()),
                received = tokio::time::timeout(self.config.request_timeout, inbound.message()) => {
                    let message = received.map_err(|_| crate::error::ClientError::ReceiveTimeout)?;
                    match message? {
                        Some(response) => {
                            reconnect.reset();
                            self.handle_response(response, &tx, &mut last_acked, &trace_headers).await;
                        }
                        None => return Ok(()),
                    }
                }
            }
        }
    }

    /// Dispatch one response, then ACK or NACK it. Dispatch failures are
    /// logged and turned into a NACK rather than propagated — the stream
    /// stays open so the control plane can push a corrected snapshot
    /// (§9 "NACK semantics ... should not change observable steady-state
    /// behavior").
    async fn handle_response(
        &self,
        response: DiscoveryResponse,
        outbound: &mpsc::Sender<DiscoveryRequest>,
        last_acked: &mut HashMap<String, String>,
        trace_headers: &TraceHeaders,
    ) {
        let context = RequestContext::new("xds_client")
            .with_operation("dispatch")
            .with_type_url(&response.type_url)
            .with_nonce(&response.nonce)
            .with_traceparent(trace_headers.traceparent.clone())
            .with_tracestate(trace_headers.tracestate.clone())
            .with_baggage(trace_headers.baggage.clone());
        let _guard = context.enter();

        let resources: Vec<Vec<u8>> = response.resources.iter().map(|e| e.value.clone()).collect();

        match self.dispatcher.dispatch(&response.type_url, resources).await {
            Ok(()) => {
                last_acked.insert(response.type_url.clone(), response.version_info.clone());
                let ack = self.ack_request(&response, response.version_info.clone(), None);
                let _ = outbound.send(ack).await;
            }
            Err(err) => {
                warn!(type_url = %response.type_url, error = %err, "handler failed, sending NACK");
                let previous = last_acked.get(&response.type_url).cloned().unwrap_or_default();
                let nack = self.ack_request(
                    &response,
                    previous,
                    Some(ErrorDetail {
                        message: err.to_string(),
                    }),
                );
                let _ = outbound.send(nack).await;
            }
        }
    }

    fn node(&self) -> Node {
        Node {
            id: self.config.node_id.clone(),
            cluster: self.config.node_cluster.clone(),
        }
    }

    fn subscribe_request(&self, type_url: &str) -> DiscoveryRequest {
        DiscoveryRequest {
            node: Some(self.node()),
            type_url: type_url.to_owned(),
            resource_names: Vec::new(),
            version_info: String::new(),
            response_nonce: String::new(),
            error_detail: None,
        }
    }

    fn ack_request(
        &self,
        response: &DiscoveryResponse,
        version_info: String,
        error_detail: Option<ErrorDetail>,
    ) -> DiscoveryRequest {
        DiscoveryRequest {
            node: Some(self.node()),
            type_url: response.type_url.clone(),
            resource_names: Vec::new(),
            version_info,
            response_nonce: response.nonce.clone(),
            error_detail,
        }
    }
}

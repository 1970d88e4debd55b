use tracing::Span;
use uuid::Uuid;

/// A span-entry guard returned by [`RequestContext::enter`]; dropping it
/// exits the span.
pub type RequestGuard = tracing::span::EnteredSpan;

/// Correlates the log lines emitted while dispatching one inbound
/// response to a single component/operation/request id (§4.9).
///
/// Also carries the W3C trace-propagation triplet (`traceparent`/
/// `tracestate`/`baggage`) lifted from the incoming call's metadata, when
/// the control plane sent it (§4.8, §6 — missing headers are not an
/// error, so every field here is optional).
#[derive(Debug, Clone)]
pub struct RequestContext {
    component: String,
    operation: Option<String>,
    request_id: Uuid,
    type_url: Option<String>,
    nonce: Option<String>,
    traceparent: Option<String>,
    tracestate: Option<String>,
    baggage: Option<String>,
}

impl RequestContext {
    /// Start a context for `component` (e.g. `"policy_chain_handler"`).
    #[must_use]
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            operation: None,
            request_id: Uuid::new_v4(),
            type_url: None,
            nonce: None,
            traceparent: None,
            tracestate: None,
            baggage: None,
        }
    }

    /// Name the operation within the component (e.g. `"handle_update"`).
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Attach the discovery response's outer type URL.
    #[must_use]
    pub fn with_type_url(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = Some(type_url.into());
        self
    }

    /// Attach the discovery response's nonce.
    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Attach the W3C `traceparent` header value, if the call carried one.
    #[must_use]
    pub fn with_traceparent(mut self, traceparent: Option<String>) -> Self {
        self.traceparent = traceparent;
        self
    }

    /// Attach the W3C `tracestate` header value, if the call carried one.
    #[must_use]
    pub fn with_tracestate(mut self, tracestate: Option<String>) -> Self {
        self.tracestate = tracestate;
        self
    }

    /// Attach the W3C `baggage` header value, if the call carried one.
    #[must_use]
    pub fn with_baggage(mut self, baggage: Option<String>) -> Self {
        self.baggage = baggage;
        self
    }

    /// The request id generated for this context.
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Build the `tracing::Span` carrying this context's fields.
    #[must_use]
    pub fn span(&self) -> Span {
        tracing::info_span!(
            "request",
            component = %self.component,
            operation = self.operation.as_deref().unwrap_or(""),
            request_id = %self.request_id,
            type_url = self.type_url.as_deref().unwrap_or(""),
            nonce = self.nonce.as_deref().unwrap_or(""),
            traceparent = self.traceparent.as_deref().unwrap_or(""),
            tracestate = self.tracestate.as_deref().unwrap_or(""),
            baggage = self.baggage.as_deref().unwrap_or(""),
        )
    }

    /// Enter this context's span for the duration of the returned guard.
    #[must_use]
    pub fn enter(&self) -> RequestGuard {
        self.span().entered()
    }
}

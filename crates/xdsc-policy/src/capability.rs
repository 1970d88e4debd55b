use std::collections::HashMap;

use async_trait::async_trait;

/// Whether a policy needs the HTTP body buffered, streamed, or not at all,
/// per direction (§4.4 step 5, REDESIGN FLAGS — "capability set, not a
/// class hierarchy").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    /// The policy never looks at the body.
    None,
    /// The policy needs the whole body available before it runs.
    Buffer,
    /// The policy consumes the body incrementally.
    Stream,
}

impl BodyMode {
    /// Whether this mode requires either buffering or streaming — the
    /// predicate the chain builder aggregates into
    /// `requires_request_body`/`requires_response_body`.
    #[must_use]
    pub fn requires_body(self) -> bool {
        !matches!(self, BodyMode::None)
    }
}

/// Per-route, per-API context handed to every policy instance at
/// construction time (§4.4 step 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyMetadata {
    /// The route this policy instance is bound to.
    pub route_key: String,
    /// Owning API identifier.
    pub api_id: String,
    /// Owning API display name.
    pub api_name: String,
    /// Owning API revision.
    pub api_version: String,
    /// Attachment level copied from a string-valued `attachedTo` parameter,
    /// if the route's configuration declared one.
    pub attached_to: Option<String>,
}

/// The capability set every policy instance implements (§9 REDESIGN FLAGS:
/// tagged variants or narrow interfaces, not a class hierarchy).
///
/// Instances are stateless with respect to a specific request/response pair
/// — any per-call state belongs to the caller, not to `self`.
#[async_trait]
pub trait Policy: Send + Sync {
    /// Called on the inbound request, if `mode().0` requires a body.
    async fn on_request(&self, parameters: &HashMap<String, serde_json::Value>);

    /// Called on the outbound response, if `mode().1` requires a body.
    async fn on_response(&self, parameters: &HashMap<String, serde_json::Value>);

    /// Declared body requirements: `(request mode, response mode)`.
    fn mode(&self) -> (BodyMode, BodyMode);
}

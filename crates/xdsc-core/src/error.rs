use thiserror::Error;

/// Errors raised while validating configuration or decoding resource
/// envelopes — the two concerns every other crate in this workspace builds
/// on top of.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Raised by [`crate::config::ConnectionConfig::validate`].
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The outer envelope's bytes were not a valid [`xdsc_proto::Envelope`].
    #[error("cannot unmarshal inner envelope: {0}")]
    InnerEnvelopeDecode(#[source] prost::DecodeError),

    /// The inner envelope's bytes were not a valid structured document.
    #[error("cannot unmarshal structured document: {0}")]
    StructuredDocumentDecode(#[source] serde_json::Error),

    /// The structured document did not match the typed target for this
    /// outer `type_url`.
    #[error("cannot decode resource into target type: {0}")]
    TargetDecode(#[source] serde_json::Error),
}

/// Result alias used throughout this crate.
pub type CoreResult<T> = Result<T, CoreError>;

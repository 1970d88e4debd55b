use thiserror::Error;

/// Errors raised by the xDS client (§4.8, component J).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Construction-time or dial-time configuration problem.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Mutual-TLS bootstrap failed.
    #[error(transparent)]
    Tls(#[from] xdsc_tls::TlsError),

    /// The transport channel could not be built or connected.
    #[error(transparent)]
    Dial(#[from] tonic::transport::Error),

    /// The gRPC stream reported a status error.
    #[error(transparent)]
    Grpc(#[from] tonic::Status),

    /// No message arrived within `request_timeout` of the previous one.
    #[error("no message received within the request timeout")]
    ReceiveTimeout,

    /// The policy-chain handler reported a malformed wire frame.
    #[error(transparent)]
    Kernel(#[from] xdsc_kernel::KernelError),

    /// The API-key handler reported a failure.
    #[error(transparent)]
    ApiKeys(#[from] xdsc_apikeys::ApiKeysError),

    /// The lazy-resource handler reported a failure.
    #[error(transparent)]
    Lazy(#[from] xdsc_lazy::LazyError),
}

/// Result alias used throughout this crate.
pub type ClientResult<T> = Result<T, ClientError>;

use thiserror::Error;

/// Errors raised by [`crate::controller::ReconnectController`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconnectError {
    /// The wait was cut short by cancellation (§4.1, §5).
    #[error("reconnect wait cancelled")]
    Cancelled,
}

use thiserror::Error;

/// Errors raised by [`crate::handler::PolicyChainResourceHandler`].
///
/// Per-resource validation and build failures are deliberately *not*
/// represented here — §4.5 requires they be logged and skipped, never
/// propagated. This type only wraps the failures that indicate a
/// malformed wire frame rather than a stale policy reference.
#[derive(Debug, Error)]
pub enum KernelError {
    /// The outer envelope or inner structured document could not be
    /// decoded at all (§4.3 steps 2/3).
    #[error(transparent)]
    Decode(#[from] xdsc_core::CoreError),
}

/// Result alias used throughout this crate.
pub type KernelResult<T> = Result<T, KernelError>;

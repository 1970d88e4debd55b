use thiserror::Error;

/// Errors raised by the lazy-resource store and its handler (§4.7,
/// component I).
#[derive(Debug, Error)]
pub enum LazyError {
    /// The store could not install the replacement snapshot.
    #[error("failed to replace lazy resource {id} ({resource_type}): {reason}")]
    ReplaceFailed {
        /// The resource whose replacement failed.
        id: String,
        /// The resource's declared type.
        resource_type: String,
        /// A human-readable reason.
        reason: String,
    },
}

/// Result alias used throughout this crate.
pub type LazyResult<T> = Result<T, LazyError>;

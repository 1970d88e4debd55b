use thiserror::Error;

/// Errors raised while resolving a policy definition or instantiating it
/// (component D, the registry collaborator).
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No definition is registered for `(name, version)`.
    #[error("no policy registered for ({name}, {version})")]
    NotFound {
        /// The policy name that was looked up.
        name: String,
        /// The policy version that was looked up.
        version: String,
    },
    /// The factory for `(name, version)` refused to build an instance, e.g.
    /// because the supplied parameters failed its own validation.
    #[error("policy ({name}, {version}) failed to instantiate: {reason}")]
    Instantiation {
        /// The policy name passed to the factory.
        name: String,
        /// The policy version passed to the factory.
        version: String,
        /// A human-readable reason from the factory.
        reason: String,
    },
}

/// Errors raised while building a [`crate::chain::BuiltPolicyChain`] from a
/// route's policy configuration (component F).
#[derive(Debug, Error)]
pub enum BuilderError {
    /// A policy instance in the route's configuration named an empty
    /// `name` or `version`.
    #[error("policy instance at index {index} has an empty name or version")]
    EmptyNameOrVersion {
        /// Position of the offending instance in the route's declared
        /// order.
        index: usize,
    },
    /// The registry could not resolve or instantiate a declared policy.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result alias for [`RegistryError`].
pub type RegistryResult<T> = Result<T, RegistryError>;
/// Result alias for [`BuilderError`].
pub type BuilderResult<T> = Result<T, BuilderError>;

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

//! The policy capability model, the registry collaborator trait, and the
//! per-route chain builder (§4.4, component F).

mod builder;
mod capability;
mod chain;
mod error;
mod registry;

pub use builder::build_chain;
pub use capability::{BodyMode, Policy, PolicyMetadata};
pub use chain::{BuiltPolicyChain, PolicySpec};
pub use error::{BuilderError, BuilderResult, RegistryError, RegistryResult};
pub use registry::PolicyRegistry;

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

//! Test doubles shared across the workspace: a fake [`PolicyRegistry`][xdsc_policy::PolicyRegistry]
//! backed by in-memory registrations, and a fake aggregated-discovery gRPC
//! server for end-to-end reconnect tests (§4.9).

mod registry;
mod server;

pub use registry::{FakePolicyRegistry, PolicyFactory, TestPolicy};
pub use server::FakeDiscoveryServer;

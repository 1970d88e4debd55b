//! Generated wire types for the policy-engine aggregated discovery stream.
//!
//! This crate exists solely to isolate the `tonic-build`/`prost` code
//! generation step from the rest of the workspace, the same split
//! `dimetron-agentgateway` and `vishalbelsare-agentgateway` use for their
//! own `crates/xds` protobuf crates.

#![deny(unsafe_code)]
#![warn(unreachable_pub)]

tonic::include_proto!("policy.xds.v3");

pub use aggregated_discovery_service_client::AggregatedDiscoveryServiceClient;
pub use aggregated_discovery_service_server::{
    AggregatedDiscoveryService, AggregatedDiscoveryServiceServer,
};

/// The inner envelope's `type_url` sentinel for a generic structured
/// document, per the spec's "structured-document sentinel" (§3).
pub const STRUCTURED_DOCUMENT_TYPE_URL: &str = "type.googleapis.com/google.protobuf.Struct";

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

//! Logging setup, request context spans, and Prometheus metrics — the
//! ambient observability stack for the policy xDS client (§3.1, §4.9).

mod context;
mod error;
mod logging;
mod metrics;

pub use context::{RequestContext, RequestGuard};
pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
pub use metrics::Metrics;

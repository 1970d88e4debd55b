#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

//! The aggregated-discovery client: dial, mutual-TLS transport, the
//! connect/receive/reconnect loop, and per-`type_url` response dispatch
//! (§4.8, component J).

mod client;
mod connection;
mod dispatch;
mod error;
mod state;

pub use client::XdsClient;
pub use connection::dial;
pub use dispatch::Dispatcher;
pub use error::{ClientError, ClientResult};

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

//! Exponential-backoff reconnect controller for the policy xDS client
//! (§4.1, component A).

mod controller;
mod error;

pub use controller::ReconnectController;
pub use error::ReconnectError;

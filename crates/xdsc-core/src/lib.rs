#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

//! Core types shared by every crate in the policy xDS client: connection
//! config and state, the closed set of recognized type URLs, the resource
//! envelope decoder, and the plain data decoded out of it.

/// `ConnectionConfig` and its validation.
pub mod config;
/// Typed targets decoded from resource envelopes.
pub mod domain;
/// The double-wrap resource envelope decoder (§4.3).
pub mod envelope;
/// Shared error type for this crate.
pub mod error;
/// `ConnectionState` and its transition table.
pub mod state;
/// Recognized outer type URLs and the route-key/api-name convention.
pub mod type_urls;

pub use config::ConnectionConfig;
pub use error::{CoreError, CoreResult};
pub use state::{ConnectionState, ConnectionStateHandle, IllegalTransition};

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

//! Mutual-TLS bootstrap for the policy xDS client's transport (§4.2,
//! component B).

mod bootstrap;
mod error;

pub use bootstrap::TlsBootstrapper;
pub use error::{TlsError, TlsResult};

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

//! The in-memory API-key store and the resource handler that keeps it in
//! sync with both delivery modes on the wire (§4.6, component H).

mod error;
mod handler;
mod store;

pub use error::{ApiKeysError, ApiKeysResult};
pub use handler::ApiKeyResourceHandler;
pub use store::{ApiKeyStore, InMemoryApiKeyStore};

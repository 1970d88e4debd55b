#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

//! The in-memory lazy-resource store and its state-of-world handler
//! (§4.7, component I).

mod error;
mod handler;
mod store;

pub use error::{LazyError, LazyResult};
pub use handler::LazyResourceHandler;
pub use store::{InMemoryLazyResourceStore, LazyResourceStore};

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

//! Three-tier configuration: an embedded `defaults.toml`, an optional
//! config file, and `XDSC_*` environment variables, merged lowest to
//! highest precedence (§4.9 expansion).

mod error;
mod loader;
mod types;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load, ResolvedXdscConfig};
pub use types::{ConfigSource, ConnectionConfigFile};

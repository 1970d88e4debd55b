use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while bootstrapping the mutual-TLS transport (§4.2,
/// component B). Each variant names a distinct failure per the spec's
/// requirement for "distinct error kinds."
#[derive(Debug, Error)]
pub enum TlsError {
    /// The client certificate or private key could not be loaded.
    #[error("cannot load client certificate from {path}: {source}")]
    ClientCertLoad {
        /// The path that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The CA file could not be read from disk.
    #[error("cannot read CA file {path}: {source}")]
    CaRead {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The CA file was read but did not contain a parseable certificate.
    #[error("CA file {path} is not a parseable certificate")]
    CaNotParseable {
        /// The path whose contents failed to parse.
        path: PathBuf,
    },
}

/// Result alias used throughout this crate.
pub type TlsResult<T> = Result<T, TlsError>;

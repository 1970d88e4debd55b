use std::io;

use thiserror::Error;

/// Errors raised while loading and resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file named by its path could not be read.
    #[error("failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that failed to read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The config file's contents did not parse as TOML.
    #[error("failed to parse config file at {path}: {source}")]
    ParseError {
        /// The path that failed to parse.
        path: String,
        /// The underlying TOML parse error.
        #[source]
        source: toml::de::Error,
    },

    /// The embedded defaults failed to parse — a build-time invariant,
    /// surfaced rather than panicked on so a caller can report it cleanly.
    #[error("failed to parse embedded defaults: {0}")]
    DefaultsCorrupt(#[source] toml::de::Error),

    /// An `XDSC_*` environment variable held a value that did not coerce
    /// to its field's type.
    #[error("environment variable {var_name} holds an invalid value: {message}")]
    InvalidEnvValue {
        /// The environment variable name.
        var_name: String,
        /// A human-readable reason.
        message: String,
    },

    /// The fully-resolved connection config failed validation.
    #[error("resolved config is invalid: {0}")]
    Invalid(#[from] xdsc_core::CoreError),
}

/// Result alias used throughout this crate.
pub type ConfigResult<T> = Result<T, ConfigError>;

use thiserror::Error;

/// Errors that can occur with telemetry operations.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A logging directive or format could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The global tracing subscriber could not be installed (e.g. a second
    /// attempt after one already succeeded).
    #[error("initialization error: {0}")]
    Init(String),

    /// A Prometheus metric could not be registered, usually a name
    /// collision with a previously registered metric.
    #[error(transparent)]
    Metrics(#[from] prometheus::Error),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

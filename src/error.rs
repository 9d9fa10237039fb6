//! Error types for the statistic service.
//!
//! `LogError` covers the logging core; `ServiceError` covers startup and the
//! server lifecycle.

use config::ConfigError;
use thiserror::Error;

/// Errors raised by the logging core.
///
/// Per-record variants (`Encode`, `Decode`, `Write`) mean that one record was
/// lost; the handler that returned them stays usable.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("unknown environment tag: {0:?}")]
    UnknownEnvironment(String),

    #[error("error when encoding record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("error when unmarshaling encoder output: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("error when writing record: {0}")]
    Write(#[from] std::io::Error),
}

/// Errors raised while running the service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unable to load config: {0}")]
    Config(#[from] ConfigError),

    #[error("unable to start tcp listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("unable to serve requests: {0}")]
    Serve(#[source] std::io::Error),
}

/// Result type alias for logging operations.
pub type LogResult<T> = Result<T, LogError>;

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

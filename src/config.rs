//! Configuration module for the statistic service.
//!
//! Loads configuration from YAML files and environment variables.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::LogError;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "APP_CONFIG_PATH";

/// Deployment environment; selects the log sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvType {
    /// Developer machine: colorized console output.
    Local,
    /// Networked deployment: one JSON record per line on stdout.
    Dev,
    /// Test runs: everything is discarded.
    Testing,
}

impl EnvType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvType::Local => "local",
            EnvType::Dev => "dev",
            EnvType::Testing => "testing",
        }
    }
}

impl fmt::Display for EnvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvType {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(EnvType::Local),
            "dev" => Ok(EnvType::Dev),
            "testing" => Ok(EnvType::Testing),
            other => Err(LogError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Environment tag. Unknown tags fail the load.
    pub env: EnvType,
    pub application_name: String,
    pub server: ServerConfig,
    pub timeouts: TimeoutsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Request handling timeouts.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutsConfig {
    /// Upper bound for a single endpoint execution, in milliseconds.
    pub endpoint_execution_timeout_ms: u64,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (STATISTIC__*)
    /// 2. File named by `APP_CONFIG_PATH` (required if the variable is set)
    /// 3. config/default.yaml
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder =
            ConfigLoader::builder().add_source(File::with_name("config/default").required(false));

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.is_empty() {
                builder = builder.add_source(File::with_name(&path).required(true));
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix("STATISTIC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Endpoint execution timeout as a [`Duration`].
    pub fn endpoint_execution_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.endpoint_execution_timeout_ms)
    }
}

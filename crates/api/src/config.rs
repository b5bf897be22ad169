use std::path::PathBuf;

use netmon_db::{DbError, TimeseriesConfig};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error(transparent)]
    Timeseries(#[from] DbError),
}

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
}

impl ServerConfig {
    /// | Env Var | Default   |
    /// |---------|-----------|
    /// | `HOST`  | `0.0.0.0` |
    /// | `PORT`  | `3000`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "a valid u16",
                value: raw,
            })?,
            Err(_) => 3000,
        };

        Ok(Self { host, port })
    }
}

/// Everything the service reads from its environment at startup.
#[derive(Debug, Clone)]
pub struct MonitoringConfig {
    pub server: ServerConfig,
    pub timeseries: TimeseriesConfig,
    /// Optional JSON file extending the built-in metric definitions
    /// (`METRICS_CONFIG`).
    pub metrics_config: Option<PathBuf>,
}

impl MonitoringConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            timeseries: TimeseriesConfig::from_env()?,
            metrics_config: std::env::var_os("METRICS_CONFIG").map(PathBuf::from),
        })
    }
}

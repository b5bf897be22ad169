use async_trait::async_trait;

use crate::config::TimeseriesConfig;
use crate::error::DbError;
use crate::influxdb::InfluxDbBackend;
use crate::postgres::PostgresBackend;

/// A time-series store the monitoring app writes samples to.
#[async_trait]
pub trait TimeseriesBackend: Send + Sync {
    /// Name of the database this backend manages.
    fn database_name(&self) -> &str;

    /// Create the database if it does not exist yet.
    ///
    /// Creating an existing database is a no-op. Failures to reach the
    /// store are reported as [`DbError::Unavailable`].
    async fn create_database(&self) -> Result<(), DbError>;
}

/// Build the backend matching the scheme of `config.url`.
///
/// `http`/`https` select InfluxDB; `postgres`/`postgresql` select
/// PostgreSQL (TimescaleDB).
pub fn connect_backend(config: &TimeseriesConfig) -> Result<Box<dyn TimeseriesBackend>, DbError> {
    let scheme = config
        .url
        .split_once("://")
        .map(|(scheme, _)| scheme.to_ascii_lowercase())
        .ok_or_else(|| DbError::Config(format!("missing scheme in '{}'", config.url)))?;

    match scheme.as_str() {
        "http" | "https" => Ok(Box::new(InfluxDbBackend::new(config)?)),
        "postgres" | "postgresql" => Ok(Box::new(PostgresBackend::new(config))),
        other => Err(DbError::Config(format!(
            "unsupported timeseries scheme '{other}'"
        ))),
    }
}

use std::time::Duration;

use crate::error::DbError;

/// Connection settings for the time-series store.
#[derive(Debug, Clone)]
pub struct TimeseriesConfig {
    /// Store endpoint. For PostgreSQL this is the maintenance connection
    /// used to create the database, not the database itself.
    pub url: String,
    /// Database to ensure exists.
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Per-request timeout for HTTP backends.
    pub request_timeout: Duration,
    /// Time allowed to establish a connection to HTTP backends.
    pub connect_timeout: Duration,
}

impl Default for TimeseriesConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8086".into(),
            database: "netmon".into(),
            username: None,
            password: None,
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl TimeseriesConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default                 |
    /// |-----------------------------------|-------------------------|
    /// | `TIMESERIES_URL`                  | `http://localhost:8086` |
    /// | `TIMESERIES_DATABASE`             | `netmon`                |
    /// | `TIMESERIES_USERNAME`             | unset                   |
    /// | `TIMESERIES_PASSWORD`             | unset                   |
    /// | `TIMESERIES_TIMEOUT_SECS`         | `10`                    |
    /// | `TIMESERIES_CONNECT_TIMEOUT_SECS` | `5`                     |
    pub fn from_env() -> Result<Self, DbError> {
        let defaults = Self::default();

        let request_timeout = secs_from_env("TIMESERIES_TIMEOUT_SECS", defaults.request_timeout)?;
        let connect_timeout =
            secs_from_env("TIMESERIES_CONNECT_TIMEOUT_SECS", defaults.connect_timeout)?;

        Ok(Self {
            url: std::env::var("TIMESERIES_URL").unwrap_or(defaults.url),
            database: std::env::var("TIMESERIES_DATABASE").unwrap_or(defaults.database),
            username: std::env::var("TIMESERIES_USERNAME").ok(),
            password: std::env::var("TIMESERIES_PASSWORD").ok(),
            request_timeout,
            connect_timeout,
        })
    }
}

fn secs_from_env(name: &str, default: Duration) -> Result<Duration, DbError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| DbError::Config(format!("{name} must be a number, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}

//! Time-series store access for netmon.
//!
//! - [`TimeseriesBackend`] — the operations startup needs from a store.
//! - [`InfluxDbBackend`] / [`PostgresBackend`] — concrete stores, selected
//!   from configuration by [`connect_backend`].
//! - [`ensure_database`] — idempotent database creation with bounded retry.

pub mod backend;
pub mod config;
pub mod error;
pub mod influxdb;
pub mod init;
pub mod postgres;

pub use backend::{connect_backend, TimeseriesBackend};
pub use config::TimeseriesConfig;
pub use error::DbError;
pub use influxdb::InfluxDbBackend;
pub use init::{ensure_database, RetryPolicy};
pub use postgres::PostgresBackend;

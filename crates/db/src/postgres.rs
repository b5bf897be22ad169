//! PostgreSQL / TimescaleDB backend.

use async_trait::async_trait;
use sqlx::{Connection, Executor, PgConnection};

use crate::backend::TimeseriesBackend;
use crate::config::TimeseriesConfig;
use crate::error::DbError;

/// SQLSTATE raised when the database already exists.
const DUPLICATE_DATABASE: &str = "42P04";

pub struct PostgresBackend {
    admin_url: String,
    database: String,
}

/// Another process created the database between our check and our create.
fn is_duplicate_database(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(e) if e.code().as_deref() == Some(DUPLICATE_DATABASE))
}

impl PostgresBackend {
    pub fn new(config: &TimeseriesConfig) -> Self {
        Self {
            admin_url: config.url.clone(),
            database: config.database.clone(),
        }
    }
}

#[async_trait]
impl TimeseriesBackend for PostgresBackend {
    fn database_name(&self) -> &str {
        &self.database
    }

    async fn create_database(&self) -> Result<(), DbError> {
        let mut conn = PgConnection::connect(&self.admin_url).await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
                .bind(&self.database)
                .fetch_one(&mut conn)
                .await?;

        if !exists {
            let statement = format!("CREATE DATABASE \"{}\"", self.database.replace('"', "\"\""));
            match conn.execute(statement.as_str()).await {
                Ok(_) => tracing::info!(database = %self.database, "Created timeseries database"),
                Err(e) if is_duplicate_database(&e) => {
                    tracing::debug!(database = %self.database, "Timeseries database already exists");
                }
                Err(e) => return Err(e.into()),
            }
        }

        conn.close().await?;
        Ok(())
    }
}

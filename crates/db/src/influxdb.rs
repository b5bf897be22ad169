//! InfluxDB 1.x backend over the HTTP query API.

use async_trait::async_trait;
use serde_json::Value;

use crate::backend::TimeseriesBackend;
use crate::config::TimeseriesConfig;
use crate::error::DbError;

pub struct InfluxDbBackend {
    client: reqwest::Client,
    base_url: String,
    database: String,
    username: Option<String>,
    password: Option<String>,
}

impl InfluxDbBackend {
    pub fn new(config: &TimeseriesConfig) -> Result<Self, DbError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| DbError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            database: config.database.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn create_statement(&self) -> String {
        format!(
            "CREATE DATABASE \"{}\"",
            self.database.replace('"', "\\\"")
        )
    }
}

#[async_trait]
impl TimeseriesBackend for InfluxDbBackend {
    fn database_name(&self) -> &str {
        &self.database
    }

    async fn create_database(&self) -> Result<(), DbError> {
        let statement = self.create_statement();
        let mut request = self
            .client
            .post(format!("{}/query", self.base_url))
            .query(&[("q", statement.as_str())]);
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DbError::Query(format!("InfluxDB returned {status}: {body}")));
        }

        let body: Value = response.json().await?;
        if let Some(error) = statement_error(&body) {
            return Err(DbError::Query(error));
        }

        tracing::debug!(database = %self.database, "InfluxDB database ensured");
        Ok(())
    }
}

/// Extract the error reported for the first statement of a query response.
fn statement_error(body: &Value) -> Option<String> {
    body.get("results")
        .and_then(|results| results.get(0))
        .and_then(|result| result.get("error"))
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn backend(url: &str, database: &str) -> InfluxDbBackend {
        InfluxDbBackend::new(&TimeseriesConfig {
            url: url.to_string(),
            database: database.to_string(),
            ..TimeseriesConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn successful_response_has_no_error() {
        let body = json!({"results": [{"statement_id": 0}]});
        assert_eq!(statement_error(&body), None);
    }

    #[test]
    fn statement_error_is_extracted() {
        let body = json!({"results": [{"statement_id": 0, "error": "unauthorized"}]});
        assert_eq!(statement_error(&body).as_deref(), Some("unauthorized"));
    }

    #[test]
    fn top_level_error_is_extracted() {
        let body = json!({"error": "missing required parameter \"q\""});
        assert!(statement_error(&body).unwrap().starts_with("missing"));
    }

    #[test]
    fn database_name_is_quoted() {
        let backend = backend("http://localhost:8086/", "my\"db");
        assert_eq!(backend.create_statement(), r#"CREATE DATABASE "my\"db""#);
        assert_eq!(backend.base_url, "http://localhost:8086");
    }
}

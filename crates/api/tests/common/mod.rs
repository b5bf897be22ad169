#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use netmon_api::bootstrap::Monitoring;
use netmon_core::{CoreError, Metric, Timestamp};
use netmon_db::{DbError, RetryPolicy, TimeseriesBackend};

/// Backend whose creation fails with `Unavailable` for the first
/// `failures` calls.
pub struct StubBackend {
    failures: u32,
    calls: AtomicU32,
}

impl StubBackend {
    pub fn healthy() -> Self {
        Self::failing(0)
    }

    pub fn failing(failures: u32) -> Self {
        Self {
            failures,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TimeseriesBackend for StubBackend {
    fn database_name(&self) -> &str {
        "netmon_test"
    }

    async fn create_database(&self) -> Result<(), DbError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures {
            return Err(DbError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

/// Metric that records every threshold check it receives.
pub struct RecordingMetric {
    field_name: String,
    pub checks: Mutex<Vec<(f64, Option<Timestamp>, Option<String>, bool)>>,
}

impl RecordingMetric {
    pub fn new(field_name: &str) -> Arc<Self> {
        Arc::new(Self {
            field_name: field_name.to_string(),
            checks: Mutex::new(Vec::new()),
        })
    }
}

impl Metric for RecordingMetric {
    fn name(&self) -> &str {
        "device temperature"
    }

    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn check_threshold(
        &self,
        value: f64,
        time: Option<Timestamp>,
        retention_policy: Option<&str>,
        send_alert: bool,
    ) -> Result<(), CoreError> {
        self.checks.lock().unwrap().push((
            value,
            time,
            retention_policy.map(str::to_string),
            send_alert,
        ));
        Ok(())
    }
}

/// Bootstrap against a healthy stub backend with the built-in metrics.
pub async fn ready_monitoring() -> Monitoring {
    Monitoring::ready(&StubBackend::healthy(), &RetryPolicy::default(), None)
        .await
        .expect("bootstrap should succeed")
}

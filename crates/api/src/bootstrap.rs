//! Application startup.
//!
//! [`Monitoring::ready`] runs once when the service boots: it makes sure
//! the time-series database exists, loads metric definitions, registers
//! their notification types, and connects the threshold check to the
//! metric-write signal. Any failure aborts startup; there is no degraded
//! mode.

use std::path::Path;

use serde::Serialize;

use netmon_core::{
    load_metric_configuration, register_metric_notifications, CoreError, MetricConfigMap,
    NotificationTypeRegistry,
};
use netmon_db::{ensure_database, DbError, RetryPolicy, TimeseriesBackend};
use netmon_events::{
    check_metric_threshold, DispatchError, MetricWritten, Signal, CHECK_THRESHOLD_UID,
    POST_METRIC_WRITE,
};

/// Settings consumed by the admin front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdminSettings {
    pub show_userlinks_block: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Timeseries database initialization failed: {0}")]
    Database(#[from] DbError),

    #[error("Metric configuration failed: {0}")]
    Config(#[from] CoreError),
}

/// The initialized monitoring application.
pub struct Monitoring {
    pub database: String,
    pub settings: AdminSettings,
    pub metrics: MetricConfigMap,
    pub notifications: NotificationTypeRegistry,
    pub post_metric_write: Signal<MetricWritten>,
}

impl Monitoring {
    pub async fn ready(
        backend: &dyn TimeseriesBackend,
        retry: &RetryPolicy,
        metrics_config: Option<&Path>,
    ) -> Result<Self, BootstrapError> {
        ensure_database(backend, retry).await?;

        let settings = AdminSettings {
            show_userlinks_block: true,
        };

        let metrics = load_metric_configuration(metrics_config)?;
        let mut notifications = NotificationTypeRegistry::new();
        for (name, config) in &metrics {
            register_metric_notifications(&mut notifications, name, config)?;
        }
        tracing::info!(
            metrics = metrics.len(),
            notification_types = notifications.len(),
            "Metric configuration loaded",
        );

        let post_metric_write = Signal::new(POST_METRIC_WRITE);
        post_metric_write.connect(CHECK_THRESHOLD_UID, check_metric_threshold);

        Ok(Self {
            database: backend.database_name().to_string(),
            settings,
            metrics,
            notifications,
            post_metric_write,
        })
    }

    /// Announce a metric write to every connected receiver.
    pub fn record_write(&self, event: &MetricWritten) -> Result<usize, DispatchError> {
        self.post_metric_write.send(event)
    }
}

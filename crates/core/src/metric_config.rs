//! Metric definitions and their loader.
//!
//! A built-in set of metrics ([`default_metrics`]) can be extended or
//! overridden by a JSON object keyed by metric name:
//!
//! ```json
//! {
//!   "temperature": {
//!     "label": "Temperature",
//!     "name": "Temperature",
//!     "key": "temperature",
//!     "field_name": "temperature",
//!     "alert_settings": { "operator": ">", "threshold": 70.0, "tolerance": 5 }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Metric definitions keyed by metric name.
pub type MetricConfigMap = BTreeMap<String, MetricConfig>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    pub label: String,
    pub name: String,
    /// Measurement key in the time-series store.
    pub key: String,
    /// Field of a write payload the threshold is checked against.
    pub field_name: String,
    #[serde(default)]
    pub related_fields: Vec<String>,
    #[serde(default)]
    pub alert_settings: Option<AlertSettings>,
    #[serde(default)]
    pub notification: Option<MetricNotifications>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdOperator {
    #[serde(rename = "<")]
    Below,
    #[serde(rename = ">")]
    Above,
}

/// Default alert bounds for a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSettings {
    pub operator: ThresholdOperator,
    pub threshold: f64,
    /// Minutes a breach must persist before an alert fires.
    #[serde(default)]
    pub tolerance: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// Wording of a single notification kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationTemplate {
    pub verbose_name: String,
    pub verb: String,
    pub level: NotificationLevel,
    pub email_subject: String,
    pub message: String,
}

/// Notifications sent when a metric crosses its threshold and when it recovers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricNotifications {
    pub problem: NotificationTemplate,
    pub recovery: NotificationTemplate,
}

fn template(
    verbose_name: &str,
    verb: &str,
    level: NotificationLevel,
    subject: &str,
) -> NotificationTemplate {
    NotificationTemplate {
        verbose_name: verbose_name.to_string(),
        verb: verb.to_string(),
        level,
        email_subject: format!("[{{site}}] {subject}"),
        message: format!("The device {{target}} {verb}."),
    }
}

fn usage_metric(key: &str, label: &str, field_name: &str, threshold: f64) -> MetricConfig {
    let upper = key.to_uppercase();
    MetricConfig {
        label: label.to_string(),
        name: label.to_string(),
        key: key.to_string(),
        field_name: field_name.to_string(),
        related_fields: Vec::new(),
        alert_settings: Some(AlertSettings {
            operator: ThresholdOperator::Above,
            threshold,
            tolerance: 5,
        }),
        notification: Some(MetricNotifications {
            problem: template(
                &format!("{upper} PROBLEM"),
                &format!("{} usage exceeded {threshold}%", label.to_lowercase()),
                NotificationLevel::Warning,
                &format!("PROBLEM: {label} usage high on {{target}}"),
            ),
            recovery: template(
                &format!("{upper} RECOVERY"),
                &format!("{} usage returned below {threshold}%", label.to_lowercase()),
                NotificationLevel::Info,
                &format!("RECOVERY: {label} usage back to normal on {{target}}"),
            ),
        }),
    }
}

/// Metrics known without any configuration file.
pub fn default_metrics() -> MetricConfigMap {
    let mut metrics = MetricConfigMap::new();

    metrics.insert(
        "ping".to_string(),
        MetricConfig {
            label: "Ping".to_string(),
            name: "Ping".to_string(),
            key: "ping".to_string(),
            field_name: "reachable".to_string(),
            related_fields: vec![
                "loss".to_string(),
                "rtt_min".to_string(),
                "rtt_max".to_string(),
                "rtt_avg".to_string(),
            ],
            alert_settings: Some(AlertSettings {
                operator: ThresholdOperator::Below,
                threshold: 1.0,
                tolerance: 0,
            }),
            notification: Some(MetricNotifications {
                problem: template(
                    "PING PROBLEM",
                    "cannot be reached anymore",
                    NotificationLevel::Warning,
                    "{target} is not reachable",
                ),
                recovery: template(
                    "PING RECOVERY",
                    "is reachable again",
                    NotificationLevel::Info,
                    "{target} is reachable again",
                ),
            }),
        },
    );
    metrics.insert(
        "disk".to_string(),
        usage_metric("disk", "Disk", "used_disk", 90.0),
    );
    metrics.insert(
        "memory".to_string(),
        usage_metric("memory", "Memory", "percent_used", 95.0),
    );
    metrics.insert(
        "cpu".to_string(),
        usage_metric("cpu", "CPU", "cpu_usage", 90.0),
    );

    metrics
}

/// Load the metric configuration: built-in defaults, extended or overridden
/// by the entries of the JSON file at `path` when one is given.
pub fn load_metric_configuration(path: Option<&Path>) -> Result<MetricConfigMap, CoreError> {
    let mut metrics = default_metrics();

    if let Some(path) = path {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Validation(format!(
                "cannot read metric configuration {}: {e}",
                path.display()
            ))
        })?;
        let overrides: MetricConfigMap = serde_json::from_str(&raw).map_err(|e| {
            CoreError::Validation(format!(
                "invalid metric configuration {}: {e}",
                path.display()
            ))
        })?;
        metrics.extend(overrides);
    }

    for (name, config) in &metrics {
        validate_metric(name, config)?;
    }

    Ok(metrics)
}

fn validate_metric(name: &str, config: &MetricConfig) -> Result<(), CoreError> {
    if config.field_name.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "metric '{name}' must define a field_name"
        )));
    }
    if let Some(alert) = &config.alert_settings {
        if !alert.threshold.is_finite() {
            return Err(CoreError::Validation(format!(
                "metric '{name}' has a non-finite threshold"
            )));
        }
    }
    Ok(())
}

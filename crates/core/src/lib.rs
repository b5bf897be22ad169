//! Domain types shared by the netmon crates.
//!
//! - [`Metric`] — the contract a metric entity exposes to threshold checks.
//! - [`TimeInput`] — write-event timestamps, raw text or already parsed.
//! - [`metric_config`] — metric definitions and their loader.
//! - [`NotificationTypeRegistry`] — notification types derived from metric
//!   definitions.

pub mod error;
pub mod metric;
pub mod metric_config;
pub mod notification;
pub mod time;
pub mod types;

pub use error::CoreError;
pub use metric::Metric;
pub use metric_config::{load_metric_configuration, MetricConfig, MetricConfigMap};
pub use notification::{register_metric_notifications, NotificationType, NotificationTypeRegistry};
pub use time::{parse_timestamp, TimeInput, TIMESTAMP_FORMAT};
pub use types::{MetricValues, Timestamp};

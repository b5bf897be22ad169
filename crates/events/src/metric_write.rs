use std::fmt;
use std::sync::Arc;

use netmon_core::{Metric, MetricValues, TimeInput};

/// Name of the signal carrying [`MetricWritten`] events.
pub const POST_METRIC_WRITE: &str = "post_metric_write";

/// Samples of a metric were written to the time-series store.
///
/// Constructed via [`MetricWritten::new`] (alerts enabled, no explicit time)
/// and adjusted with the builder methods.
#[derive(Clone)]
pub struct MetricWritten {
    pub metric: Arc<dyn Metric>,
    pub values: MetricValues,
    pub send_alert: bool,
    pub time: Option<TimeInput>,
    pub retention_policy: Option<String>,
}

impl MetricWritten {
    pub fn new(metric: Arc<dyn Metric>, values: MetricValues) -> Self {
        Self {
            metric,
            values,
            send_alert: true,
            time: None,
            retention_policy: None,
        }
    }

    pub fn with_time(mut self, time: impl Into<TimeInput>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_retention_policy(mut self, retention_policy: impl Into<String>) -> Self {
        self.retention_policy = Some(retention_policy.into());
        self
    }

    /// Check thresholds without producing alerts.
    pub fn without_alert(mut self) -> Self {
        self.send_alert = false;
        self
    }
}

impl fmt::Debug for MetricWritten {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricWritten")
            .field("metric", &self.metric.name())
            .field("values", &self.values)
            .field("send_alert", &self.send_alert)
            .field("time", &self.time)
            .field("retention_policy", &self.retention_policy)
            .finish()
    }
}

//! Threshold evaluation on metric writes.

use netmon_core::CoreError;

use crate::metric_write::MetricWritten;

/// Dispatch uid [`check_metric_threshold`] is connected under.
pub const CHECK_THRESHOLD_UID: &str = "check_threshold";

/// Evaluate the written value of the event's metric against its threshold.
///
/// A textual time is parsed into a UTC instant first. The value is taken
/// from `values[metric.field_name()]`; if absent, the metric is not
/// consulted and [`CoreError::MissingFieldValue`] is returned. Errors from
/// the metric itself are returned unchanged.
pub fn check_metric_threshold(event: &MetricWritten) -> Result<(), CoreError> {
    let time = event.time.clone().map(|t| t.into_instant()).transpose()?;

    let metric = &event.metric;
    let field = metric.field_name();
    let value = *event
        .values
        .get(field)
        .ok_or_else(|| CoreError::MissingFieldValue {
            metric: metric.name().to_string(),
            field: field.to_string(),
        })?;

    tracing::trace!(metric = metric.name(), field, value, "Checking metric threshold");

    metric.check_threshold(
        value,
        time,
        event.retention_policy.as_deref(),
        event.send_alert,
    )
}

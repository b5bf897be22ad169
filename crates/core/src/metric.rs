use crate::error::CoreError;
use crate::types::Timestamp;

/// A tracked quantity able to evaluate new samples against its alert bounds.
///
/// Implemented by the persistence layer; this workspace only consumes
/// metrics by reference when a write event is dispatched.
pub trait Metric: Send + Sync {
    /// Human-readable identifier, used in logs and error messages.
    fn name(&self) -> &str;

    /// Key of the value this metric checks in a write payload.
    fn field_name(&self) -> &str;

    /// Evaluate `value` against the configured threshold.
    ///
    /// `send_alert` controls whether a breach produces an alert; the
    /// alerting side effects are the implementor's responsibility.
    fn check_threshold(
        &self,
        value: f64,
        time: Option<Timestamp>,
        retention_policy: Option<&str>,
        send_alert: bool,
    ) -> Result<(), CoreError>;
}

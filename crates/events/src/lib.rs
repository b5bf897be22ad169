//! Write-event dispatch for netmon.
//!
//! - [`Signal`] — typed, ordered, synchronous observer registry; one
//!   instance per event kind.
//! - [`MetricWritten`] — emitted after samples of a metric are stored.
//! - [`check_metric_threshold`] — the receiver that evaluates new samples
//!   against the metric's alert bounds.

pub mod metric_write;
pub mod signal;
pub mod threshold;

pub use metric_write::{MetricWritten, POST_METRIC_WRITE};
pub use signal::{DispatchError, Signal};
pub use threshold::{check_metric_threshold, CHECK_THRESHOLD_UID};

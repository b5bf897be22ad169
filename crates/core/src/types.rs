use std::collections::BTreeMap;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Field name to measured value, as carried by a metric write.
pub type MetricValues = BTreeMap<String, f64>;

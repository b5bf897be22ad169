//! Timestamp normalization for metric write events.
//!
//! Write events may carry their sample time either as an already-parsed
//! [`Timestamp`] or as text in the fixed wire pattern [`TIMESTAMP_FORMAT`].
//! Callers normalize with [`TimeInput::into_instant`] before the value
//! reaches any threshold logic.

use chrono::NaiveDateTime;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Wire pattern for textual timestamps, always UTC.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Fractional seconds carry 1 to 6 digits (up to microsecond precision).
const MAX_FRACTION_DIGITS: usize = 6;

/// Sample time attached to a metric write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeInput {
    RawText(String),
    Instant(Timestamp),
}

impl TimeInput {
    /// Resolve to a UTC instant, parsing raw text if necessary.
    pub fn into_instant(self) -> Result<Timestamp, CoreError> {
        match self {
            TimeInput::Instant(ts) => Ok(ts),
            TimeInput::RawText(raw) => parse_timestamp(&raw),
        }
    }
}

impl From<Timestamp> for TimeInput {
    fn from(ts: Timestamp) -> Self {
        TimeInput::Instant(ts)
    }
}

impl From<String> for TimeInput {
    fn from(raw: String) -> Self {
        TimeInput::RawText(raw)
    }
}

impl From<&str> for TimeInput {
    fn from(raw: &str) -> Self {
        TimeInput::RawText(raw.to_string())
    }
}

/// Parse a `YYYY-MM-DDTHH:MM:SS.ffffffZ` string as a UTC timestamp.
///
/// The fraction is required and may be shortened: `.5` is half a second.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, CoreError> {
    let fraction = raw
        .strip_suffix('Z')
        .and_then(|rest| rest.rsplit_once('.'))
        .map(|(_, fraction)| fraction);
    let valid_fraction = fraction.is_some_and(|f| {
        (1..=MAX_FRACTION_DIGITS).contains(&f.len()) && f.bytes().all(|b| b.is_ascii_digit())
    });
    if !valid_fraction {
        return Err(CoreError::TimestampParse {
            value: raw.to_string(),
            reason: format!("expected 1 to {MAX_FRACTION_DIGITS} fractional second digits"),
        });
    }

    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| CoreError::TimestampParse {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

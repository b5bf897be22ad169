#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Missing value for field '{field}' of metric '{metric}'")]
    MissingFieldValue { metric: String, field: String },

    #[error("Invalid timestamp '{value}': {reason}")]
    TimestampParse { value: String, reason: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

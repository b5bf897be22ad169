#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The store could not be reached. This is the only retryable class.
    #[error("Timeseries database unavailable: {0}")]
    Unavailable(String),

    #[error("Timeseries database rejected the request: {0}")]
    Query(String),

    #[error("Invalid timeseries configuration: {0}")]
    Config(String),
}

impl DbError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DbError::Unavailable(_))
    }
}

/// Whether an error chain bottoms out in a dropped or refused transport
/// connection rather than an answer from the store.
fn is_connection_failure(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                std::io::ErrorKind::ConnectionRefused
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::NotConnected
                    | std::io::ErrorKind::BrokenPipe
                    | std::io::ErrorKind::UnexpectedEof
                    | std::io::ErrorKind::TimedOut
            ) {
                return true;
            }
        }
        if let Some(http) = e.downcast_ref::<hyper::Error>() {
            if http.is_closed() || http.is_incomplete_message() || http.is_canceled() {
                return true;
            }
        }
        current = e.source();
    }
    false
}

impl From<reqwest::Error> for DbError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || is_connection_failure(&err) {
            DbError::Unavailable(err.to_string())
        } else {
            DbError::Query(err.to_string())
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolTimedOut => {
                DbError::Unavailable(err.to_string())
            }
            sqlx::Error::Configuration(_) => DbError::Config(err.to_string()),
            _ => DbError::Query(err.to_string()),
        }
    }
}

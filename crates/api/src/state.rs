use std::sync::Arc;

use crate::bootstrap::Monitoring;

/// Shared application state passed to route handlers.
#[derive(Clone)]
pub struct AppState {
    pub monitoring: Arc<Monitoring>,
}

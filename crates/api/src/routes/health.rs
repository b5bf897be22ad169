use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::bootstrap::AdminSettings;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    database: String,
    metrics: usize,
    notification_types: usize,
    receivers: usize,
    settings: AdminSettings,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let monitoring = &state.monitoring;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: monitoring.database.clone(),
        metrics: monitoring.metrics.len(),
        notification_types: monitoring.notifications.len(),
        receivers: monitoring.post_metric_write.receiver_count(),
        settings: monitoring.settings,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

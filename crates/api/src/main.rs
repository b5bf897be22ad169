use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netmon_api::bootstrap::Monitoring;
use netmon_api::config::MonitoringConfig;
use netmon_api::router::build_app_router;
use netmon_api::state::AppState;
use netmon_db::RetryPolicy;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "netmon_api=debug,netmon_db=debug,netmon_events=debug,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // --- Configuration ---
    let config = MonitoringConfig::from_env()?;
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        timeseries_url = %config.timeseries.url,
        "Loaded configuration"
    );

    // --- Startup ---
    let backend = netmon_db::connect_backend(&config.timeseries)?;
    let monitoring = Monitoring::ready(
        backend.as_ref(),
        &RetryPolicy::default(),
        config.metrics_config.as_deref(),
    )
    .await?;
    tracing::info!(database = %monitoring.database, "Monitoring initialized");

    let app = build_app_router(AppState {
        monitoring: Arc::new(monitoring),
    });

    let host: IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

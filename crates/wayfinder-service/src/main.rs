//! Wayfinder HTTP service binary.
//!
//! # Configuration
//!
//! - `WAYFINDER_DB_PATH` - graph database file (default: platform data directory)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `LOG_FORMAT` - `json` (default) or `text`
//! - `RUST_LOG` - log filter (default: info)
//! - `METRICS_ENABLED` - set to `false` to skip the Prometheus recorder
//! - `METRICS_PATH` - scrape endpoint (default: `/metrics`)

use std::env;
use std::net::SocketAddr;

use tracing::{error, info, warn};

use wayfinder_lib::resolve_database_path;
use wayfinder_service::app_with_metrics_path;
use wayfinder_service_shared::{init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig};

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("wayfinder");
    let _service_span = init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        warn!(error = %e, "continuing without metrics");
    }

    let db_path = resolve_database_path(None)?;
    let port = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    info!(db_path = %db_path.display(), port, "starting wayfinder service");

    let state = AppState::load(&db_path).inspect_err(|e| {
        error!(error = %e, "failed to open graph store");
    })?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");

    axum::serve(listener, app_with_metrics_path(state, &metrics_config.path))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

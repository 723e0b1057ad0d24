//! Prometheus metrics for the wayfinder service.
//!
//! The recorder is installed once per process by [`init_metrics`]; the
//! `record_*` helpers are no-ops until then, so handlers can call them
//! unconditionally.
//!
//! # Example
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use wayfinder_service_shared::metrics::{init_metrics, metrics_handler, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::from_env()).expect("metrics recorder");
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

pub const ROUTES_CALCULATED: &str = "wayfinder_routes_calculated_total";
pub const ROUTES_FAILED: &str = "wayfinder_routes_failed_total";
pub const GRAPH_MUTATIONS: &str = "wayfinder_graph_mutations_total";
pub const ROUTE_COST: &str = "wayfinder_route_cost";
pub const HTTP_REQUESTS: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION: &str = "http_request_duration_seconds";

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route the exposition endpoint is mounted on.
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// `METRICS_ENABLED` (anything but `false`/`0` enables) and `METRICS_PATH`.
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|value| {
                !matches!(value.trim().to_ascii_lowercase().as_str(), "false" | "0")
            })
            .unwrap_or(true);
        let path = std::env::var("METRICS_PATH")
            .ok()
            .filter(|path| path.starts_with('/'))
            .unwrap_or_else(|| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Install the Prometheus recorder.
///
/// # Errors
///
/// [`MetricsError::Disabled`] when switched off, [`MetricsError::AlreadyInitialized`]
/// on a second call, [`MetricsError::InstallFailed`] when another recorder is
/// already registered globally.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Axum handler rendering the Prometheus exposition text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

/// Count a successful route; `mode` is `single-floor` or `multi-floor`.
pub fn record_route_calculated(mode: &'static str) {
    metrics::counter!(ROUTES_CALCULATED, "mode" => mode).increment(1);
}

/// Count a failed route by reason label (see `problem::failure_reason`).
pub fn record_route_failed(reason: &'static str) {
    metrics::counter!(ROUTES_FAILED, "reason" => reason).increment(1);
}

/// Count a graph authoring call, e.g. `create_node` or `auto_connect_spanning`.
pub fn record_graph_mutation(operation: &'static str) {
    metrics::counter!(GRAPH_MUTATIONS, "operation" => operation).increment(1);
}

pub fn record_route_cost(cost: f64, mode: &'static str) {
    metrics::histogram!(ROUTE_COST, "mode" => mode).record(cost);
}

/// Record one finished HTTP request. `path` must be the matched route
/// template, never the raw URI, to keep label cardinality bounded.
pub fn record_http_request(method: &str, path: &str, status: u16, seconds: f64) {
    metrics::counter!(
        HTTP_REQUESTS,
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_bucket(status)
    )
    .increment(1);
    metrics::histogram!(
        HTTP_REQUEST_DURATION,
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(seconds);
}

fn status_bucket(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

//! Liveness and readiness checks.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// `ok`, or `not_ready: <reason>`.
    pub status: String,
    pub service: String,
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub floors: Option<usize>,

    /// When the graph store was opened (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_opened_at: Option<String>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            floors: None,
            store_opened_at: None,
        }
    }

    pub fn ready(service: &str, version: &str, floors: usize, opened_at: String) -> Self {
        Self {
            floors: Some(floors),
            store_opened_at: Some(opened_at),
            ..Self::alive(service, version)
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            ..Self::alive(service, version)
        }
    }
}

/// `GET /health/live`: the process is up.
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// `GET /health/ready`: the graph store answers queries.
///
/// An empty store is still ready; floors are authored through the API.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"wayfinder-service-shared","version":"0.1.0","floors":3,"storeOpenedAt":"2026-03-02T10:00:00+00:00"}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let floors = state.store().floor_count();
    match floors {
        Ok(floors) => {
            let opened_at = state.opened_at().to_rfc3339();
            let status = HealthStatus::ready(service, version, floors, opened_at);
            (StatusCode::OK, Json(status)).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            let status = HealthStatus::not_ready(service, version, "graph store unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("wayfinder", "1.0.0");
        assert_eq!(status.status, "ok");
        assert!(status.floors.is_none());
    }

    #[test]
    fn test_health_status_ready() {
        let status =
            HealthStatus::ready("wayfinder", "1.0.0", 4, "2026-01-01T00:00:00+00:00".into());
        assert_eq!(status.floors, Some(4));
        assert_eq!(status.status, "ok");
    }

    #[test]
    fn test_health_status_not_ready() {
        let status = HealthStatus::not_ready("wayfinder", "1.0.0", "no store");
        assert_eq!(status.status, "not_ready: no store");
    }

    #[test]
    fn test_health_status_serialization() {
        let json = serde_json::to_string(&HealthStatus::alive("wayfinder", "0.1.0")).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(!json.contains("floors"));
        assert!(!json.contains("storeOpenedAt"));
    }

    #[tokio::test]
    async fn test_ready_reports_floor_count() {
        let state = crate::test_utils::campus_state();
        let response = health_ready(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

//! Wayfinder indoor routing HTTP service.
//!
//! # Endpoints
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET, POST | `/api/v1/floors` | list / create floors |
//! | DELETE | `/api/v1/floors/{floorId}` | delete a floor and everything on it |
//! | GET, DELETE | `/api/v1/floors/{floorId}/graph` | floor graph snapshot / clear it |
//! | GET, PUT | `/api/v1/floors/{floorId}/rooms` | list / place room anchors |
//! | POST | `/api/v1/floors/{floorId}/auto-connect/{nearest,spanning}` | generate edges |
//! | GET | `/api/v1/rooms/{roomCode}` | locate a room |
//! | POST | `/api/v1/route` | single-floor route |
//! | POST | `/api/v1/route/multi` | route across floors |
//! | POST, DELETE | `/api/v1/nodes`, `/api/v1/nodes/{id}` | graph nodes |
//! | POST, DELETE | `/api/v1/edges`, `/api/v1/edges/{id}` | graph edges |
//! | GET | `/metrics` (`METRICS_PATH`), `/health/live`, `/health/ready` | operations |
//!
//! Errors are RFC 9457 problem documents (`application/problem+json`).

#![deny(warnings)]

mod floors;
mod graph;
mod routes;
mod support;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use wayfinder_service_shared::{
    health_live, health_ready, metrics_handler, trace_layer, track_requests, AppState,
};

/// Build the service router over `state`, exposing metrics on `/metrics`.
pub fn app(state: AppState) -> Router {
    app_with_metrics_path(state, "/metrics")
}

/// Build the service router with the Prometheus endpoint mounted at `metrics_path`.
pub fn app_with_metrics_path(state: AppState, metrics_path: &str) -> Router {
    let api = Router::new()
        .route("/floors", get(floors::list).post(floors::create))
        .route("/floors/{floor_id}", delete(floors::remove))
        .route(
            "/floors/{floor_id}/graph",
            get(graph::floor_graph).delete(graph::clear),
        )
        .route(
            "/floors/{floor_id}/rooms",
            get(floors::rooms).put(floors::upsert_room),
        )
        .route(
            "/floors/{floor_id}/auto-connect/nearest",
            post(graph::auto_connect_nearest),
        )
        .route(
            "/floors/{floor_id}/auto-connect/spanning",
            post(graph::auto_connect_spanning),
        )
        .route("/rooms/{room_code}", get(floors::room))
        .route("/route", post(routes::single_floor))
        .route("/route/multi", post(routes::multi_floor))
        .route("/nodes", post(graph::create_node))
        .route("/nodes/{node_id}", delete(graph::delete_node))
        .route("/edges", post(graph::create_edge))
        .route("/edges/{edge_id}", delete(graph::delete_edge));

    Router::new()
        .nest("/api/v1", api)
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(trace_layer())
        .layer(middleware::from_fn(track_requests))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

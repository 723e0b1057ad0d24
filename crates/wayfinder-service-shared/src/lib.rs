//! HTTP glue for the Wayfinder routing service.
//!
//! - [`AppState`]: the graph store behind a mutex, shared by all handlers
//! - [`ProblemDetails`]: RFC 9457 error bodies mapped from library errors
//! - [`ServiceResponse`]: JSON success bodies with an explicit status
//! - [`health`](health_live): liveness and readiness checks
//! - [`metrics`]: Prometheus recorder and business counters
//! - [`logging`]: tracing subscriber setup
//! - [`middleware`]: request ids and HTTP metrics
//! - request bodies implementing [`Validate`]
//!
//! Handlers stay thin: parse, validate, call `wayfinder-lib`, format.
//!
//! Enable the `test-utils` feature for the [`test_utils`] fixtures.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_graph_mutation, record_route_calculated,
    record_route_cost, record_route_failed, MetricsConfig, MetricsError,
};
pub use middleware::{
    extract_or_generate_request_id, trace_layer, track_requests, RequestId, REQUEST_ID_HEADER,
};
pub use problem::{
    failure_reason, from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_REQUEST, PROBLEM_NOT_FOUND, PROBLEM_ROOM_NOT_FOUND, PROBLEM_ROUTE_INFEASIBLE,
};
pub use request::{
    CreateEdgeRequest, CreateNodeRequest, EdgeEndpoints, MultiRouteRequest, RouteQuery,
    RouteRequest, Validate,
};
pub use response::{Deleted, ServiceResponse};
pub use state::{AppState, AppStateError, StoreReader};

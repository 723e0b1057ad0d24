//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use wayfinder_lib::{Error as LibError, ErrorCategory};

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for unknown floors, nodes, or edges.
pub const PROBLEM_NOT_FOUND: &str = "/problems/not-found";

/// Problem type URI for room codes without a location.
pub const PROBLEM_ROOM_NOT_FOUND: &str = "/problems/room-not-found";

/// Problem type URI for requests that reference existing data but have no walkable route.
pub const PROBLEM_ROUTE_INFEASIBLE: &str = "/problems/route-infeasible";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use wayfinder_service_shared::{ProblemDetails, PROBLEM_ROOM_NOT_FOUND};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_ROOM_NOT_FOUND,
///     "Room Not Found",
///     StatusCode::NOT_FOUND,
/// )
/// .with_detail("room location not found: B1-11. Did you mean 'B1-10'?")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request id of the failing call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Close room codes when a room lookup failed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// 400 for malformed or missing input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 404 for an unknown floor, node, or edge.
    pub fn not_found(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(PROBLEM_NOT_FOUND, "Not Found", StatusCode::NOT_FOUND)
            .with_detail(detail)
            .with_request_id(request_id)
    }

    /// 404 for a room code with no location, carrying close matches.
    pub fn room_not_found(
        code: &str,
        suggestions: &[String],
        request_id: impl Into<String>,
    ) -> Self {
        let detail = if suggestions.is_empty() {
            format!("Room '{}' has no location", code)
        } else {
            format!(
                "Room '{}' has no location. Did you mean: {}?",
                code,
                suggestions.join(", ")
            )
        };

        Self::new(
            PROBLEM_ROOM_NOT_FOUND,
            "Room Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(detail)
        .with_request_id(request_id)
        .with_suggestions(suggestions.to_vec())
    }

    /// 422 when every referenced entity exists but no route satisfies the request.
    pub fn route_infeasible(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_ROUTE_INFEASIBLE,
            "Route Infeasible",
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// The status follows the error's [`ErrorCategory`]; storage failures are not
/// echoed to the client verbatim.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    if let LibError::RoomLocationNotFound { code, suggestions } = error {
        return ProblemDetails::room_not_found(code, suggestions, request_id);
    }

    match error.category() {
        ErrorCategory::Validation => ProblemDetails::bad_request(error.to_string(), request_id),
        ErrorCategory::NotFound => ProblemDetails::not_found(error.to_string(), request_id),
        ErrorCategory::Infeasible => {
            ProblemDetails::route_infeasible(error.to_string(), request_id)
        }
        ErrorCategory::Internal => {
            tracing::error!(request_id, error = %error, "internal error while handling request");
            ProblemDetails::internal_error(
                "The graph store could not complete the request",
                request_id,
            )
        }
    }
}

/// Short metric label for a failed routing call.
pub fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::InvalidInput { .. } => "validation_error",
        LibError::UnknownFloor { .. } => "unknown_floor",
        LibError::RoomLocationNotFound { .. } => "room_not_found",
        LibError::NoGraphNodes { .. } => "no_graph_nodes",
        LibError::NoConnectors => "no_connectors",
        LibError::NoMatchingConnectors => "no_matching_connectors",
        LibError::NoRoute | LibError::NoRouteViaConnectors => "no_path",
        _ => match error.category() {
            ErrorCategory::Internal => "internal",
            _ => "other",
        },
    }
}

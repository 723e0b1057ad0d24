//! Success responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// JSON body plus the status it is sent with.
///
/// The payload is serialised as-is (no envelope) so response bodies keep the
/// camelCase field names of the routing types.
///
/// # Example
///
/// ```
/// use wayfinder_service_shared::ServiceResponse;
/// use axum::http::StatusCode;
///
/// let response = ServiceResponse::created(serde_json::json!({ "id": 7 }));
/// assert_eq!(response.status, StatusCode::CREATED);
/// ```
#[derive(Debug, Clone)]
pub struct ServiceResponse<T> {
    pub status: StatusCode,
    pub data: T,
}

impl<T> ServiceResponse<T> {
    /// 200 OK.
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    /// 201 Created.
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::ok(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.data)).into_response()
    }
}

/// Body of `DELETE` calls that report how much was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges_removed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_removed: Option<usize>,
}

impl Deleted {
    pub fn row() -> Self {
        Self {
            deleted: true,
            edges_removed: None,
            nodes_removed: None,
        }
    }

    pub fn with_edges(mut self, edges: usize) -> Self {
        self.edges_removed = Some(edges);
        self
    }

    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.nodes_removed = Some(nodes);
        self
    }
}

//! Floor graph reads and authoring handlers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::info;
use wayfinder_lib::{ClearedGraph, Edge, EdgeId, FloorGraph, FloorId, GraphStore, Node, NodeId};
use wayfinder_service_shared::{
    record_graph_mutation, AppState, CreateEdgeRequest, CreateNodeRequest, Deleted, RequestId,
    ServiceResponse,
};

use crate::support::{path, problem, validated, ApiResult};

/// Edges generated by an auto-connect run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AutoConnectResponse {
    pub created: usize,
    pub edges: Vec<Edge>,
}

/// `GET /api/v1/floors/{floorId}/graph`
pub(crate) async fn floor_graph(
    State(state): State<AppState>,
    request_id: RequestId,
    floor_id: Result<Path<FloorId>, PathRejection>,
) -> ApiResult<FloorGraph> {
    let floor_id = path(floor_id, &request_id)?;
    let graph = {
        let store = state.store();
        store
            .floor(floor_id)
            .and_then(|_| store.floor_graph(floor_id))
    };
    graph
        .map(ServiceResponse::ok)
        .map_err(|err| problem(&err, &request_id))
}

/// `DELETE /api/v1/floors/{floorId}/graph`
pub(crate) async fn clear(
    State(state): State<AppState>,
    request_id: RequestId,
    floor_id: Result<Path<FloorId>, PathRejection>,
) -> ApiResult<ClearedGraph> {
    let floor_id = path(floor_id, &request_id)?;
    let cleared = state
        .store()
        .clear_floor_graph(floor_id)
        .map_err(|err| problem(&err, &request_id))?;

    record_graph_mutation("clear_floor_graph");
    info!(
        request_id = %request_id,
        floor = floor_id,
        edges = cleared.edges,
        nodes = cleared.nodes,
        "cleared floor graph"
    );
    Ok(ServiceResponse::ok(cleared))
}

/// `POST /api/v1/nodes`
pub(crate) async fn create_node(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<CreateNodeRequest>, JsonRejection>,
) -> ApiResult<Node> {
    let (floor_id, node) = validated(payload, &request_id)?;
    let node = state
        .store()
        .add_node(floor_id, &node)
        .map_err(|err| problem(&err, &request_id))?;

    record_graph_mutation("create_node");
    info!(request_id = %request_id, node = node.id, floor = floor_id, "created node");
    Ok(ServiceResponse::created(node))
}

/// `DELETE /api/v1/nodes/{id}`; reports how many edges went with it.
pub(crate) async fn delete_node(
    State(state): State<AppState>,
    request_id: RequestId,
    node_id: Result<Path<NodeId>, PathRejection>,
) -> ApiResult<Deleted> {
    let node_id = path(node_id, &request_id)?;
    let edges = state
        .store()
        .delete_node(node_id)
        .map_err(|err| problem(&err, &request_id))?;

    record_graph_mutation("delete_node");
    info!(request_id = %request_id, node = node_id, edges, "deleted node");
    Ok(ServiceResponse::ok(Deleted::row().with_edges(edges)))
}

/// `POST /api/v1/edges`
pub(crate) async fn create_edge(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<CreateEdgeRequest>, JsonRejection>,
) -> ApiResult<Edge> {
    let endpoints = validated(payload, &request_id)?;
    let edge = state
        .store()
        .add_edge(endpoints.floor_id, endpoints.from, endpoints.to)
        .map_err(|err| problem(&err, &request_id))?;

    record_graph_mutation("create_edge");
    info!(request_id = %request_id, edge = edge.id, cost = edge.cost, "created edge");
    Ok(ServiceResponse::created(edge))
}

/// `DELETE /api/v1/edges/{id}`
pub(crate) async fn delete_edge(
    State(state): State<AppState>,
    request_id: RequestId,
    edge_id: Result<Path<EdgeId>, PathRejection>,
) -> ApiResult<Deleted> {
    let edge_id = path(edge_id, &request_id)?;
    state
        .store()
        .delete_edge(edge_id)
        .map_err(|err| problem(&err, &request_id))?;

    record_graph_mutation("delete_edge");
    Ok(ServiceResponse::ok(Deleted::row()))
}

/// `POST /api/v1/floors/{floorId}/auto-connect/nearest`
pub(crate) async fn auto_connect_nearest(
    state: State<AppState>,
    request_id: RequestId,
    floor_id: Result<Path<FloorId>, PathRejection>,
) -> ApiResult<AutoConnectResponse> {
    auto_connect(
        state,
        request_id,
        floor_id,
        "auto_connect_nearest",
        GraphStore::auto_connect_nearest,
    )
}

/// `POST /api/v1/floors/{floorId}/auto-connect/spanning`
pub(crate) async fn auto_connect_spanning(
    state: State<AppState>,
    request_id: RequestId,
    floor_id: Result<Path<FloorId>, PathRejection>,
) -> ApiResult<AutoConnectResponse> {
    auto_connect(
        state,
        request_id,
        floor_id,
        "auto_connect_spanning",
        GraphStore::auto_connect_spanning,
    )
}

fn auto_connect(
    State(state): State<AppState>,
    request_id: RequestId,
    floor_id: Result<Path<FloorId>, PathRejection>,
    operation: &'static str,
    run: fn(&mut GraphStore, FloorId) -> wayfinder_lib::Result<Vec<Edge>>,
) -> ApiResult<AutoConnectResponse> {
    let floor_id = path(floor_id, &request_id)?;
    let edges = run(&mut state.store(), floor_id).map_err(|err| problem(&err, &request_id))?;

    record_graph_mutation(operation);
    info!(
        request_id = %request_id,
        floor = floor_id,
        operation,
        created = edges.len(),
        "auto-connect finished"
    );
    Ok(ServiceResponse::ok(AutoConnectResponse {
        created: edges.len(),
        edges,
    }))
}

//! Floor and room location handlers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use tracing::info;
use wayfinder_lib::{Floor, FloorId, NewFloor, NewRoomLocation, RoomLocation};
use wayfinder_service_shared::{
    record_graph_mutation, AppState, Deleted, RequestId, ServiceResponse,
};

use crate::support::{body, path, problem, ApiResult};

/// `GET /api/v1/floors`
pub(crate) async fn list(
    State(state): State<AppState>,
    request_id: RequestId,
) -> ApiResult<Vec<Floor>> {
    let floors = state.store().list_floors();
    floors
        .map(ServiceResponse::ok)
        .map_err(|err| problem(&err, &request_id))
}

/// `POST /api/v1/floors`
pub(crate) async fn create(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<NewFloor>, JsonRejection>,
) -> ApiResult<Floor> {
    let floor = body(payload, &request_id)?;
    let floor = state
        .store()
        .create_floor(&floor)
        .map_err(|err| problem(&err, &request_id))?;

    record_graph_mutation("create_floor");
    info!(request_id = %request_id, floor = floor.id, key = %floor.key, "created floor");
    Ok(ServiceResponse::created(floor))
}

/// `DELETE /api/v1/floors/{floorId}`
pub(crate) async fn remove(
    State(state): State<AppState>,
    request_id: RequestId,
    floor_id: Result<Path<FloorId>, PathRejection>,
) -> ApiResult<Deleted> {
    let floor_id = path(floor_id, &request_id)?;
    state
        .store()
        .delete_floor(floor_id)
        .map_err(|err| problem(&err, &request_id))?;

    record_graph_mutation("delete_floor");
    info!(request_id = %request_id, floor = floor_id, "deleted floor");
    Ok(ServiceResponse::ok(Deleted::row()))
}

/// `GET /api/v1/floors/{floorId}/rooms`
pub(crate) async fn rooms(
    State(state): State<AppState>,
    request_id: RequestId,
    floor_id: Result<Path<FloorId>, PathRejection>,
) -> ApiResult<Vec<RoomLocation>> {
    let floor_id = path(floor_id, &request_id)?;
    let rooms = {
        let store = state.store();
        store
            .floor(floor_id)
            .and_then(|_| store.room_locations(floor_id))
    };
    rooms
        .map(ServiceResponse::ok)
        .map_err(|err| problem(&err, &request_id))
}

/// `PUT /api/v1/floors/{floorId}/rooms`: place a room or move it.
pub(crate) async fn upsert_room(
    State(state): State<AppState>,
    request_id: RequestId,
    floor_id: Result<Path<FloorId>, PathRejection>,
    payload: Result<Json<NewRoomLocation>, JsonRejection>,
) -> ApiResult<RoomLocation> {
    let floor_id = path(floor_id, &request_id)?;
    let room = body(payload, &request_id)?;
    let room = state
        .store()
        .upsert_room_location(floor_id, &room)
        .map_err(|err| problem(&err, &request_id))?;

    record_graph_mutation("upsert_room_location");
    Ok(ServiceResponse::ok(room))
}

/// `GET /api/v1/rooms/{roomCode}`
pub(crate) async fn room(
    State(state): State<AppState>,
    request_id: RequestId,
    room_code: Result<Path<String>, PathRejection>,
) -> ApiResult<RoomLocation> {
    let room_code = path(room_code, &request_id)?;
    let room = state.store().room_location(&room_code);
    room.map(ServiceResponse::ok)
        .map_err(|err| problem(&err, &request_id))
}

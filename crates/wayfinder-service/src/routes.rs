//! Route computation handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;
use wayfinder_lib::{route_multi_floor, route_single_floor, MultiFloorRoute, SingleFloorRoute};
use wayfinder_service_shared::{
    failure_reason, record_route_calculated, record_route_cost, record_route_failed, AppState,
    MultiRouteRequest, RequestId, RouteRequest, ServiceResponse,
};

use crate::support::{problem, validated, ApiResult};

/// `POST /api/v1/route`
pub(crate) async fn single_floor(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> ApiResult<SingleFloorRoute> {
    let query = validated(payload, &request_id).inspect_err(|_| {
        record_route_failed("validation_error");
    })?;

    info!(
        request_id = %request_id,
        floor = query.floor_id,
        room = %query.room_code,
        "handling single-floor route request"
    );

    let store = state.reader();
    let result = route_single_floor(&store, query.floor_id, query.from, &query.room_code);
    drop(store);
    match result {
        Ok(route) => {
            record_route_calculated("single-floor");
            record_route_cost(route.cost, "single-floor");
            info!(
                request_id = %request_id,
                cost = route.cost,
                points = route.points.len(),
                "route computed"
            );
            Ok(ServiceResponse::ok(route))
        }
        Err(err) => {
            record_route_failed(failure_reason(&err));
            Err(problem(&err, &request_id))
        }
    }
}

/// `POST /api/v1/route/multi`
pub(crate) async fn multi_floor(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<MultiRouteRequest>, JsonRejection>,
) -> ApiResult<MultiFloorRoute> {
    let request = validated(payload, &request_id).inspect_err(|_| {
        record_route_failed("validation_error");
    })?;

    info!(
        request_id = %request_id,
        from_floor = request.from_floor_id,
        room = %request.room_code,
        prefer = ?request.prefer,
        "handling multi-floor route request"
    );

    let result = route_multi_floor(&state.reader(), &request);
    match result {
        Ok(route) => {
            let mode = route.mode.as_str();
            record_route_calculated(mode);
            record_route_cost(route.total_cost, mode);
            info!(
                request_id = %request_id,
                mode,
                total_cost = route.total_cost,
                segments = route.segments.len(),
                "route computed"
            );
            Ok(ServiceResponse::ok(route))
        }
        Err(err) => {
            record_route_failed(failure_reason(&err));
            Err(problem(&err, &request_id))
        }
    }
}

//! Route planning between a free-form start point and a named room.
//!
//! This module provides:
//! - [`route_single_floor`] - Route to a room on the same floor as the start point
//! - [`route_multi_floor`] - Route to a room on any floor, via stairs/elevators
//! - [`SingleFloorRoute`] / [`MultiFloorRoute`] - Serializable route results
//!
//! Routing only reads from the [`GraphStore`]: each call takes one snapshot
//! per floor involved and computes the route in memory.
//!
//! # Example
//!
//! ```ignore
//! use wayfinder_lib::{route_multi_floor, GraphStore, MultiFloorRequest, Point};
//!
//! let store = GraphStore::open("campus.db".as_ref())?;
//! let request = MultiFloorRequest::new(1, Point::new(12.0, 40.0), "B1-204");
//! let route = route_multi_floor(&store, &request)?;
//! println!("{} segment(s), cost {:.1}", route.segments.len(), route.total_cost);
//! ```

mod planner;

pub use planner::{plan_multi_floor, plan_single_floor, FloorContext};

use serde::Serialize;
use tracing::warn;

use crate::connectors::{ConnectorKind, RoutePreference};
use crate::error::Result;
use crate::geometry::Point;
use crate::model::{FloorId, RoomLocation};
use crate::store::{require_finite, GraphStore};

/// Destination room as echoed back in route results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTarget {
    pub room_code: String,
    pub x: f64,
    pub y: f64,
}

impl From<&RoomLocation> for RoomTarget {
    fn from(room: &RoomLocation) -> Self {
        Self {
            room_code: room.room_code.clone(),
            x: room.x,
            y: room.y,
        }
    }
}

/// Route that stays on one floor.
///
/// `points` starts at the literal query point and ends at the literal room
/// anchor; the snapped graph nodes sit in between.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleFloorRoute {
    pub from: Point,
    pub to: RoomTarget,
    pub points: Vec<Point>,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteMode {
    SingleFloor,
    MultiFloor,
}

impl RouteMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteMode::SingleFloor => "single-floor",
            RouteMode::MultiFloor => "multi-floor",
        }
    }
}

/// One floor's portion of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    pub floor_id: FloorId,
    pub instruction: String,
    pub points: Vec<Point>,
}

/// Connector chosen to change floors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorSummary {
    #[serde(rename = "type")]
    pub kind: ConnectorKind,
    pub label: String,
    pub vertical_cost: f64,
}

/// Route that may span two floors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiFloorRoute {
    pub mode: RouteMode,
    pub total_cost: f64,
    pub segments: Vec<RouteSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector: Option<ConnectorSummary>,
}

impl MultiFloorRoute {
    fn from_single_floor(floor_id: FloorId, route: SingleFloorRoute) -> Self {
        Self {
            mode: RouteMode::SingleFloor,
            total_cost: route.cost,
            segments: vec![RouteSegment {
                floor_id,
                instruction: format!("Walk to room {}.", route.to.room_code),
                points: route.points,
            }],
            connector: None,
        }
    }
}

/// High-level multi-floor routing request.
#[derive(Debug, Clone)]
pub struct MultiFloorRequest {
    pub from_floor_id: FloorId,
    pub from: Point,
    pub room_code: String,
    pub prefer: RoutePreference,
}

impl MultiFloorRequest {
    /// Convenience constructor without a connector preference.
    pub fn new(from_floor_id: FloorId, from: Point, room_code: impl Into<String>) -> Self {
        Self {
            from_floor_id,
            from,
            room_code: room_code.into(),
            prefer: RoutePreference::None,
        }
    }

    pub fn with_preference(mut self, prefer: RoutePreference) -> Self {
        self.prefer = prefer;
        self
    }
}

fn validate_point(point: &Point) -> Result<()> {
    require_finite("fromX", point.x)?;
    require_finite("fromY", point.y)
}

/// Route to a room located on `floor_id` from a point on the same floor.
pub fn route_single_floor(
    store: &GraphStore,
    floor_id: FloorId,
    from: Point,
    room_code: &str,
) -> Result<SingleFloorRoute> {
    single_floor(store, floor_id, from, room_code).inspect_err(|err| {
        warn!(floor = floor_id, room = %room_code, error = %err, "single-floor routing failed");
    })
}

fn single_floor(
    store: &GraphStore,
    floor_id: FloorId,
    from: Point,
    room_code: &str,
) -> Result<SingleFloorRoute> {
    validate_point(&from)?;
    let room = store.room_location_on_floor(floor_id, room_code)?;
    let floor = store.floor(floor_id)?;
    let label = floor.display_name();
    let snapshot = store.floor_graph(floor_id)?;

    plan_single_floor(
        FloorContext {
            floor_id,
            label: &label,
            graph: &snapshot,
        },
        from,
        &room,
    )
}

/// Route from a point on `request.from_floor_id` to a room on any floor.
///
/// Falls back to a single segment when the room is on the start floor;
/// otherwise chains two single-floor searches through the cheapest matching
/// stairs/elevator pair.
pub fn route_multi_floor(
    store: &GraphStore,
    request: &MultiFloorRequest,
) -> Result<MultiFloorRoute> {
    multi_floor(store, request).inspect_err(|err| {
        warn!(
            from_floor = request.from_floor_id,
            room = %request.room_code,
            error = %err,
            "multi-floor routing failed"
        );
    })
}

fn multi_floor(store: &GraphStore, request: &MultiFloorRequest) -> Result<MultiFloorRoute> {
    validate_point(&request.from)?;
    let room = store.room_location_preferring(request.from_floor_id, &request.room_code)?;
    let start_floor = store.floor(request.from_floor_id)?;
    let start_label = start_floor.display_name();
    let start_graph = store.floor_graph(start_floor.id)?;
    let start = FloorContext {
        floor_id: start_floor.id,
        label: &start_label,
        graph: &start_graph,
    };

    if room.floor_id == start_floor.id {
        let route = plan_single_floor(start, request.from, &room)?;
        return Ok(MultiFloorRoute::from_single_floor(start_floor.id, route));
    }

    let destination_floor = store.floor(room.floor_id)?;
    let destination_label = destination_floor.display_name();
    let destination_graph = store.floor_graph(destination_floor.id)?;
    let destination = FloorContext {
        floor_id: destination_floor.id,
        label: &destination_label,
        graph: &destination_graph,
    };

    plan_multi_floor(start, destination, request.from, &room, request.prefer)
}

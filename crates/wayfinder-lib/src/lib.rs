//! Wayfinder library entry points.
//!
//! This crate stores indoor floor graphs in SQLite, snaps free-form
//! coordinates onto them, and plans walking routes to named rooms, including
//! routes that change floors through stairs or elevators. Higher-level
//! consumers (CLI, HTTP service) should only depend on the functions exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod authoring;
pub mod connectors;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod locator;
pub mod model;
pub mod output;
pub mod path;
pub mod routing;
pub mod store;

pub use authoring::{plan_nearest_edges, plan_spanning_edges, ClearedGraph};
pub use connectors::{
    connector_kind, connectors, match_connectors, node_vertical_cost, vertical_cost, Connector,
    ConnectorKey, ConnectorKind, ConnectorPair, RoutePreference, DEFAULT_VERTICAL_COST,
};
pub use dataset::{default_database_path, resolve_database_path, DATABASE_PATH_ENV};
pub use error::{Error, ErrorCategory, Result};
pub use geometry::{distance, distance_squared, Point, Positioned};
pub use graph::Graph;
pub use locator::{nearest_node, nearest_node_or_err};
pub use model::{
    normalize_room_code, Edge, EdgeId, Floor, FloorGraph, FloorId, NewFloor, NewNode,
    NewRoomLocation, Node, NodeId, NodeType, RoomLocation,
};
pub use output::RenderText;
pub use path::{find_path, find_path_in_snapshot, PathResult};
pub use routing::{
    plan_multi_floor, plan_single_floor, route_multi_floor, route_single_floor,
    ConnectorSummary, FloorContext, MultiFloorRequest, MultiFloorRoute, RoomTarget, RouteMode,
    RouteSegment, SingleFloorRoute,
};
pub use store::GraphStore;

//! Store-independent route planning over floor snapshots.
//!
//! These functions contain the whole routing algorithm; [`super`] only loads
//! the snapshots and room anchors they operate on. Keeping them pure lets the
//! tests drive them with hand-built graphs.

use std::collections::HashMap;

use tracing::debug;

use crate::connectors::{
    connectors, match_connectors, vertical_cost, ConnectorPair, RoutePreference,
};
use crate::error::{Error, Result};
use crate::geometry::{Point, Positioned};
use crate::graph::Graph;
use crate::locator::nearest_node_or_err;
use crate::model::{FloorGraph, FloorId, NodeId, RoomLocation};
use crate::path::{find_path, PathResult};

use super::{
    ConnectorSummary, MultiFloorRoute, RoomTarget, RouteMode, RouteSegment, SingleFloorRoute,
};

/// One floor's snapshot plus the name used in error messages.
#[derive(Debug, Clone, Copy)]
pub struct FloorContext<'a> {
    pub floor_id: FloorId,
    pub label: &'a str,
    pub graph: &'a FloorGraph,
}

/// Route from `from` to `room` when both lie on `floor`.
pub fn plan_single_floor(
    floor: FloorContext<'_>,
    from: Point,
    room: &RoomLocation,
) -> Result<SingleFloorRoute> {
    let start = nearest_node_or_err(floor.label, &floor.graph.nodes, &from)?;
    let goal = nearest_node_or_err(floor.label, &floor.graph.nodes, room)?;

    let graph = Graph::from_snapshot(floor.graph);
    let result = find_path(&graph, start.id, goal.id);
    if !result.is_found() {
        return Err(Error::NoRoute);
    }

    let mut points = Vec::with_capacity(result.path.len() + 2);
    points.push(from);
    points.extend(path_points(&graph, &result.path));
    points.push(room.position());

    debug!(
        floor = floor.floor_id,
        room = %room.room_code,
        cost = result.cost,
        hops = result.path.len().saturating_sub(1),
        "planned single-floor route"
    );

    Ok(SingleFloorRoute {
        from,
        to: RoomTarget::from(room),
        points,
        cost: result.cost,
    })
}

/// Route from `from` on `start` to `room` on `destination` through the
/// cheapest matching connector pair.
pub fn plan_multi_floor(
    start: FloorContext<'_>,
    destination: FloorContext<'_>,
    from: Point,
    room: &RoomLocation,
    preference: RoutePreference,
) -> Result<MultiFloorRoute> {
    let start_node = nearest_node_or_err(start.label, &start.graph.nodes, &from)?;
    let goal_node = nearest_node_or_err(destination.label, &destination.graph.nodes, room)?;

    let start_connectors = connectors(&start.graph.nodes);
    let destination_connectors = connectors(&destination.graph.nodes);
    if start_connectors.is_empty() || destination_connectors.is_empty() {
        return Err(Error::NoConnectors);
    }

    let pairs = match_connectors(&start_connectors, &destination_connectors);
    if pairs.is_empty() {
        return Err(Error::NoMatchingConnectors);
    }

    let start_graph = Graph::from_snapshot(start.graph);
    let destination_graph = Graph::from_snapshot(destination.graph);

    // Several pairs can share an endpoint when labels repeat; search each once.
    let mut to_connector: HashMap<NodeId, PathResult> = HashMap::new();
    let mut from_connector: HashMap<NodeId, PathResult> = HashMap::new();

    let mut best: Option<Candidate<'_>> = None;
    for pair in pairs {
        let first = to_connector
            .entry(pair.from.node.id)
            .or_insert_with(|| find_path(&start_graph, start_node.id, pair.from.node.id))
            .clone();
        if !first.is_found() {
            continue;
        }
        let second = from_connector
            .entry(pair.to.node.id)
            .or_insert_with(|| {
                find_path(&destination_graph, pair.to.node.id, goal_node.id)
            })
            .clone();
        if !second.is_found() {
            continue;
        }

        let vertical = vertical_cost(pair.from.kind, preference);
        let total = first.cost + vertical + second.cost;
        let improves = match &best {
            Some(current) => total < current.total,
            None => true,
        };
        if improves {
            best = Some(Candidate {
                pair,
                first,
                second,
                vertical,
                total,
            });
        }
    }

    let Some(best) = best else {
        return Err(Error::NoRouteViaConnectors);
    };

    let kind_label = best.pair.from.kind.to_string().to_uppercase();
    let label = best.pair.from.label();

    let mut first_points = vec![from];
    first_points.extend(path_points(&start_graph, &best.first.path));

    let mut second_points = path_points(&destination_graph, &best.second.path);
    second_points.push(room.position());

    debug!(
        from_floor = start.floor_id,
        to_floor = destination.floor_id,
        room = %room.room_code,
        connector = %label,
        kind = %best.pair.from.kind,
        total_cost = best.total,
        "planned multi-floor route"
    );

    Ok(MultiFloorRoute {
        mode: RouteMode::MultiFloor,
        total_cost: best.total,
        segments: vec![
            RouteSegment {
                floor_id: start.floor_id,
                instruction: format!("Go to {} {}.", kind_label, label),
                points: first_points,
            },
            RouteSegment {
                floor_id: destination.floor_id,
                instruction: format!(
                    "Exit {} {} and continue to room {}.",
                    kind_label, label, room.room_code
                ),
                points: second_points,
            },
        ],
        connector: Some(ConnectorSummary {
            kind: best.pair.from.kind,
            label,
            vertical_cost: best.vertical,
        }),
    })
}

struct Candidate<'a> {
    pair: ConnectorPair<'a>,
    first: PathResult,
    second: PathResult,
    vertical: f64,
    total: f64,
}

fn path_points(graph: &Graph, path: &[NodeId]) -> Vec<Point> {
    path.iter()
        .filter_map(|id| graph.index_of(*id))
        .map(|index| graph.node(index).position())
        .collect()
}

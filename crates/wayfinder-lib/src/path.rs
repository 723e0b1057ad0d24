use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::geometry::distance;
use crate::graph::Graph;
use crate::model::{FloorGraph, NodeId};

/// Outcome of a single-floor search.
///
/// An unreachable goal, or a start/goal id missing from the graph, is reported
/// as an empty path with infinite cost rather than as an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Node ids in traversal order, including start and goal.
    pub path: Vec<NodeId>,
    pub cost: f64,
}

impl PathResult {
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty() && self.cost.is_finite()
    }
}

/// Run A* from `start` to `goal` using stored edge costs and the Euclidean
/// distance to the goal as heuristic.
///
/// Among open entries with equal `f = g + h`, the lowest node id is expanded
/// first.
pub fn find_path(graph: &Graph, start: NodeId, goal: NodeId) -> PathResult {
    let (Some(start_index), Some(goal_index)) = (graph.index_of(start), graph.index_of(goal))
    else {
        return PathResult::unreachable();
    };

    if start_index == goal_index {
        return PathResult {
            path: vec![start],
            cost: 0.0,
        };
    }

    let goal_node = graph.node(goal_index);
    let heuristic = |index: usize| distance(graph.node(index), goal_node);

    let mut g_score = vec![f64::INFINITY; graph.len()];
    let mut parents: Vec<Option<usize>> = vec![None; graph.len()];
    let mut open = BinaryHeap::new();

    g_score[start_index] = 0.0;
    open.push(AStarEntry::new(
        start_index,
        start,
        0.0,
        heuristic(start_index),
    ));

    while let Some(entry) = open.pop() {
        let current = entry.index;
        // Stale entry superseded by a cheaper push.
        if entry.cost.0 > g_score[current] {
            continue;
        }

        if current == goal_index {
            return PathResult {
                path: reconstruct_path(graph, &parents, start_index, goal_index),
                cost: g_score[goal_index],
            };
        }

        for link in graph.neighbours(current) {
            let tentative_g = g_score[current] + link.cost;
            if tentative_g < g_score[link.target] {
                g_score[link.target] = tentative_g;
                parents[link.target] = Some(current);
                open.push(AStarEntry::new(
                    link.target,
                    graph.node(link.target).id,
                    tentative_g,
                    heuristic(link.target),
                ));
            }
        }
    }

    PathResult::unreachable()
}

/// Build the adjacency for `snapshot` and search it in one call.
pub fn find_path_in_snapshot(snapshot: &FloorGraph, start: NodeId, goal: NodeId) -> PathResult {
    find_path(&Graph::from_snapshot(snapshot), start, goal)
}

fn reconstruct_path(
    graph: &Graph,
    parents: &[Option<usize>],
    start: usize,
    goal: usize,
) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(index) = current {
        path.push(graph.node(index).id);
        if index == start {
            break;
        }
        current = parents[index];
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    index: usize,
    id: NodeId,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl AStarEntry {
    fn new(index: usize, id: NodeId, cost: f64, heuristic: f64) -> Self {
        Self {
            index,
            id,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest estimate, then smallest id.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

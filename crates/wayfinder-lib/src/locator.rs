//! Snapping arbitrary coordinates onto a floor's graph.

use crate::error::{Error, Result};
use crate::geometry::{distance, Positioned};
use crate::model::Node;

/// Return the node closest to `point`.
///
/// Ties keep the first node encountered. `None` only when `nodes` is empty.
pub fn nearest_node<'a>(nodes: &'a [Node], point: &impl Positioned) -> Option<&'a Node> {
    let mut best: Option<&Node> = None;
    let mut best_distance = f64::INFINITY;
    for node in nodes {
        let d = distance(node, point);
        if d < best_distance {
            best_distance = d;
            best = Some(node);
        }
    }
    best
}

/// Like [`nearest_node`] but fails with [`Error::NoGraphNodes`] on an empty floor.
pub fn nearest_node_or_err<'a>(
    floor: &str,
    nodes: &'a [Node],
    point: &impl Positioned,
) -> Result<&'a Node> {
    nearest_node(nodes, point).ok_or_else(|| Error::NoGraphNodes {
        floor: floor.to_string(),
    })
}

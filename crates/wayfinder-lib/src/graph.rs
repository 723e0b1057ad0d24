use std::collections::HashMap;

use tracing::warn;

use crate::model::{FloorGraph, Node, NodeId};

/// Adjacency entry within the routing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Dense index of the neighbouring node.
    pub target: usize,
    /// Stored edge cost.
    pub cost: f64,
}

/// Index-based adjacency list for one floor.
///
/// Built once per routing call from a [`FloorGraph`] snapshot and never
/// mutated afterwards, so concurrent routing calls share nothing.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<Link>>,
    skipped_edges: usize,
}

impl Graph {
    /// Build the adjacency structure, adding each edge in both directions.
    ///
    /// Edges whose endpoints are not part of the snapshot are dropped and
    /// reported once via `tracing`.
    pub fn from_snapshot(snapshot: &FloorGraph) -> Self {
        let nodes = snapshot.nodes.clone();
        let index: HashMap<NodeId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.id, position))
            .collect();
        let mut adjacency = vec![Vec::new(); nodes.len()];

        let mut skipped_edges = 0usize;
        for edge in &snapshot.edges {
            let (Some(&from), Some(&to)) =
                (index.get(&edge.from_node_id), index.get(&edge.to_node_id))
            else {
                skipped_edges += 1;
                continue;
            };
            adjacency[from].push(Link {
                target: to,
                cost: edge.cost,
            });
            adjacency[to].push(Link {
                target: from,
                cost: edge.cost,
            });
        }

        if skipped_edges > 0 {
            warn!(skipped_edges, "ignored edges referencing unknown nodes");
        }

        Self {
            nodes,
            index,
            adjacency,
            skipped_edges,
        }
    }

    /// Dense index of a node id, if the node is part of this graph.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return the neighbours for a given node index.
    pub fn neighbours(&self, index: usize) -> &[Link] {
        self.adjacency.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges dropped because an endpoint was missing.
    pub fn skipped_edges(&self) -> usize {
        self.skipped_edges
    }
}

//! Graph authoring: creating and removing nodes and edges, and the two
//! auto-connect heuristics used to bootstrap a floor's walkable graph.
//!
//! Every mutation runs in a single SQLite transaction. The planners
//! ([`plan_nearest_edges`], [`plan_spanning_edges`]) are pure so they can be
//! inspected before anything is written.

use std::collections::HashSet;

use rusqlite::{params, OptionalExtension, Transaction};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geometry::{distance, distance_squared};
use crate::model::{pair_key, Edge, EdgeId, FloorGraph, FloorId, NewNode, Node, NodeId};
use crate::store::{
    require_finite, row_to_edge, row_to_node, GraphStore, EDGE_COLUMNS, NODE_COLUMNS,
};

/// Rows removed by [`GraphStore::clear_floor_graph`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClearedGraph {
    pub edges: usize,
    pub nodes: usize,
}

impl GraphStore {
    /// Fetch a node or fail with [`Error::UnknownNode`].
    pub fn node(&self, id: NodeId) -> Result<Node> {
        let sql = format!("SELECT {NODE_COLUMNS} FROM nodes WHERE id = ?1");
        self.connection()
            .query_row(&sql, [id], row_to_node)
            .optional()?
            .ok_or(Error::UnknownNode { id })
    }

    /// Fetch an edge or fail with [`Error::UnknownEdge`].
    pub fn edge(&self, id: EdgeId) -> Result<Edge> {
        let sql = format!("SELECT {EDGE_COLUMNS} FROM edges WHERE id = ?1");
        self.connection()
            .query_row(&sql, [id], row_to_edge)
            .optional()?
            .ok_or(Error::UnknownEdge { id })
    }

    /// Add a node to `floor_id`. Blank labels are stored as no label.
    pub fn add_node(&mut self, floor_id: FloorId, node: &NewNode) -> Result<Node> {
        require_finite("x", node.x)?;
        require_finite("y", node.y)?;
        self.floor(floor_id)?;

        let label = node
            .label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty());

        let tx = self.connection_mut().transaction()?;
        tx.execute(
            "INSERT INTO nodes (floor_id, x, y, label, type) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![floor_id, node.x, node.y, label, node.node_type],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        debug!(floor = floor_id, node = id, kind = %node.node_type, "added node");
        self.node(id)
    }

    /// Connect two nodes of `floor_id`.
    ///
    /// The cost is the Euclidean distance between the endpoints right now; it
    /// is not updated if either node is later moved.
    pub fn add_edge(&mut self, floor_id: FloorId, from: NodeId, to: NodeId) -> Result<Edge> {
        if from == to {
            return Err(Error::invalid("toNodeId", "edge endpoints must differ"));
        }
        self.floor(floor_id)?;

        let tx = self.connection_mut().transaction()?;
        let a = node_on_floor(&tx, floor_id, from)?;
        let b = node_on_floor(&tx, floor_id, to)?;
        let edge = insert_edge(&tx, floor_id, &a, &b)?;
        tx.commit()?;

        debug!(
            floor = floor_id,
            edge = edge.id,
            from,
            to,
            cost = edge.cost,
            "added edge"
        );
        Ok(edge)
    }

    /// Delete a node and every edge touching it. Returns the number of edges removed.
    pub fn delete_node(&mut self, id: NodeId) -> Result<usize> {
        let tx = self.connection_mut().transaction()?;
        let edges = tx.execute(
            "DELETE FROM edges WHERE from_node_id = ?1 OR to_node_id = ?1",
            [id],
        )?;
        let removed = tx.execute("DELETE FROM nodes WHERE id = ?1", [id])?;
        if removed == 0 {
            return Err(Error::UnknownNode { id });
        }
        tx.commit()?;

        debug!(node = id, cascaded_edges = edges, "deleted node");
        Ok(edges)
    }

    pub fn delete_edge(&mut self, id: EdgeId) -> Result<()> {
        let tx = self.connection_mut().transaction()?;
        let removed = tx.execute("DELETE FROM edges WHERE id = ?1", [id])?;
        if removed == 0 {
            return Err(Error::UnknownEdge { id });
        }
        tx.commit()?;
        debug!(edge = id, "deleted edge");
        Ok(())
    }

    /// Remove every edge, then every node, of a floor.
    pub fn clear_floor_graph(&mut self, floor_id: FloorId) -> Result<ClearedGraph> {
        self.floor(floor_id)?;
        let tx = self.connection_mut().transaction()?;
        let edges = tx.execute("DELETE FROM edges WHERE floor_id = ?1", [floor_id])?;
        let nodes = tx.execute("DELETE FROM nodes WHERE floor_id = ?1", [floor_id])?;
        tx.commit()?;

        info!(floor = floor_id, edges, nodes, "cleared floor graph");
        Ok(ClearedGraph { edges, nodes })
    }

    /// Link every node to its nearest neighbour, skipping pairs already joined.
    pub fn auto_connect_nearest(&mut self, floor_id: FloorId) -> Result<Vec<Edge>> {
        self.apply_plan(floor_id, "nearest", plan_nearest_edges)
    }

    /// Grow a Prim-style spanning tree over the floor's nodes, skipping
    /// pairs already joined.
    pub fn auto_connect_spanning(&mut self, floor_id: FloorId) -> Result<Vec<Edge>> {
        self.apply_plan(floor_id, "spanning", plan_spanning_edges)
    }

    fn apply_plan(
        &mut self,
        floor_id: FloorId,
        strategy: &str,
        planner: fn(&FloorGraph) -> Vec<(NodeId, NodeId)>,
    ) -> Result<Vec<Edge>> {
        self.floor(floor_id)?;
        let snapshot = self.floor_graph(floor_id)?;
        if snapshot.nodes.len() < 2 {
            return Err(Error::NotEnoughNodes {
                floor: floor_id,
                found: snapshot.nodes.len(),
            });
        }

        let plan = planner(&snapshot);
        let tx = self.connection_mut().transaction()?;
        let mut created = Vec::with_capacity(plan.len());
        for (from, to) in plan {
            let (Some(a), Some(b)) = (snapshot.node(from), snapshot.node(to)) else {
                continue;
            };
            created.push(insert_edge(&tx, floor_id, a, b)?);
        }
        tx.commit()?;

        info!(
            floor = floor_id,
            strategy,
            created = created.len(),
            "auto-connected floor"
        );
        Ok(created)
    }
}

/// Pairs to join so that every node is linked to its nearest neighbour.
///
/// Nodes are visited in snapshot order; the first of several equidistant
/// neighbours wins. Pairs already joined by an existing edge, or planned
/// earlier in the pass, are skipped.
pub fn plan_nearest_edges(graph: &FloorGraph) -> Vec<(NodeId, NodeId)> {
    let mut joined = existing_pairs(graph);
    let mut planned = Vec::new();

    for node in &graph.nodes {
        let mut best: Option<&Node> = None;
        let mut best_distance = f64::INFINITY;
        for other in &graph.nodes {
            if other.id == node.id {
                continue;
            }
            let d = distance_squared(node, other);
            if d < best_distance {
                best_distance = d;
                best = Some(other);
            }
        }

        if let Some(other) = best {
            if joined.insert(pair_key(node.id, other.id)) {
                planned.push((node.id, other.id));
            }
        }
    }
    planned
}

/// Pairs forming a greedy spanning tree rooted at the first node.
///
/// At each step the shortest link between a reached and an unreached node is
/// taken (first found wins ties). The unreached node is always marked reached,
/// but the pair is only planned when no edge already joins it.
pub fn plan_spanning_edges(graph: &FloorGraph) -> Vec<(NodeId, NodeId)> {
    let nodes = &graph.nodes;
    let mut planned = Vec::new();
    let Some(root) = nodes.first() else {
        return planned;
    };

    let mut joined = existing_pairs(graph);
    let mut reached: HashSet<NodeId> = HashSet::from([root.id]);

    while reached.len() < nodes.len() {
        let mut best: Option<(&Node, &Node)> = None;
        let mut best_distance = f64::INFINITY;
        for a in nodes.iter().filter(|n| reached.contains(&n.id)) {
            for b in nodes.iter().filter(|n| !reached.contains(&n.id)) {
                let d = distance_squared(a, b);
                if d < best_distance {
                    best_distance = d;
                    best = Some((a, b));
                }
            }
        }

        let Some((a, b)) = best else {
            break;
        };
        if joined.insert(pair_key(a.id, b.id)) {
            planned.push((a.id, b.id));
        }
        reached.insert(b.id);
    }
    planned
}

fn existing_pairs(graph: &FloorGraph) -> HashSet<(NodeId, NodeId)> {
    graph.edges.iter().map(Edge::pair_key).collect()
}

fn node_on_floor(tx: &Transaction<'_>, floor_id: FloorId, id: NodeId) -> Result<Node> {
    let sql = format!(
        "SELECT {NODE_COLUMNS} FROM nodes WHERE id = ?1 AND floor_id = ?2"
    );
    tx.query_row(&sql, params![id, floor_id], row_to_node)
        .optional()?
        .ok_or(Error::UnknownNode { id })
}

fn insert_edge(tx: &Transaction<'_>, floor_id: FloorId, a: &Node, b: &Node) -> Result<Edge> {
    let cost = distance(a, b);
    tx.execute(
        "INSERT INTO edges (floor_id, from_node_id, to_node_id, cost) VALUES (?1, ?2, ?3, ?4)",
        params![floor_id, a.id, b.id, cost],
    )?;
    Ok(Edge {
        id: tx.last_insert_rowid(),
        floor_id,
        from_node_id: a.id,
        to_node_id: b.id,
        cost,
    })
}

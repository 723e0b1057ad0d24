//! Node, edge, and whole-graph authoring commands.

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};

use wayfinder_lib::{Edge, EdgeId, FloorId, GraphStore, NewNode, NodeId, NodeType};

use super::CommandContext;
use crate::output::{AutoConnectSummary, Removal};

#[derive(Subcommand, Debug)]
pub enum NodeCommand {
    /// Add a node to a floor graph.
    Add {
        #[arg(long)]
        floor: FloorId,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// hall, room, stairs, elevator, entrance, or exit.
        #[arg(long = "type", default_value = "hall")]
        node_type: NodeType,
        /// Connector label shared across floors, e.g. E1.
        #[arg(long)]
        label: Option<String>,
    },
    /// Delete a node and every edge touching it.
    Delete { id: NodeId },
}

#[derive(Subcommand, Debug)]
pub enum EdgeCommand {
    /// Connect two nodes on the same floor.
    Add {
        #[arg(long)]
        floor: FloorId,
        #[arg(long)]
        from: NodeId,
        #[arg(long)]
        to: NodeId,
    },
    /// Delete an edge.
    Delete { id: EdgeId },
}

#[derive(Subcommand, Debug)]
pub enum GraphCommand {
    /// Print a floor's nodes and edges.
    Show {
        #[arg(long)]
        floor: FloorId,
    },
    /// Remove every node and edge on a floor.
    Clear {
        #[arg(long)]
        floor: FloorId,
    },
}

/// Edge generation heuristic for `auto-connect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AutoConnectStrategy {
    /// Link every node to its nearest neighbour.
    Nearest,
    /// Add a minimum spanning tree over all nodes.
    Spanning,
}

pub fn handle_node(ctx: &CommandContext, command: NodeCommand) -> Result<()> {
    let mut store = ctx.open_store()?;
    match command {
        NodeCommand::Add {
            floor,
            x,
            y,
            node_type,
            label,
        } => {
            let node = store
                .add_node(
                    floor,
                    &NewNode {
                        x,
                        y,
                        label,
                        node_type,
                    },
                )
                .context("failed to add node")?;
            ctx.emit(&node)
        }
        NodeCommand::Delete { id } => {
            let edges = store
                .delete_node(id)
                .with_context(|| format!("failed to delete node {}", id))?;
            ctx.emit(&Removal {
                kind: "node",
                id,
                edges_removed: Some(edges),
            })
        }
    }
}

pub fn handle_edge(ctx: &CommandContext, command: EdgeCommand) -> Result<()> {
    let mut store = ctx.open_store()?;
    match command {
        EdgeCommand::Add { floor, from, to } => {
            let edge = store
                .add_edge(floor, from, to)
                .context("failed to add edge")?;
            ctx.emit(&edge)
        }
        EdgeCommand::Delete { id } => {
            store
                .delete_edge(id)
                .with_context(|| format!("failed to delete edge {}", id))?;
            ctx.emit(&Removal {
                kind: "edge",
                id,
                edges_removed: None,
            })
        }
    }
}

pub fn handle_graph(ctx: &CommandContext, command: GraphCommand) -> Result<()> {
    let mut store = ctx.open_store()?;
    match command {
        GraphCommand::Show { floor } => {
            store.floor(floor)?;
            let graph = store
                .floor_graph(floor)
                .with_context(|| format!("failed to read graph for floor {}", floor))?;
            ctx.emit(&graph)
        }
        GraphCommand::Clear { floor } => {
            let cleared = store
                .clear_floor_graph(floor)
                .with_context(|| format!("failed to clear graph for floor {}", floor))?;
            ctx.emit(&cleared)
        }
    }
}

pub fn handle_auto_connect(
    ctx: &CommandContext,
    strategy: AutoConnectStrategy,
    floor: FloorId,
) -> Result<()> {
    let mut store = ctx.open_store()?;
    let run: fn(&mut GraphStore, FloorId) -> wayfinder_lib::Result<Vec<Edge>> = match strategy {
        AutoConnectStrategy::Nearest => GraphStore::auto_connect_nearest,
        AutoConnectStrategy::Spanning => GraphStore::auto_connect_spanning,
    };
    let result = run(&mut store, floor);
    let edges = result.with_context(|| format!("failed to auto-connect floor {floor}"))?;
    ctx.emit(&AutoConnectSummary {
        created: edges.len(),
        edges,
    })
}

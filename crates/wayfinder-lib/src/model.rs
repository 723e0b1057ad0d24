//! Typed records for floors, graph nodes, edges, and room anchors.
//!
//! These mirror the rows held by [`crate::store::GraphStore`]. Serialized
//! field names use camelCase because they form the external request/response
//! contract (`floorId`, `fromNodeId`, `roomCode`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::geometry::{Point, Positioned};

pub type FloorId = i64;
pub type NodeId = i64;
pub type EdgeId = i64;
pub type RoomLocationId = i64;

/// A building floor and the coordinate space its graph lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: FloorId,
    /// Short code such as `GF` or `B1`.
    pub key: String,
    pub name: String,
    pub faculty: Option<String>,
    /// Background map image; carried for clients, never read by the router.
    pub image_url: String,
    pub width: u32,
    pub height: u32,
}

impl Floor {
    /// Human readable label used in error messages.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.key)
    }
}

/// Classification of a walkable graph point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    #[default]
    Hall,
    Room,
    Stairs,
    Elevator,
    Entrance,
    Exit,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Hall => "hall",
            NodeType::Room => "room",
            NodeType::Stairs => "stairs",
            NodeType::Elevator => "elevator",
            NodeType::Entrance => "entrance",
            NodeType::Exit => "exit",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hall" => Ok(NodeType::Hall),
            "room" => Ok(NodeType::Room),
            "stairs" => Ok(NodeType::Stairs),
            "elevator" => Ok(NodeType::Elevator),
            "entrance" => Ok(NodeType::Entrance),
            "exit" => Ok(NodeType::Exit),
            other => Err(Error::invalid(
                "type",
                format!(
                    "'{}' is not one of hall, room, stairs, elevator, entrance, exit",
                    other
                ),
            )),
        }
    }
}

/// A point in a floor's walkable graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub floor_id: FloorId,
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
}

impl Positioned for Node {
    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Undirected, weighted connection between two nodes on the same floor.
///
/// `cost` is captured when the edge is created and is not refreshed if the
/// endpoints move later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub floor_id: FloorId,
    pub from_node_id: NodeId,
    pub to_node_id: NodeId,
    pub cost: f64,
}

impl Edge {
    /// Unordered endpoint key used to detect duplicate connections.
    pub fn pair_key(&self) -> (NodeId, NodeId) {
        pair_key(self.from_node_id, self.to_node_id)
    }
}

/// Normalise an unordered node pair to `(min, max)`.
pub fn pair_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    (a.min(b), a.max(b))
}

/// Physical anchor point of a named room on a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomLocation {
    pub id: RoomLocationId,
    pub floor_id: FloorId,
    pub room_code: String,
    pub x: f64,
    pub y: f64,
}

impl Positioned for RoomLocation {
    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Consistent snapshot of one floor's graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl FloorGraph {
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Input for creating a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFloor {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub faculty: Option<String>,
    pub image_url: String,
    pub width: u32,
    pub height: u32,
}

/// Input for creating a graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNode {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
}

impl NewNode {
    pub fn hall(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            label: None,
            node_type: NodeType::Hall,
        }
    }

    pub fn connector(x: f64, y: f64, node_type: NodeType, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            label: Some(label.into()),
            node_type,
        }
    }
}

/// Input for placing (or moving) a room anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoomLocation {
    pub room_code: String,
    pub x: f64,
    pub y: f64,
}

/// Canonical room code form: trimmed and upper-cased.
pub fn normalize_room_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Normalise a room code, rejecting codes that are empty after trimming.
pub fn require_room_code(code: &str) -> crate::Result<String> {
    let normalized = normalize_room_code(code);
    if normalized.is_empty() {
        return Err(Error::invalid("roomCode", "room code cannot be empty"));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_type_parses_case_insensitively() {
        assert_eq!("Elevator".parse::<NodeType>().unwrap(), NodeType::Elevator);
        assert_eq!(" STAIRS ".parse::<NodeType>().unwrap(), NodeType::Stairs);
        assert!("escalator".parse::<NodeType>().is_err());
    }

    #[test]
    fn node_defaults_to_hall_when_type_missing() {
        let json = r#"{"id":1,"floorId":2,"x":1.5,"y":2.0,"label":null}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.node_type, NodeType::Hall);
        assert_eq!(node.floor_id, 2);
    }

    #[test]
    fn node_serializes_type_field() {
        let node = Node {
            id: 7,
            floor_id: 1,
            x: 0.0,
            y: 0.0,
            label: Some("E1".to_string()),
            node_type: NodeType::Elevator,
        };
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"type\":\"elevator\""));
        assert!(json.contains("\"floorId\":1"));
    }

    #[test]
    fn room_codes_are_trimmed_and_uppercased() {
        assert_eq!(normalize_room_code("  b1-12a "), "B1-12A");
        assert!(require_room_code("   ").is_err());
    }

    #[test]
    fn pair_key_is_unordered() {
        assert_eq!(pair_key(9, 3), (3, 9));
        assert_eq!(pair_key(3, 9), (3, 9));
    }
}

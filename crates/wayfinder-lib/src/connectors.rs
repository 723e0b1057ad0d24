//! Vertical connectors (stairs and elevators) and how they link floors.
//!
//! A connector is a stairs or elevator node with a non-blank label. Two
//! connectors on different floors are the same shaft when both the kind and
//! the trimmed, upper-cased label are equal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{Node, NodeType};

/// Vertical transit cost for stairs.
pub const STAIRS_COST: f64 = 80.0;
/// Vertical transit cost for elevators.
pub const ELEVATOR_COST: f64 = 40.0;
/// Vertical transit cost for any other connector type.
pub const DEFAULT_VERTICAL_COST: f64 = 60.0;
/// Added when a preference is given and the connector does not match it.
pub const PREFERENCE_PENALTY: f64 = 30.0;

/// Kind of vertical connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    Stairs,
    Elevator,
}

impl ConnectorKind {
    pub fn from_node_type(node_type: NodeType) -> Option<Self> {
        match node_type {
            NodeType::Stairs => Some(ConnectorKind::Stairs),
            NodeType::Elevator => Some(ConnectorKind::Elevator),
            _ => None,
        }
    }

    pub fn node_type(self) -> NodeType {
        match self {
            ConnectorKind::Stairs => NodeType::Stairs,
            ConnectorKind::Elevator => NodeType::Elevator,
        }
    }

    /// Base cost of moving between floors through this kind of connector.
    pub fn base_cost(self) -> f64 {
        base_vertical_cost(self.node_type())
    }
}

fn base_vertical_cost(node_type: NodeType) -> f64 {
    match node_type {
        NodeType::Stairs => STAIRS_COST,
        NodeType::Elevator => ELEVATOR_COST,
        _ => DEFAULT_VERTICAL_COST,
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConnectorKind::Stairs => "stairs",
            ConnectorKind::Elevator => "elevator",
        })
    }
}

/// Optional hint for which connector kind the traveller would rather use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutePreference {
    #[default]
    None,
    Stairs,
    Elevator,
}

impl RoutePreference {
    /// Lenient parse: anything other than stairs/elevator means no preference.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(RoutePreference::None)
    }

    fn kind(self) -> Option<ConnectorKind> {
        match self {
            RoutePreference::None => None,
            RoutePreference::Stairs => Some(ConnectorKind::Stairs),
            RoutePreference::Elevator => Some(ConnectorKind::Elevator),
        }
    }
}

impl FromStr for RoutePreference {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stairs" => Ok(RoutePreference::Stairs),
            "elevator" => Ok(RoutePreference::Elevator),
            "" | "none" | "any" => Ok(RoutePreference::None),
            other => Err(format!("unknown preference '{}'", other)),
        }
    }
}

/// Cost charged for switching floors through a connector of `kind`.
pub fn vertical_cost(kind: ConnectorKind, preference: RoutePreference) -> f64 {
    node_vertical_cost(kind.node_type(), preference)
}

/// Cost charged for switching floors at a node of `node_type`.
///
/// Types other than stairs and elevators cost [`DEFAULT_VERTICAL_COST`], and
/// still take the penalty when any preference is set.
pub fn node_vertical_cost(node_type: NodeType, preference: RoutePreference) -> f64 {
    let mut cost = base_vertical_cost(node_type);
    if let Some(preferred) = preference.kind() {
        if preferred.node_type() != node_type {
            cost += PREFERENCE_PENALTY;
        }
    }
    cost
}

/// Matching key: exact kind plus normalised label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectorKey {
    pub kind: ConnectorKind,
    pub label: String,
}

/// A connector node together with its matching key.
#[derive(Debug, Clone, Copy)]
pub struct Connector<'a> {
    pub node: &'a Node,
    pub kind: ConnectorKind,
}

impl<'a> Connector<'a> {
    /// Classify `node`, returning `None` unless it is a labelled stairs/elevator.
    pub fn from_node(node: &'a Node) -> Option<Self> {
        let kind = ConnectorKind::from_node_type(node.node_type)?;
        let label = node.label.as_deref()?.trim();
        if label.is_empty() {
            return None;
        }
        Some(Self { node, kind })
    }

    pub fn key(&self) -> ConnectorKey {
        ConnectorKey {
            kind: self.kind,
            label: self.label(),
        }
    }

    /// Trimmed, upper-cased label.
    pub fn label(&self) -> String {
        self.node
            .label
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_uppercase()
    }
}

/// Candidate transit point: the same connector seen from both floors.
#[derive(Debug, Clone, Copy)]
pub struct ConnectorPair<'a> {
    pub from: Connector<'a>,
    pub to: Connector<'a>,
}

/// Connector kind of `node`, if it is a labelled stairs/elevator.
pub fn connector_kind(node: &Node) -> Option<ConnectorKind> {
    Connector::from_node(node).map(|connector| connector.kind)
}

/// All connector nodes on a floor, in node order.
pub fn connectors(nodes: &[Node]) -> Vec<Connector<'_>> {
    nodes.iter().filter_map(Connector::from_node).collect()
}

/// Pair every connector in `from` with every connector in `to` sharing its key.
///
/// Pairs are ordered by `from` position, then `to` position.
pub fn match_connectors<'a>(
    from: &[Connector<'a>],
    to: &[Connector<'a>],
) -> Vec<ConnectorPair<'a>> {
    let mut pairs = Vec::new();
    for a in from {
        let key = a.key();
        for b in to {
            if b.key() == key {
                pairs.push(ConnectorPair { from: *a, to: *b });
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connector_node(id: i64, node_type: NodeType, label: Option<&str>) -> Node {
        Node {
            id,
            floor_id: 1,
            x: 0.0,
            y: 0.0,
            label: label.map(str::to_string),
            node_type,
        }
    }

    #[test]
    fn only_labelled_stairs_and_elevators_are_connectors() {
        let nodes = vec![
            connector_node(1, NodeType::Elevator, Some("E1")),
            connector_node(2, NodeType::Stairs, Some("   ")),
            connector_node(3, NodeType::Stairs, None),
            connector_node(4, NodeType::Hall, Some("E1")),
            connector_node(5, NodeType::Stairs, Some(" s2 ")),
        ];
        let found: Vec<i64> = connectors(&nodes).iter().map(|c| c.node.id).collect();
        assert_eq!(found, vec![1, 5]);
        assert_eq!(connector_kind(&nodes[0]), Some(ConnectorKind::Elevator));
        assert_eq!(connector_kind(&nodes[1]), None);
        assert_eq!(connector_kind(&nodes[3]), None);
    }

    #[test]
    fn matching_requires_same_kind() {
        let floor_a = vec![connector_node(1, NodeType::Stairs, Some("E1"))];
        let floor_b = vec![connector_node(2, NodeType::Elevator, Some("E1"))];
        let pairs = match_connectors(&connectors(&floor_a), &connectors(&floor_b));
        assert!(pairs.is_empty());
    }

    #[test]
    fn matching_ignores_label_case_and_padding() {
        let floor_a = vec![connector_node(1, NodeType::Elevator, Some(" e1"))];
        let floor_b = vec![connector_node(2, NodeType::Elevator, Some("E1 "))];
        let pairs = match_connectors(&connectors(&floor_a), &connectors(&floor_b));
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].from.node.id, 1);
        assert_eq!(pairs[0].to.node.id, 2);
        assert_eq!(pairs[0].from.label(), "E1");
    }

    #[test]
    fn other_node_types_use_default_vertical_cost() {
        assert_eq!(
            node_vertical_cost(NodeType::Entrance, RoutePreference::None),
            DEFAULT_VERTICAL_COST
        );
        assert_eq!(
            node_vertical_cost(NodeType::Hall, RoutePreference::Elevator),
            DEFAULT_VERTICAL_COST + PREFERENCE_PENALTY
        );
        assert_eq!(
            node_vertical_cost(NodeType::Elevator, RoutePreference::Elevator),
            ELEVATOR_COST
        );
    }

    #[test]
    fn vertical_cost_applies_mismatch_penalty() {
        assert_eq!(
            vertical_cost(ConnectorKind::Elevator, RoutePreference::None),
            40.0
        );
        assert_eq!(
            vertical_cost(ConnectorKind::Stairs, RoutePreference::None),
            80.0
        );
        assert_eq!(
            vertical_cost(ConnectorKind::Elevator, RoutePreference::Stairs),
            70.0
        );
        assert_eq!(
            vertical_cost(ConnectorKind::Stairs, RoutePreference::Stairs),
            80.0
        );
    }

    #[test]
    fn preference_parsing_is_lenient() {
        assert_eq!(
            RoutePreference::parse_lenient(Some(" Elevator ")),
            RoutePreference::Elevator
        );
        assert_eq!(
            RoutePreference::parse_lenient(Some("escalator")),
            RoutePreference::None
        );
        assert_eq!(RoutePreference::parse_lenient(None), RoutePreference::None);
    }
}

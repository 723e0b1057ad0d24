//! Output formatting for command results.
//!
//! Every command produces a serializable value; `--format json` prints it as
//! pretty JSON while `--format text` uses the renderers below.

use std::fmt::Write as _;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use wayfinder_lib::{
    ClearedGraph, Edge, Floor, FloorGraph, MultiFloorRoute, Node, RenderText, RoomLocation,
    SingleFloorRoute,
};

use crate::terminal::ColorPalette;

/// Output format selected with the global `--format` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable text.
    #[default]
    Text,
    /// Pretty-printed JSON, matching the HTTP API bodies.
    Json,
}

/// Result of an auto-connect run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoConnectSummary {
    pub created: usize,
    pub edges: Vec<Edge>,
}

/// Result of a delete command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Removal {
    pub kind: &'static str,
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges_removed: Option<usize>,
}

/// Things the CLI knows how to print as text.
pub trait Render {
    fn render(&self, palette: &ColorPalette) -> String;
}

/// Print `value` to stdout in the requested format.
pub fn emit<T>(format: OutputFormat, value: &T) -> Result<()>
where
    T: Serialize + Render + ?Sized,
{
    let rendered = match format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(value).context("failed to serialize output")?;
            json.push('\n');
            json
        }
        OutputFormat::Text => value.render(&ColorPalette::detect()),
    };
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("failed to write output")?;
    Ok(())
}

impl Render for Floor {
    fn render(&self, palette: &ColorPalette) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {}",
            palette.paint(palette.heading, format!("Floor {}:", self.id)),
            self.display_name()
        );
        if let Some(faculty) = &self.faculty {
            let _ = writeln!(out, "  faculty: {}", faculty);
        }
        let _ = writeln!(
            out,
            "  map: {} ({}x{})",
            self.image_url, self.width, self.height
        );
        out
    }
}

impl Render for [Floor] {
    fn render(&self, palette: &ColorPalette) -> String {
        if self.is_empty() {
            return format!("{}\n", palette.paint(palette.warning, "No floors defined."));
        }
        let mut out = String::new();
        for floor in self {
            let _ = writeln!(
                out,
                "{:>4}  {:<6} {}{}",
                floor.id,
                floor.key,
                floor.name,
                floor
                    .faculty
                    .as_deref()
                    .map(|f| palette.paint(palette.muted, format!("  [{}]", f)))
                    .unwrap_or_default()
            );
        }
        out
    }
}

impl Render for RoomLocation {
    fn render(&self, palette: &ColorPalette) -> String {
        format!(
            "{} on floor {} at ({:.2}, {:.2})\n",
            palette.paint(palette.heading, &self.room_code),
            self.floor_id,
            self.x,
            self.y
        )
    }
}

impl Render for [RoomLocation] {
    fn render(&self, palette: &ColorPalette) -> String {
        if self.is_empty() {
            return format!("{}\n", palette.paint(palette.warning, "No rooms placed."));
        }
        self.iter().map(|room| room.render(palette)).collect()
    }
}

impl Render for Node {
    fn render(&self, palette: &ColorPalette) -> String {
        format!("{}\n", node_line(self, palette))
    }
}

impl Render for Edge {
    fn render(&self, palette: &ColorPalette) -> String {
        format!("{}\n", edge_line(self, palette))
    }
}

impl Render for FloorGraph {
    fn render(&self, palette: &ColorPalette) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}",
            palette.paint(palette.heading, format!("Nodes ({}):", self.nodes.len()))
        );
        for node in &self.nodes {
            let _ = writeln!(out, "  {}", node_line(node, palette));
        }
        let _ = writeln!(
            out,
            "{}",
            palette.paint(palette.heading, format!("Edges ({}):", self.edges.len()))
        );
        for edge in &self.edges {
            let _ = writeln!(out, "  {}", edge_line(edge, palette));
        }
        out
    }
}

impl Render for ClearedGraph {
    fn render(&self, palette: &ColorPalette) -> String {
        format!(
            "{} {} edge(s) and {} node(s)\n",
            palette.paint(palette.success, "Removed"),
            self.edges,
            self.nodes
        )
    }
}

impl Render for AutoConnectSummary {
    fn render(&self, palette: &ColorPalette) -> String {
        let mut out = format!(
            "{} {} edge(s)\n",
            palette.paint(palette.success, "Created"),
            self.created
        );
        for edge in &self.edges {
            let _ = writeln!(out, "  {}", edge_line(edge, palette));
        }
        out
    }
}

impl Render for Removal {
    fn render(&self, palette: &ColorPalette) -> String {
        let mut out = format!(
            "{} {} {}",
            palette.paint(palette.success, "Deleted"),
            self.kind,
            self.id
        );
        if let Some(edges) = self.edges_removed {
            let _ = write!(out, " and {} connected edge(s)", edges);
        }
        out.push('\n');
        out
    }
}

impl Render for SingleFloorRoute {
    fn render(&self, palette: &ColorPalette) -> String {
        highlight_heading(self.render_text(), palette)
    }
}

impl Render for MultiFloorRoute {
    fn render(&self, palette: &ColorPalette) -> String {
        highlight_heading(self.render_text(), palette)
    }
}

fn node_line(node: &Node, palette: &ColorPalette) -> String {
    let label = node
        .label
        .as_deref()
        .map(|label| format!(" {}", palette.paint(palette.accent, label)))
        .unwrap_or_default();
    format!(
        "#{} {}{} {}",
        node.id,
        node.node_type,
        label,
        palette.paint(palette.muted, format!("({:.2}, {:.2})", node.x, node.y))
    )
}

fn edge_line(edge: &Edge, palette: &ColorPalette) -> String {
    format!(
        "#{} {} <-> {} cost {}",
        edge.id,
        edge.from_node_id,
        edge.to_node_id,
        palette.paint(palette.success, format!("{:.2}", edge.cost))
    )
}

fn highlight_heading(text: String, palette: &ColorPalette) -> String {
    match text.split_once('\n') {
        Some((heading, rest)) => {
            format!("{}\n{}", palette.paint(palette.heading, heading), rest)
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, label: Option<&str>) -> Node {
        Node {
            id,
            floor_id: 1,
            x: 5.0,
            y: 0.0,
            label: label.map(str::to_string),
            node_type: if label.is_some() {
                wayfinder_lib::NodeType::Elevator
            } else {
                wayfinder_lib::NodeType::Hall
            },
        }
    }

    #[test]
    fn graph_text_lists_nodes_and_edges() {
        let graph = FloorGraph {
            nodes: vec![node(1, None), node(2, Some("E1"))],
            edges: vec![Edge {
                id: 9,
                floor_id: 1,
                from_node_id: 1,
                to_node_id: 2,
                cost: 5.0,
            }],
        };
        let text = graph.render(&ColorPalette::plain());
        assert!(text.contains("Nodes (2):"));
        assert!(text.contains("  #2 elevator E1 (5.00, 0.00)"));
        assert!(text.contains("  #9 1 <-> 2 cost 5.00"));
    }

    #[test]
    fn empty_floor_list_says_so() {
        let floors: Vec<Floor> = Vec::new();
        assert_eq!(
            floors.as_slice().render(&ColorPalette::plain()),
            "No floors defined.\n"
        );
    }

    #[test]
    fn node_removal_mentions_cascaded_edges() {
        let removal = Removal {
            kind: "node",
            id: 4,
            edges_removed: Some(2),
        };
        assert_eq!(
            removal.render(&ColorPalette::plain()),
            "Deleted node 4 and 2 connected edge(s)\n"
        );
    }

    #[test]
    fn heading_highlight_only_touches_first_line() {
        let raw = "Route\n   0: (0.00, 0.00)\n".to_string();
        let text = highlight_heading(raw, &ColorPalette::colored());
        assert!(text.starts_with("\x1b[1;97mRoute\x1b[0m\n"));
        assert!(text.ends_with("   0: (0.00, 0.00)\n"));
    }
}

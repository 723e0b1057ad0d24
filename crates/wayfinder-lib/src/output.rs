use std::fmt::Write;

use crate::connectors::ConnectorKind;
use crate::geometry::Point;
use crate::routing::{MultiFloorRoute, SingleFloorRoute};

/// Plain-text rendering of a route, as printed by the CLI.
pub trait RenderText {
    fn render_text(&self) -> String;
}

impl RenderText for SingleFloorRoute {
    fn render_text(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route to room {}: ({}) -> ({}), cost {:.2}",
            self.to.room_code,
            format_point(&self.from),
            format_point(&Point::new(self.to.x, self.to.y)),
            self.cost
        );
        write_points(&mut buffer, &self.points);
        buffer
    }
}

impl RenderText for MultiFloorRoute {
    fn render_text(&self) -> String {
        let mut buffer = String::new();
        let mode = self.mode.as_str();
        let _ = writeln!(
            buffer,
            "Route ({mode}, {} segment{}), total cost {:.2}",
            self.segments.len(),
            if self.segments.len() == 1 { "" } else { "s" },
            self.total_cost
        );
        if let Some(connector) = &self.connector {
            let _ = writeln!(
                buffer,
                "Connector: {} {} (vertical cost {:.2})",
                kind_label(connector.kind),
                connector.label,
                connector.vertical_cost
            );
        }
        for (index, segment) in self.segments.iter().enumerate() {
            let _ = writeln!(buffer);
            let number = index + 1;
            let _ = writeln!(buffer, "Segment {} on floor {}:", number, segment.floor_id);
            let _ = writeln!(buffer, "  {}", segment.instruction);
            write_points(&mut buffer, &segment.points);
        }
        buffer
    }
}

fn kind_label(kind: ConnectorKind) -> String {
    kind.to_string().to_uppercase()
}

fn format_point(point: &Point) -> String {
    format!("{:.2}, {:.2}", point.x, point.y)
}

fn write_points(buffer: &mut String, points: &[Point]) {
    for (index, point) in points.iter().enumerate() {
        let _ = writeln!(buffer, "{:>4}: ({})", index, format_point(point));
    }
}

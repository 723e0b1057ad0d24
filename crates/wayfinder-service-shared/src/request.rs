//! Request bodies and their validation.
//!
//! Every field is optional at the serde level so a missing coordinate
//! becomes a 400 naming the field instead of a generic JSON rejection.

use serde::{Deserialize, Serialize};
use wayfinder_lib::{FloorId, MultiFloorRequest, NewNode, NodeId, NodeType, Point, RoutePreference};

use crate::ProblemDetails;

/// Check a request body and convert it into the library's input type.
///
/// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
pub trait Validate {
    type Output;

    fn validate(&self, request_id: &str) -> Result<Self::Output, Box<ProblemDetails>>;
}

fn required<T: Copy>(
    value: Option<T>,
    field: &str,
    request_id: &str,
) -> Result<T, Box<ProblemDetails>> {
    value.ok_or_else(|| {
        Box::new(ProblemDetails::bad_request(
            format!("The '{}' field is required", field),
            request_id,
        ))
    })
}

fn required_coordinate(
    value: Option<f64>,
    field: &str,
    request_id: &str,
) -> Result<f64, Box<ProblemDetails>> {
    let value = required(value, field, request_id)?;
    if !value.is_finite() {
        return Err(Box::new(ProblemDetails::bad_request(
            format!("The '{}' field must be a finite number", field),
            request_id,
        )));
    }
    Ok(value)
}

fn required_room(
    value: &Option<String>,
    field: &str,
    request_id: &str,
) -> Result<String, Box<ProblemDetails>> {
    match value.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => Ok(code.to_string()),
        _ => Err(Box::new(ProblemDetails::bad_request(
            format!("The '{}' field is required and cannot be empty", field),
            request_id,
        ))),
    }
}

fn rejected(err: &impl std::fmt::Display, request_id: &str) -> Box<ProblemDetails> {
    Box::new(ProblemDetails::bad_request(err.to_string(), request_id))
}

/// `POST /api/v1/route`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub floor_id: Option<FloorId>,
    pub from_x: Option<f64>,
    pub from_y: Option<f64>,
    pub to_room: Option<String>,
}

/// Validated single-floor query.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    pub floor_id: FloorId,
    pub from: Point,
    pub room_code: String,
}

impl Validate for RouteRequest {
    type Output = RouteQuery;

    fn validate(&self, request_id: &str) -> Result<RouteQuery, Box<ProblemDetails>> {
        Ok(RouteQuery {
            floor_id: required(self.floor_id, "floorId", request_id)?,
            from: Point::new(
                required_coordinate(self.from_x, "fromX", request_id)?,
                required_coordinate(self.from_y, "fromY", request_id)?,
            ),
            room_code: required_room(&self.to_room, "toRoom", request_id)?,
        })
    }
}

/// `POST /api/v1/route/multi`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiRouteRequest {
    pub from_floor_id: Option<FloorId>,
    pub from_x: Option<f64>,
    pub from_y: Option<f64>,
    pub to_room: Option<String>,
    /// `stairs` or `elevator`; anything else means no preference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer: Option<String>,
}

impl Validate for MultiRouteRequest {
    type Output = MultiFloorRequest;

    fn validate(&self, request_id: &str) -> Result<MultiFloorRequest, Box<ProblemDetails>> {
        let from = Point::new(
            required_coordinate(self.from_x, "fromX", request_id)?,
            required_coordinate(self.from_y, "fromY", request_id)?,
        );
        let request = MultiFloorRequest::new(
            required(self.from_floor_id, "fromFloorId", request_id)?,
            from,
            required_room(&self.to_room, "toRoom", request_id)?,
        );
        let prefer = RoutePreference::parse_lenient(self.prefer.as_deref());
        Ok(request.with_preference(prefer))
    }
}

/// `POST /api/v1/nodes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeRequest {
    pub floor_id: Option<FloorId>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Defaults to `hall`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
}

impl Validate for CreateNodeRequest {
    type Output = (FloorId, NewNode);

    fn validate(&self, request_id: &str) -> Result<Self::Output, Box<ProblemDetails>> {
        let floor_id = required(self.floor_id, "floorId", request_id)?;
        let node_type = match self.node_type.as_deref() {
            None => NodeType::default(),
            Some(raw) => raw
                .parse::<NodeType>()
                .map_err(|err| rejected(&err, request_id))?,
        };
        let node = NewNode {
            x: required_coordinate(self.x, "x", request_id)?,
            y: required_coordinate(self.y, "y", request_id)?,
            label: self.label.clone(),
            node_type,
        };
        Ok((floor_id, node))
    }
}

/// `POST /api/v1/edges`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEdgeRequest {
    pub floor_id: Option<FloorId>,
    pub from_node_id: Option<NodeId>,
    pub to_node_id: Option<NodeId>,
}

/// Validated edge endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeEndpoints {
    pub floor_id: FloorId,
    pub from: NodeId,
    pub to: NodeId,
}

impl Validate for CreateEdgeRequest {
    type Output = EdgeEndpoints;

    fn validate(&self, request_id: &str) -> Result<EdgeEndpoints, Box<ProblemDetails>> {
        Ok(EdgeEndpoints {
            floor_id: required(self.floor_id, "floorId", request_id)?,
            from: required(self.from_node_id, "fromNodeId", request_id)?,
            to: required(self.to_node_id, "toNodeId", request_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> RouteRequest {
        RouteRequest {
            floor_id: Some(1),
            from_x: Some(0.0),
            from_y: Some(0.0),
            to_room: Some(" b1-10 ".to_string()),
        }
    }

    #[test]
    fn test_route_request_valid() {
        let query = route().validate("req").unwrap();
        assert_eq!(query.floor_id, 1);
        assert_eq!(query.room_code, "b1-10");
    }

    #[test]
    fn test_route_request_names_missing_field() {
        let request = RouteRequest {
            from_y: None,
            ..route()
        };
        let err = request.validate("req-1").unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.detail.as_deref().unwrap().contains("'fromY'"));
        assert_eq!(err.instance.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_route_request_rejects_blank_room() {
        let request = RouteRequest {
            to_room: Some("   ".to_string()),
            ..route()
        };
        assert!(request.validate("req").is_err());
    }

    #[test]
    fn test_route_request_deserializes_camel_case() {
        let request: RouteRequest =
            serde_json::from_str(r#"{"floorId":2,"fromX":1.5,"fromY":-3,"toRoom":"A"}"#).unwrap();
        assert_eq!(request.floor_id, Some(2));
        assert_eq!(request.from_y, Some(-3.0));
    }

    #[test]
    fn test_multi_route_preference_is_lenient() {
        let request = MultiRouteRequest {
            from_floor_id: Some(1),
            from_x: Some(0.0),
            from_y: Some(0.0),
            to_room: Some("B1-10".to_string()),
            prefer: Some("Escalator".to_string()),
        };
        assert_eq!(
            request.validate("req").unwrap().prefer,
            RoutePreference::None
        );

        let request = MultiRouteRequest {
            prefer: Some(" STAIRS ".to_string()),
            ..request
        };
        assert_eq!(
            request.validate("req").unwrap().prefer,
            RoutePreference::Stairs
        );
    }

    #[test]
    fn test_create_node_defaults_to_hall() {
        let request: CreateNodeRequest =
            serde_json::from_str(r#"{"floorId":1,"x":2,"y":3}"#).unwrap();
        let (floor, node) = request.validate("req").unwrap();
        assert_eq!(floor, 1);
        assert_eq!(node.node_type, NodeType::Hall);
    }

    #[test]
    fn test_create_node_rejects_unknown_type() {
        let request: CreateNodeRequest =
            serde_json::from_str(r#"{"floorId":1,"x":2,"y":3,"type":"escalator"}"#).unwrap();
        let err = request.validate("req").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("escalator"));
    }

    #[test]
    fn test_create_edge_requires_both_endpoints() {
        let request = CreateEdgeRequest {
            floor_id: Some(1),
            from_node_id: Some(4),
            to_node_id: None,
        };
        let err = request.validate("req").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'toNodeId'"));
    }
}

mod common;

use common::{connector, hall, link, room, store_with_floor, two_floor_campus};
use wayfinder_lib::{
    route_multi_floor, route_single_floor, ConnectorKind, Error, ErrorCategory, MultiFloorRequest,
    NodeType, Point, RouteMode, RoutePreference,
};

#[test]
fn single_floor_route_touches_literal_endpoints() {
    let (mut store, floor) = store_with_floor("GF");
    let n1 = hall(&mut store, floor, 0.0, 0.0);
    let n2 = hall(&mut store, floor, 10.0, 0.0);
    let n3 = hall(&mut store, floor, 10.0, 10.0);
    link(&mut store, floor, n1.id, n2.id);
    link(&mut store, floor, n2.id, n3.id);
    room(&mut store, floor, "111170", 50.0, 50.0);

    let start = Point::new(0.0, 0.0);
    let route = route_single_floor(&store, floor, start, "111170").expect("route exists");

    assert_eq!(route.points.first(), Some(&Point::new(0.0, 0.0)));
    assert_eq!(route.points.last(), Some(&Point::new(50.0, 50.0)));
    // Room snaps onto n3, so every graph node appears between the endpoints.
    assert_eq!(route.points.len(), 5);
    assert!((route.cost - 20.0).abs() < 1e-9);
    assert_eq!(route.to.room_code, "111170");
}

#[test]
fn single_floor_room_lookup_is_case_insensitive() {
    let (mut store, floor) = store_with_floor("GF");
    hall(&mut store, floor, 0.0, 0.0);
    room(&mut store, floor, "lab-2", 3.0, 4.0);

    let start = Point::new(1.0, 1.0);
    let route = route_single_floor(&store, floor, start, "  Lab-2 ").expect("route exists");
    assert_eq!(route.to.room_code, "LAB-2");
    assert_eq!(route.cost, 0.0);
    assert_eq!(route.points.len(), 3);
}

#[test]
fn single_floor_disconnected_room_is_no_route() {
    let (mut store, floor) = store_with_floor("GF");
    hall(&mut store, floor, 0.0, 0.0);
    hall(&mut store, floor, 100.0, 0.0);
    room(&mut store, floor, "R1", 100.0, 5.0);

    let err = route_single_floor(&store, floor, Point::new(0.0, 0.0), "R1").unwrap_err();
    assert!(matches!(err, Error::NoRoute));
    assert_eq!(err.category(), ErrorCategory::Infeasible);
}

#[test]
fn single_floor_room_on_other_floor_is_not_found() {
    let campus = two_floor_campus();
    let err = route_single_floor(&campus.store, campus.ground, Point::new(0.0, 0.0), "B1-10")
        .unwrap_err();
    assert!(matches!(err, Error::RoomLocationNotFound { .. }));
}

#[test]
fn single_floor_empty_graph_reports_floor() {
    let (mut store, floor) = store_with_floor("GF");
    room(&mut store, floor, "R1", 1.0, 1.0);
    let err = route_single_floor(&store, floor, Point::new(0.0, 0.0), "R1").unwrap_err();
    assert_eq!(err.to_string(), "no graph nodes on GF (GF)");
}

#[test]
fn non_finite_start_is_rejected_before_lookup() {
    let (store, floor) = store_with_floor("GF");
    let err = route_single_floor(&store, floor, Point::new(f64::NAN, 0.0), "R1").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);
}

#[test]
fn multi_floor_route_through_elevator() {
    let campus = two_floor_campus();
    let request = MultiFloorRequest::new(campus.ground, Point::new(0.0, 0.0), "B1-10");
    let route = route_multi_floor(&campus.store, &request).expect("route exists");

    assert_eq!(route.mode, RouteMode::MultiFloor);
    assert!((route.total_cost - 52.0).abs() < 1e-9);
    assert_eq!(route.segments.len(), 2);
    assert_eq!(route.segments[0].floor_id, campus.ground);
    assert_eq!(route.segments[0].instruction, "Go to ELEVATOR E1.");
    assert_eq!(
        route.segments[0].points.first(),
        Some(&Point::new(0.0, 0.0))
    );
    assert_eq!(route.segments[1].floor_id, campus.upper);
    assert_eq!(
        route.segments[1].instruction,
        "Exit ELEVATOR E1 and continue to room B1-10."
    );
    assert_eq!(
        route.segments[1].points.last(),
        Some(&Point::new(12.0, 1.0))
    );

    let connector = route.connector.expect("connector reported");
    assert_eq!(connector.kind, ConnectorKind::Elevator);
    assert_eq!(connector.label, "E1");
    assert_eq!(connector.vertical_cost, 40.0);
}

#[test]
fn mismatched_preference_adds_penalty_but_keeps_only_option() {
    let campus = two_floor_campus();
    let request = MultiFloorRequest::new(campus.ground, Point::new(0.0, 0.0), "b1-10")
        .with_preference(RoutePreference::Stairs);
    let route = route_multi_floor(&campus.store, &request).expect("route exists");

    assert!((route.total_cost - 82.0).abs() < 1e-9);
    assert_eq!(route.connector.map(|c| c.vertical_cost), Some(70.0));
}

#[test]
fn preference_can_change_chosen_connector() {
    let mut campus = two_floor_campus();
    let store = &mut campus.store;
    // Stairs "S1": one unit from the start, and right next to the room upstairs.
    let start = store.floor_graph(campus.ground).unwrap().nodes[0].id;
    let stairs_a = connector(store, campus.ground, 0.0, 1.0, NodeType::Stairs, "S1");
    link(store, campus.ground, start, stairs_a.id);
    let corridor = store.floor_graph(campus.upper).unwrap().nodes[1].id;
    let stairs_b = connector(store, campus.upper, 12.0, 0.5, NodeType::Stairs, "S1");
    link(store, campus.upper, corridor, stairs_b.id);

    let base = MultiFloorRequest::new(campus.ground, Point::new(0.0, 0.0), "B1-10");

    // Room now snaps to the stairs. Elevator: 5 + 40 + 7.5; stairs: 1 + 80 + 0.
    let default_route = route_multi_floor(store, &base).unwrap();
    assert_eq!(
        default_route.connector.unwrap().kind,
        ConnectorKind::Elevator
    );
    assert!((default_route.total_cost - 52.5).abs() < 1e-9);

    // The penalty lifts the elevator to 82.5, above the stairs at 81.
    let prefer_stairs = base.clone().with_preference(RoutePreference::Stairs);
    let stairs_route = route_multi_floor(store, &prefer_stairs).unwrap();
    let chosen = stairs_route.connector.unwrap();
    assert_eq!(chosen.kind, ConnectorKind::Stairs);
    assert_eq!(chosen.label, "S1");
    assert!((stairs_route.total_cost - 81.0).abs() < 1e-9);
    assert_eq!(stairs_route.segments[0].instruction, "Go to STAIRS S1.");
}

#[test]
fn same_floor_room_yields_single_segment() {
    let campus = two_floor_campus();
    let request = MultiFloorRequest::new(campus.upper, Point::new(5.0, 0.0), "B1-10");
    let route = route_multi_floor(&campus.store, &request).expect("route exists");

    assert_eq!(route.mode, RouteMode::SingleFloor);
    assert_eq!(route.segments.len(), 1);
    assert_eq!(route.segments[0].instruction, "Walk to room B1-10.");
    assert!(route.connector.is_none());
    assert!((route.total_cost - 7.0).abs() < 1e-9);
}

#[test]
fn duplicate_room_code_prefers_the_start_floor() {
    let campus = two_floor_campus();
    let mut store = campus.store;
    room(&mut store, campus.ground, "DUP", 1.0, 0.0);
    room(&mut store, campus.upper, "DUP", 1.0, 0.0);

    let request = MultiFloorRequest::new(campus.upper, Point::new(0.0, 0.0), "dup");
    let route = route_multi_floor(&store, &request).expect("route exists");

    assert_eq!(route.mode, RouteMode::SingleFloor);
    assert_eq!(route.segments.len(), 1);
    assert_eq!(route.segments[0].floor_id, campus.upper);
    assert!(route.connector.is_none());
    assert!(route.total_cost < 1e-9);

    let request = MultiFloorRequest::new(campus.ground, Point::new(0.0, 0.0), "DUP");
    let route = route_multi_floor(&store, &request).expect("route exists");
    assert_eq!(route.mode, RouteMode::SingleFloor);
    assert_eq!(route.segments[0].floor_id, campus.ground);
}

#[test]
fn connector_labels_must_match_by_kind() {
    let campus = two_floor_campus();
    let mut store = campus.store;
    // Replace the upstairs elevator with a stairwell sharing its label.
    let upper = store.floor_graph(campus.upper).unwrap();
    store.delete_node(upper.nodes[0].id).unwrap();
    connector(&mut store, campus.upper, 5.0, 0.0, NodeType::Stairs, "E1");

    let request = MultiFloorRequest::new(campus.ground, Point::new(0.0, 0.0), "B1-10");
    let err = route_multi_floor(&store, &request).unwrap_err();
    assert!(matches!(err, Error::NoMatchingConnectors));
}

#[test]
fn floor_without_connectors_is_infeasible() {
    let campus = two_floor_campus();
    let mut store = campus.store;
    let ground = store.floor_graph(campus.ground).unwrap();
    store.delete_node(ground.nodes[1].id).unwrap();

    let request = MultiFloorRequest::new(campus.ground, Point::new(0.0, 0.0), "B1-10");
    let err = route_multi_floor(&store, &request).unwrap_err();
    assert!(matches!(err, Error::NoConnectors));
}

#[test]
fn unreachable_connector_is_skipped() {
    let campus = two_floor_campus();
    let mut store = campus.store;
    // Cut the only corridor to the elevator on the ground floor.
    let ground = store.floor_graph(campus.ground).unwrap();
    store.delete_edge(ground.edges[0].id).unwrap();

    let request = MultiFloorRequest::new(campus.ground, Point::new(0.0, 0.0), "B1-10");
    let err = route_multi_floor(&store, &request).unwrap_err();
    assert!(matches!(err, Error::NoRouteViaConnectors));
}

#[test]
fn unknown_room_suggests_close_codes() {
    let campus = two_floor_campus();
    let request = MultiFloorRequest::new(campus.ground, Point::new(0.0, 0.0), "B1-11");
    let err = route_multi_floor(&campus.store, &request).unwrap_err();

    assert_eq!(err.category(), ErrorCategory::NotFound);
    let message = err.to_string();
    assert!(message.contains("room location not found: B1-11"));
    assert!(message.contains("Did you mean 'B1-10'?"));
}

#[test]
fn unknown_start_floor_is_not_found() {
    let campus = two_floor_campus();
    let request = MultiFloorRequest::new(99, Point::new(0.0, 0.0), "B1-10");
    let err = route_multi_floor(&campus.store, &request).unwrap_err();
    assert!(matches!(err, Error::UnknownFloor { id: 99 }));
}

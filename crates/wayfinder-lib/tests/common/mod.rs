//! Shared fixtures for integration tests.
//!
//! Builds small in-memory campuses through the public store API so every
//! test exercises the same code paths as the CLI and service.

#![allow(dead_code)]

use wayfinder_lib::{
    FloorId, GraphStore, NewFloor, NewNode, NewRoomLocation, Node, NodeId, NodeType,
};

pub fn floor(key: &str, name: &str) -> NewFloor {
    NewFloor {
        key: key.to_string(),
        name: name.to_string(),
        faculty: None,
        image_url: format!("/maps/{}.png", key.to_lowercase()),
        width: 1000,
        height: 800,
    }
}

pub fn store_with_floor(key: &str) -> (GraphStore, FloorId) {
    let mut store = GraphStore::open_in_memory().expect("open in-memory store");
    let created = store.create_floor(&floor(key, key)).expect("create floor");
    (store, created.id)
}

pub fn hall(store: &mut GraphStore, floor: FloorId, x: f64, y: f64) -> Node {
    store
        .add_node(floor, &NewNode::hall(x, y))
        .expect("add hall node")
}

pub fn connector(
    store: &mut GraphStore,
    floor: FloorId,
    x: f64,
    y: f64,
    node_type: NodeType,
    label: &str,
) -> Node {
    store
        .add_node(floor, &NewNode::connector(x, y, node_type, label))
        .expect("add connector node")
}

pub fn link(store: &mut GraphStore, floor: FloorId, a: NodeId, b: NodeId) {
    store.add_edge(floor, a, b).expect("add edge");
}

pub fn room(store: &mut GraphStore, floor: FloorId, code: &str, x: f64, y: f64) {
    store
        .upsert_room_location(
            floor,
            &NewRoomLocation {
                room_code: code.to_string(),
                x,
                y,
            },
        )
        .expect("place room");
}

/// Two floors joined by elevator "E1".
///
/// Floor 1: start hall at (0,0), elevator at (5,0), 5 apart.
/// Floor 2: elevator at (5,0), hall at (12,0) next to room B1-10, 7 apart.
pub struct TwoFloorCampus {
    pub store: GraphStore,
    pub ground: FloorId,
    pub upper: FloorId,
}

pub fn two_floor_campus() -> TwoFloorCampus {
    let mut store = GraphStore::open_in_memory().expect("open in-memory store");
    let ground = store.create_floor(&floor("GF", "Ground")).expect("GF").id;
    let upper = store.create_floor(&floor("B1", "Level 1")).expect("B1").id;

    let start = hall(&mut store, ground, 0.0, 0.0);
    let lift_a = connector(&mut store, ground, 5.0, 0.0, NodeType::Elevator, "E1");
    link(&mut store, ground, start.id, lift_a.id);

    let lift_b = connector(&mut store, upper, 5.0, 0.0, NodeType::Elevator, "e1 ");
    let corridor = hall(&mut store, upper, 12.0, 0.0);
    link(&mut store, upper, lift_b.id, corridor.id);
    room(&mut store, upper, "b1-10", 12.0, 1.0);

    TwoFloorCampus {
        store,
        ground,
        upper,
    }
}

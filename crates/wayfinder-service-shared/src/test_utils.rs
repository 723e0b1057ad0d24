//! Fixtures for handler tests.
//!
//! [`campus_state`] returns a fresh in-memory store holding two floors joined
//! by elevator `E1`:
//!
//! ```text
//! GF (id 1):  start (0,0) --5-- ELEVATOR E1 (5,0)
//! B1 (id 2):  ELEVATOR E1 (5,0) --7-- corridor (12,0)   room B1-10 at (12,1)
//!             room B1-12 at (5,1)
//! ```
//!
//! Routing from (0,0) on GF to `B1-10` costs 5 + 40 + 7 = 52.

use wayfinder_lib::{GraphStore, NewFloor, NewNode, NewRoomLocation, NodeType};

use crate::state::AppState;

pub const GROUND_FLOOR: i64 = 1;
pub const UPPER_FLOOR: i64 = 2;
pub const UPPER_ROOM: &str = "B1-10";

fn floor(key: &str, name: &str) -> NewFloor {
    NewFloor {
        key: key.to_string(),
        name: name.to_string(),
        faculty: Some("Engineering".to_string()),
        image_url: format!("/maps/{}.png", key.to_lowercase()),
        width: 1000,
        height: 800,
    }
}

fn room(code: &str, x: f64, y: f64) -> NewRoomLocation {
    NewRoomLocation {
        room_code: code.to_string(),
        x,
        y,
    }
}

/// Build the two-floor campus described in the module docs.
///
/// # Panics
///
/// Panics if the in-memory store rejects the fixture, which indicates a
/// broken schema rather than a test failure.
pub fn campus_store() -> GraphStore {
    let mut store = GraphStore::open_in_memory().expect("in-memory store");
    let ground = store.create_floor(&floor("GF", "Ground")).expect("GF").id;
    let upper = store.create_floor(&floor("B1", "Level 1")).expect("B1").id;
    let lift_node = NewNode::connector(5.0, 0.0, NodeType::Elevator, "E1");

    let start = store
        .add_node(ground, &NewNode::hall(0.0, 0.0))
        .expect("node");
    let lift = store.add_node(ground, &lift_node).expect("node");
    store.add_edge(ground, start.id, lift.id).expect("edge");

    let lift = store.add_node(upper, &lift_node).expect("node");
    let corridor = store
        .add_node(upper, &NewNode::hall(12.0, 0.0))
        .expect("node");
    store.add_edge(upper, lift.id, corridor.id).expect("edge");

    store
        .upsert_room_location(upper, &room(UPPER_ROOM, 12.0, 1.0))
        .expect("room");
    store
        .upsert_room_location(upper, &room("B1-12", 5.0, 1.0))
        .expect("room");
    store
}

pub fn campus_state() -> AppState {
    AppState::from_store(campus_store())
}

/// State over an empty in-memory store.
pub fn empty_state() -> AppState {
    AppState::from_store(GraphStore::open_in_memory().expect("in-memory store"))
}

/// Unique request id for tests.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}

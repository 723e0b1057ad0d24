mod common;

use common::{hall, link, store_with_floor};
use wayfinder_lib::{Error, ErrorCategory, NewNode, NodeType};

#[test]
fn add_node_normalises_blank_labels() {
    let (mut store, floor) = store_with_floor("GF");
    let node = store
        .add_node(
            floor,
            &NewNode {
                x: 1.0,
                y: 2.0,
                label: Some("   ".to_string()),
                node_type: NodeType::Stairs,
            },
        )
        .unwrap();
    assert_eq!(node.label, None);
    assert_eq!(node.node_type, NodeType::Stairs);
    assert_eq!(node.floor_id, floor);
}

#[test]
fn add_node_requires_existing_floor() {
    let (mut store, _) = store_with_floor("GF");
    let err = store.add_node(404, &NewNode::hall(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, Error::UnknownFloor { id: 404 }));
}

#[test]
fn edge_cost_is_a_snapshot_of_distance() {
    let (mut store, floor) = store_with_floor("GF");
    let a = hall(&mut store, floor, 0.0, 0.0);
    let b = hall(&mut store, floor, 6.0, 8.0);
    let edge = store.add_edge(floor, a.id, b.id).unwrap();
    assert_eq!(edge.cost, 10.0);
    assert_eq!(store.edge(edge.id).unwrap(), edge);
}

#[test]
fn edge_endpoints_must_live_on_the_floor() {
    let (mut store, floor) = store_with_floor("GF");
    let upper = common::floor("B1", "Upper");
    let other = store.create_floor(&upper).unwrap().id;
    let a = hall(&mut store, floor, 0.0, 0.0);
    let foreign = hall(&mut store, other, 1.0, 0.0);

    let err = store.add_edge(floor, a.id, foreign.id).unwrap_err();
    assert!(matches!(err, Error::UnknownNode { id } if id == foreign.id));

    let err = store.add_edge(floor, a.id, a.id).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert!(store.floor_graph(floor).unwrap().edges.is_empty());
}

#[test]
fn deleting_node_cascades_to_its_edges() {
    let (mut store, floor) = store_with_floor("GF");
    let hub = hall(&mut store, floor, 0.0, 0.0);
    let spokes: Vec<_> = (1..=3)
        .map(|i| hall(&mut store, floor, i as f64, 0.0))
        .collect();
    for spoke in &spokes {
        link(&mut store, floor, hub.id, spoke.id);
    }
    // Also use the hub as the "to" endpoint once.
    let tail = hall(&mut store, floor, 0.0, 5.0);
    link(&mut store, floor, tail.id, hub.id);
    link(&mut store, floor, spokes[0].id, spokes[1].id);

    let removed = store.delete_node(hub.id).unwrap();
    assert_eq!(removed, 4);

    let graph = store.floor_graph(floor).unwrap();
    assert_eq!(graph.edges.len(), 1);
    assert!(graph
        .edges
        .iter()
        .all(|e| e.from_node_id != hub.id && e.to_node_id != hub.id));
    assert!(matches!(
        store.node(hub.id),
        Err(Error::UnknownNode { .. })
    ));
}

#[test]
fn deleting_missing_rows_reports_not_found() {
    let (mut store, _) = store_with_floor("GF");
    assert!(matches!(
        store.delete_node(9),
        Err(Error::UnknownNode { id: 9 })
    ));
    assert!(matches!(
        store.delete_edge(9),
        Err(Error::UnknownEdge { id: 9 })
    ));
}

#[test]
fn delete_edge_leaves_nodes() {
    let (mut store, floor) = store_with_floor("GF");
    let a = hall(&mut store, floor, 0.0, 0.0);
    let b = hall(&mut store, floor, 1.0, 0.0);
    let edge = store.add_edge(floor, a.id, b.id).unwrap();

    store.delete_edge(edge.id).unwrap();
    let graph = store.floor_graph(floor).unwrap();
    assert!(graph.edges.is_empty());
    assert_eq!(graph.nodes.len(), 2);
}

#[test]
fn clear_floor_graph_counts_rows() {
    let (mut store, floor) = store_with_floor("GF");
    let a = hall(&mut store, floor, 0.0, 0.0);
    let b = hall(&mut store, floor, 1.0, 0.0);
    let c = hall(&mut store, floor, 2.0, 0.0);
    link(&mut store, floor, a.id, b.id);
    link(&mut store, floor, b.id, c.id);

    let cleared = store.clear_floor_graph(floor).unwrap();
    assert_eq!(cleared.edges, 2);
    assert_eq!(cleared.nodes, 3);
    assert_eq!(store.floor_graph(floor).unwrap(), Default::default());
}

#[test]
fn auto_connect_nearest_is_idempotent() {
    let (mut store, floor) = store_with_floor("GF");
    hall(&mut store, floor, 0.0, 0.0);
    hall(&mut store, floor, 1.0, 0.0);
    hall(&mut store, floor, 10.0, 0.0);
    hall(&mut store, floor, 12.0, 0.0);

    let created = store.auto_connect_nearest(floor).unwrap();
    assert_eq!(created.len(), 2);
    assert!(store.auto_connect_nearest(floor).unwrap().is_empty());
}

#[test]
fn auto_connect_spanning_reaches_every_node() {
    let (mut store, floor) = store_with_floor("GF");
    for (x, y) in [(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (20.0, 20.0), (0.0, 9.0)] {
        hall(&mut store, floor, x, y);
    }

    let created = store.auto_connect_spanning(floor).unwrap();
    assert_eq!(created.len(), 4);

    let graph = store.floor_graph(floor).unwrap();
    let first = graph.nodes[0].id;
    for node in &graph.nodes {
        let path = wayfinder_lib::find_path_in_snapshot(&graph, first, node.id);
        assert!(path.is_found());
    }
    assert!(store.auto_connect_spanning(floor).unwrap().is_empty());
}

#[test]
fn auto_connect_needs_two_nodes() {
    let (mut store, floor) = store_with_floor("GF");
    hall(&mut store, floor, 0.0, 0.0);
    let err = store.auto_connect_spanning(floor).unwrap_err();
    assert!(matches!(err, Error::NotEnoughNodes { found: 1, .. }));
    assert_eq!(err.category(), ErrorCategory::Infeasible);
}

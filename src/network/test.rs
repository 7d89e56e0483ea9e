use chrono::{TimeZone, Utc};
use geo::point;

use crate::network::error::NetworkError;
use crate::network::{EdgeId, RoadNetwork, Scan};
use crate::trajectory::TrajectoryPoint;

fn grid() -> RoadNetwork {
    // Three edges: two along the equator, one heading north from node 2.
    let a = (1, point! { x: 0.0, y: 0.0 });
    let b = (2, point! { x: 0.001, y: 0.0 });
    let c = (3, point! { x: 0.002, y: 0.0 });
    let d = (4, point! { x: 0.001, y: 0.001 });

    RoadNetwork::from_edges([(a, b), (b, c), (b, d)]).expect("Could not build network")
}

#[test]
fn nearest_edge_picks_the_closest() {
    let network = grid();

    // Slightly north of the midpoint of edge 1->2.
    let probe = point! { x: 0.0005, y: 0.00002 };
    let (edge, distance) = network
        .nearest_edge(&probe, 50.0)
        .expect("No edge within range");

    assert_eq!(edge, EdgeId::new(1, 2));
    assert!(distance < 5.0, "Projected distance too large: {distance}");
}

#[test]
fn nearest_edge_respects_the_radius() {
    let network = grid();

    // Tens of kilometres from every edge.
    let probe = point! { x: 0.5, y: 0.5 };
    assert!(network.nearest_edge(&probe, 100.0).is_none());
}

#[test_log::test]
fn match_points_leaves_out_of_range_points_unmatched() {
    let network = grid();
    let time = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();

    let mut points = vec![
        TrajectoryPoint::new(1, time, point! { x: 0.0005, y: 0.00001 }),
        TrajectoryPoint::new(1, time, point! { x: 0.9, y: 0.9 }),
    ];

    let matched = network.match_points(&mut points, 30.0);

    assert_eq!(matched, 1);
    assert_eq!(points[0].edge, Some(EdgeId::new(1, 2)));
    assert_eq!(points[1].edge, None);
}

#[test]
fn degenerate_entries_are_skipped() {
    let a = (1, point! { x: 0.0, y: 0.0 });
    let b = (2, point! { x: 0.001, y: 0.0 });
    let bad = (3, point! { x: 0.0, y: 120.0 });

    let network = RoadNetwork::from_edges([(a, a), (a, bad), (a, b), (a, b)])
        .expect("One valid edge remains");
    assert_eq!(network.size(), 1);

    let empty = RoadNetwork::from_edges([(a, a)]);
    assert!(matches!(empty, Err(NetworkError::EmptyNetwork)));
}

#[test]
fn attributes_fall_back_to_the_default() {
    let mut network = grid();
    let edge = EdgeId::new(1, 2);

    network
        .set_attribute(&edge, "highway", "residential")
        .expect("Edge exists");

    assert_eq!(network.attribute(&edge, "highway", "unknown"), "residential");

    // The reversed direction resolves onto the same undirected key.
    let reversed = EdgeId::new(2, 1);
    assert_eq!(network.attribute(&reversed, "highway", "unknown"), "residential");
    assert_eq!(network.attribute(&edge, "name", "unnamed"), "unnamed");

    let table = network.attribute_table(network.edges().collect::<Vec<_>>(), "highway", "unknown");
    assert_eq!(table.len(), 3);
    assert_eq!(table[&edge.canonical()], "residential");
    assert_eq!(table[&EdgeId::new(2, 3).canonical()], "unknown");

    let missing = EdgeId::new(7, 8);
    assert!(matches!(
        network.set_attribute(&missing, "highway", "service"),
        Err(NetworkError::UnknownEdge(_))
    ));
}

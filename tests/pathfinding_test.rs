//! Route planning tests

use proptest::prelude::*;
use rail_sim::simulation::{find_path, RailNetwork, Station, StationId, Track};

fn network_with(stations: &[&str], tracks: &[(&str, &str, &str, f64)]) -> RailNetwork {
    let mut network = RailNetwork::new();
    for (i, id) in stations.iter().enumerate() {
        network.register_station(Station::new(*id, format!("Station {}", id), i as f32, 0.0));
    }
    for &(id, source, target, cost) in tracks {
        assert!(network.register_track(Track::new(id, source, target, cost)));
    }
    network
}

fn track_ids(route: &rail_sim::simulation::Route) -> Vec<&str> {
    route.tracks.iter().map(|track| track.as_str()).collect()
}

#[test]
fn test_straight_line() {
    let network = network_with(
        &["A", "B", "C"],
        &[("t1", "A", "B", 10.0), ("t2", "B", "C", 10.0)],
    );

    let route = find_path(&network, &"A".into(), &"C".into()).unwrap();
    assert_eq!(track_ids(&route), vec!["t1", "t2"]);
    assert_eq!(route.total_cost, 20.0);
}

#[test]
fn test_tracks_are_bidirectional() {
    let network = network_with(
        &["A", "B", "C"],
        &[("t1", "A", "B", 10.0), ("t2", "B", "C", 10.0)],
    );

    let route = find_path(&network, &"C".into(), &"A".into()).unwrap();
    assert_eq!(track_ids(&route), vec!["t2", "t1"]);
    assert_eq!(route.total_cost, 20.0);
}

#[test]
fn test_diamond_picks_cheaper_side() {
    let network = network_with(
        &["A", "B", "C", "D"],
        &[
            ("ab", "A", "B", 10.0),
            ("bd", "B", "D", 10.0),
            ("ac", "A", "C", 50.0),
            ("cd", "C", "D", 50.0),
        ],
    );

    let route = find_path(&network, &"A".into(), &"D".into()).unwrap();
    assert_eq!(track_ids(&route), vec!["ab", "bd"]);
    assert_eq!(route.total_cost, 20.0);
}

#[test]
fn test_shortcut_beats_fewer_hops() {
    let network = network_with(
        &["A", "B", "C", "D"],
        &[
            ("direct", "A", "D", 100.0),
            ("ab", "A", "B", 1.0),
            ("bc", "B", "C", 1.0),
            ("cd", "C", "D", 1.0),
        ],
    );

    let route = find_path(&network, &"A".into(), &"D".into()).unwrap();
    assert_eq!(track_ids(&route), vec!["ab", "bc", "cd"]);
    assert_eq!(route.total_cost, 3.0);
}

#[test]
fn test_parallel_tracks_use_cheapest() {
    let network = network_with(
        &["A", "B"],
        &[("slow", "A", "B", 30.0), ("fast", "B", "A", 5.0)],
    );

    let route = find_path(&network, &"A".into(), &"B".into()).unwrap();
    assert_eq!(track_ids(&route), vec!["fast"]);
    assert_eq!(route.total_cost, 5.0);
}

#[test]
fn test_equal_cost_keeps_first_discovered() {
    let network = network_with(
        &["A", "B"],
        &[("first", "A", "B", 7.0), ("second", "A", "B", 7.0)],
    );

    let route = find_path(&network, &"A".into(), &"B".into()).unwrap();
    assert_eq!(track_ids(&route), vec!["first"]);
}

#[test]
fn test_same_station_is_empty_route() {
    let network = network_with(&["A", "B"], &[("t1", "A", "B", 10.0)]);

    let route = find_path(&network, &"A".into(), &"A".into()).unwrap();
    assert!(route.is_complete());
    assert_eq!(route.total_cost, 0.0);
}

#[test]
fn test_unreachable_station() {
    let network = network_with(&["A", "B", "Z"], &[("t1", "A", "B", 10.0)]);

    assert!(find_path(&network, &"A".into(), &"Z".into()).is_none());
    assert!(find_path(&network, &"A".into(), &"UNKNOWN".into()).is_none());
    assert!(find_path(&network, &"UNKNOWN".into(), &"A".into()).is_none());
}

#[test]
fn test_zero_cost_tracks() {
    let network = network_with(
        &["A", "B", "C"],
        &[("t1", "A", "B", 0.0), ("t2", "B", "C", 0.0)],
    );

    let route = find_path(&network, &"A".into(), &"C".into()).unwrap();
    assert_eq!(track_ids(&route), vec!["t1", "t2"]);
    assert_eq!(route.total_cost, 0.0);
}

/// All-pairs shortest distances by Floyd-Warshall
fn reference_distances(stations: usize, edges: &[(usize, usize, u32)]) -> Vec<Vec<Option<u64>>> {
    let mut dist = vec![vec![None; stations]; stations];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = Some(0);
    }
    for &(a, b, cost) in edges {
        let cost = cost as u64;
        for (x, y) in [(a, b), (b, a)] {
            if dist[x][y].map_or(true, |known| cost < known) {
                dist[x][y] = Some(cost);
            }
        }
    }
    for k in 0..stations {
        for i in 0..stations {
            for j in 0..stations {
                if let (Some(ik), Some(kj)) = (dist[i][k], dist[k][j]) {
                    if dist[i][j].map_or(true, |known| ik + kj < known) {
                        dist[i][j] = Some(ik + kj);
                    }
                }
            }
        }
    }
    dist
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, u32)>)> {
    (2usize..8).prop_flat_map(|stations| {
        let edge = (0..stations, 0..stations, 0u32..50);
        (Just(stations), prop::collection::vec(edge, 0..20))
    })
}

proptest! {
    #[test]
    fn prop_route_cost_is_optimal((stations, edges) in graph_strategy(), from in 0usize..8, to in 0usize..8) {
        let from = from % stations;
        let to = to % stations;

        let mut network = RailNetwork::new();
        for i in 0..stations {
            network.register_station(Station::new(format!("S{}", i), "", 0.0, 0.0));
        }
        for (i, &(a, b, cost)) in edges.iter().enumerate() {
            network.register_track(Track::new(format!("T{}", i), format!("S{}", a), format!("S{}", b), cost as f64));
        }

        let start = StationId::new(format!("S{}", from));
        let end = StationId::new(format!("S{}", to));
        let expected = reference_distances(stations, &edges)[from][to];

        match (find_path(&network, &start, &end), expected) {
            (None, None) => {}
            (Some(route), Some(cost)) => {
                prop_assert_eq!(route.total_cost, cost as f64);

                // The tracks must form a walk from start to end that adds up
                let mut at = start.clone();
                let mut sum = 0.0;
                for track_id in &route.tracks {
                    let track = network.track(track_id).unwrap();
                    at = track.other_end(&at).unwrap().clone();
                    sum += track.base_cost;
                }
                prop_assert_eq!(at, end);
                prop_assert_eq!(sum, route.total_cost);
            }
            (found, expected) => {
                prop_assert!(false, "planner returned {:?}, expected cost {:?}", found, expected);
            }
        }
    }
}

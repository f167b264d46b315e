//! Shortest-path route planning over the rail network
//!
//! Dijkstra with lazy deletion: stale heap entries are skipped through the
//! visited set instead of using decrease-key.

use ordered_float::OrderedFloat;
use std::collections::{HashMap, HashSet, VecDeque};

use super::min_heap::MinHeap;
use super::rail_network::RailNetwork;
use super::types::{StationId, TrackId};

/// An ordered list of tracks to traverse plus the total cost of the trip.
/// Owned by the train that requested it and consumed from the front.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub tracks: VecDeque<TrackId>,
    pub total_cost: f64,
}

impl Route {
    /// An empty route of zero cost, for trips that start at the destination
    pub fn empty() -> Self {
        Self {
            tracks: VecDeque::new(),
            total_cost: 0.0,
        }
    }

    pub fn next_track(&self) -> Option<&TrackId> {
        self.tracks.front()
    }

    pub fn is_complete(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.tracks.len()
    }
}

/// How a station was reached on the cheapest known path
struct Predecessor {
    station: StationId,
    via_track: TrackId,
}

/// Finds the minimum-cost route between two stations.
///
/// Every track is a bidirectional edge weighted by `base_cost`. Track costs
/// must be non-negative. Among equal-cost paths the first one discovered wins.
/// Returns `None` if `end` cannot be reached; `start == end` gives an empty
/// route.
pub fn find_path(network: &RailNetwork, start: &StationId, end: &StationId) -> Option<Route> {
    let mut distances: HashMap<StationId, f64> = HashMap::new();
    let mut previous: HashMap<StationId, Predecessor> = HashMap::new();
    let mut visited: HashSet<StationId> = HashSet::new();
    let mut queue: MinHeap<StationId, OrderedFloat<f64>> = MinHeap::new();

    distances.insert(start.clone(), 0.0);
    queue.push(start.clone(), OrderedFloat(0.0));

    while let Some(station) = queue.pop() {
        if station == *end {
            break;
        }
        if !visited.insert(station.clone()) {
            continue;
        }

        let Some(&station_distance) = distances.get(&station) else {
            continue;
        };

        for track in network.neighbors(&station) {
            let Some(other_side) = track.other_end(&station) else {
                continue;
            };
            if visited.contains(other_side) {
                continue;
            }

            let candidate = station_distance + track.base_cost;
            let improves = distances
                .get(other_side)
                .map_or(true, |&known| candidate < known);

            if improves {
                distances.insert(other_side.clone(), candidate);
                previous.insert(
                    other_side.clone(),
                    Predecessor {
                        station: station.clone(),
                        via_track: track.id.clone(),
                    },
                );
                queue.push(other_side.clone(), OrderedFloat(candidate));
            }
        }
    }

    let total_cost = *distances.get(end)?;

    // Walk back from the destination collecting the tracks used
    let mut tracks = VecDeque::new();
    let mut cursor = end;
    while cursor != start {
        let step = previous.get(cursor)?;
        tracks.push_front(step.via_track.clone());
        cursor = &step.station;
    }

    Some(Route { tracks, total_cost })
}

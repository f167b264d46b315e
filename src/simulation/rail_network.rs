//! Rail network graph
//!
//! Stations are nodes and tracks are undirected edges. A track registered as
//! source -> target shows up as a neighbour of both endpoints.

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use super::types::{Station, StationId, Track, TrackId};

/// Station and track storage for pathfinding and movement
#[derive(Default)]
pub struct RailNetwork {
    /// The underlying petgraph undirected graph
    graph: UnGraph<StationId, Track>,

    /// Maps station IDs to their node indices in the graph
    station_to_node: HashMap<StationId, NodeIndex>,

    /// Maps track IDs to their edge indices in the graph
    track_to_edge: HashMap<TrackId, EdgeIndex>,

    /// Storage for station data
    stations: HashMap<StationId, Station>,
}

impl RailNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a station to the network.
    /// Returns false if a station with the same ID already exists.
    pub fn register_station(&mut self, station: Station) -> bool {
        if self.station_to_node.contains_key(&station.id) {
            return false;
        }

        let node_index = self.graph.add_node(station.id.clone());
        self.station_to_node.insert(station.id.clone(), node_index);
        self.stations.insert(station.id.clone(), station);
        true
    }

    /// Adds a track between two registered stations.
    /// Returns false if either endpoint is unknown or the track ID is taken.
    pub fn register_track(&mut self, track: Track) -> bool {
        let (Some(&source_node), Some(&target_node)) = (
            self.station_to_node.get(&track.source),
            self.station_to_node.get(&track.target),
        ) else {
            return false;
        };

        if self.track_to_edge.contains_key(&track.id) {
            return false;
        }

        let track_id = track.id.clone();
        let edge_index = self.graph.add_edge(source_node, target_node, track);
        self.track_to_edge.insert(track_id, edge_index);
        true
    }

    /// Gets all tracks touching a station, in registration order.
    /// Unknown stations have no neighbours.
    pub fn neighbors(&self, station_id: &StationId) -> Vec<&Track> {
        let Some(&node_index) = self.station_to_node.get(station_id) else {
            return Vec::new();
        };

        // petgraph walks adjacency newest-first
        let mut edge_ids: Vec<EdgeIndex> =
            self.graph.edges(node_index).map(|edge| edge.id()).collect();
        edge_ids.sort();
        edge_ids.dedup();
        edge_ids
            .into_iter()
            .filter_map(|edge_id| self.graph.edge_weight(edge_id))
            .collect()
    }

    /// Gets a track by ID
    pub fn track(&self, track_id: &TrackId) -> Option<&Track> {
        let edge_index = self.track_to_edge.get(track_id)?;
        self.graph.edge_weight(*edge_index)
    }

    /// Gets a station by ID
    pub fn station(&self, station_id: &StationId) -> Option<&Station> {
        self.stations.get(station_id)
    }

    pub fn contains_station(&self, station_id: &StationId) -> bool {
        self.station_to_node.contains_key(station_id)
    }

    /// Gets all station IDs in registration order
    pub fn station_ids(&self) -> Vec<StationId> {
        self.graph
            .node_indices()
            .map(|node_index| self.graph[node_index].clone())
            .collect()
    }

    /// Get number of stations
    pub fn station_count(&self) -> usize {
        self.station_to_node.len()
    }

    /// Get number of tracks
    pub fn track_count(&self) -> usize {
        self.track_to_edge.len()
    }
}

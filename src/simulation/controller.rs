//! Main simulation controller that ties everything together
//!
//! Owns the network, the trains and the track locks, and steps every train
//! once per tick.

use std::collections::HashMap;

use super::events::{LogEventSink, SimEvent, SimEventSink};
use super::rail_network::RailNetwork;
use super::track_locks::TrackLockManager;
use super::train::{SimTrain, TrainUpdateResult};
use super::types::{Station, StationId, Track, TrainId, TrainSnapshot, TrainStatus};

/// Counters accumulated over the lifetime of a controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub ticks: u64,
    pub trains_created: u64,
    pub routes_planned: u64,
    pub routes_rejected: u64,
    pub moves: u64,
    pub waits: u64,
    pub arrivals: u64,
    pub faults: u64,
}

/// The main simulation controller
pub struct RailController {
    network: RailNetwork,

    /// Trains in creation order. Ticks visit them in this order, so it also
    /// decides who wins a track when two trains want it on the same tick.
    trains: Vec<SimTrain>,

    /// Maps train IDs to their index in `trains`
    train_index: HashMap<TrainId, usize>,

    locks: TrackLockManager,

    events: Box<dyn SimEventSink>,

    stats: SimulationStats,
}

impl Default for RailController {
    fn default() -> Self {
        Self::new(RailNetwork::new())
    }
}

impl RailController {
    /// Create a controller that logs its events
    pub fn new(network: RailNetwork) -> Self {
        Self::with_event_sink(network, Box::new(LogEventSink))
    }

    pub fn with_event_sink(network: RailNetwork, events: Box<dyn SimEventSink>) -> Self {
        Self {
            network,
            trains: Vec::new(),
            train_index: HashMap::new(),
            locks: TrackLockManager::new(),
            events,
            stats: SimulationStats::default(),
        }
    }

    pub fn network(&self) -> &RailNetwork {
        &self.network
    }

    /// Mutable access for setting up stations and tracks
    pub fn network_mut(&mut self) -> &mut RailNetwork {
        &mut self.network
    }

    pub fn locks(&self) -> &TrackLockManager {
        &self.locks
    }

    /// Lets outside holders reserve and release tracks
    pub fn locks_mut(&mut self) -> &mut TrackLockManager {
        &mut self.locks
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn tick_count(&self) -> u64 {
        self.stats.ticks
    }

    pub fn train_count(&self) -> usize {
        self.trains.len()
    }

    /// Add a new idle train at `start`.
    /// Returns false if the ID is taken. The start station is not validated.
    pub fn create_train(&mut self, id: impl Into<TrainId>, start: impl Into<StationId>) -> bool {
        let id = id.into();
        if self.train_index.contains_key(&id) {
            self.events.record(SimEvent::TrainRejected { train: id });
            return false;
        }

        let start = start.into();
        self.events.record(SimEvent::TrainCreated {
            train: id.clone(),
            station: start.clone(),
        });

        self.train_index.insert(id.clone(), self.trains.len());
        self.trains.push(SimTrain::new(id, start));
        self.stats.trains_created += 1;
        true
    }

    /// Send a train to a destination. Returns false if the train is unknown
    /// or the destination is unreachable from where it stands.
    pub fn command_destination(
        &mut self,
        id: impl Into<TrainId>,
        destination: impl Into<StationId>,
    ) -> bool {
        let id = id.into();
        let Some(&index) = self.train_index.get(&id) else {
            return false;
        };

        let planned =
            self.trains[index].set_destination(destination.into(), &self.network, self.events.as_mut());
        if planned {
            self.stats.routes_planned += 1;
        } else {
            self.stats.routes_rejected += 1;
        }
        planned
    }

    /// Main simulation tick: advance every train once, in creation order
    pub fn tick(&mut self) {
        self.stats.ticks += 1;

        for train in &mut self.trains {
            match train.advance(&self.network, &mut self.locks, self.events.as_mut()) {
                Ok(TrainUpdateResult::Moved) => self.stats.moves += 1,
                Ok(TrainUpdateResult::Arrived) => self.stats.arrivals += 1,
                Ok(TrainUpdateResult::Waiting) => self.stats.waits += 1,
                Ok(TrainUpdateResult::Idle) => {}
                Err(e) => {
                    self.stats.faults += 1;
                    self.events.record(SimEvent::Fault {
                        train: train.id().clone(),
                        reason: format!("{:#}", e),
                    });
                }
            }
        }
    }

    /// Public state of every train, in creation order
    pub fn snapshot(&self) -> Vec<TrainSnapshot> {
        self.trains.iter().map(SimTrain::snapshot).collect()
    }

    pub fn train_snapshot(&self, id: &TrainId) -> Option<TrainSnapshot> {
        let index = *self.train_index.get(id)?;
        self.trains.get(index).map(SimTrain::snapshot)
    }

    /// IDs of trains with nothing to do, in creation order
    pub fn idle_train_ids(&self) -> Vec<TrainId> {
        self.trains
            .iter()
            .filter(|train| train.status() == TrainStatus::Idle)
            .map(|train| train.id().clone())
            .collect()
    }

    /// Create the demo network: four stations around a junction at ST_02 with
    /// three trains already commanded to cross it
    pub fn create_demo() -> Self {
        Self::build_demo(RailController::new(RailNetwork::new()))
    }

    /// Internal helper to build the demo structure into an existing controller
    pub fn build_demo(mut controller: RailController) -> Self {
        let network = controller.network_mut();
        network.register_station(Station::new("ST_01", "Sector 1", 0.0, 0.0));
        network.register_station(Station::new("ST_02", "Sector 2", 10.0, 0.0));
        network.register_station(Station::new("ST_03", "Sector 3", 20.0, 0.0));
        network.register_station(Station::new("ST_04", "Sector 4", 10.0, 10.0));

        network.register_track(Track::new("TRK_101", "ST_01", "ST_02", 10.0));
        network.register_track(Track::new("TRK_102", "ST_02", "ST_03", 15.0));
        network.register_track(Track::new("TRK_103", "ST_02", "ST_04", 20.0));

        let orders = [
            ("TR_001", "ST_01", "ST_03"),
            ("TR_002", "ST_03", "ST_04"),
            ("TR_003", "ST_04", "ST_02"),
        ];
        for (train, start, destination) in orders {
            if controller.create_train(train, start) {
                controller.command_destination(train, destination);
            }
        }

        controller
    }
}

//! Train movement logic for the rail simulation
//!
//! A train plans a route, then advances at most one track per tick. It must
//! hold the lock on a track before moving over it, and hands locks off by
//! acquiring the next track before releasing the previous one.

use anyhow::{Context, Result};

use super::events::{SimEvent, SimEventSink};
use super::pathfinding::{find_path, Route};
use super::rail_network::RailNetwork;
use super::track_locks::TrackLockManager;
use super::types::{StationId, TrackId, TrainId, TrainSnapshot, TrainStatus};

/// Result of a train update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainUpdateResult {
    /// No destination set, nothing to do
    Idle,
    /// Next track is held by another train
    Waiting,
    /// Crossed one track
    Moved,
    /// Route finished, train is idle again
    Arrived,
}

impl TrainUpdateResult {
    /// Whether the update counts as success (moved or finished the route)
    pub fn made_progress(&self) -> bool {
        matches!(self, TrainUpdateResult::Moved | TrainUpdateResult::Arrived)
    }
}

/// Where a train is headed and how it gets there
#[derive(Debug, Clone)]
struct Journey {
    target: StationId,
    route: Route,
}

#[derive(Debug, Clone)]
enum TrainState {
    Idle,
    Waiting(Journey),
    Moving(Journey),
}

/// A train in the rail simulation
#[derive(Debug, Clone)]
pub struct SimTrain {
    id: TrainId,
    current: StationId,
    state: TrainState,
    /// Track whose lock this train holds, if any
    held_track: Option<TrackId>,
}

impl SimTrain {
    pub fn new(id: TrainId, start: StationId) -> Self {
        Self {
            id,
            current: start,
            state: TrainState::Idle,
            held_track: None,
        }
    }

    pub fn id(&self) -> &TrainId {
        &self.id
    }

    pub fn current_station(&self) -> &StationId {
        &self.current
    }

    pub fn status(&self) -> TrainStatus {
        match self.state {
            TrainState::Idle => TrainStatus::Idle,
            TrainState::Waiting(_) => TrainStatus::Waiting,
            TrainState::Moving(_) => TrainStatus::Moving,
        }
    }

    pub fn target(&self) -> Option<&StationId> {
        self.journey().map(|journey| &journey.target)
    }

    pub fn held_track(&self) -> Option<&TrackId> {
        self.held_track.as_ref()
    }

    /// Remaining route, if a destination is set
    pub fn route(&self) -> Option<&Route> {
        self.journey().map(|journey| &journey.route)
    }

    pub fn snapshot(&self) -> TrainSnapshot {
        TrainSnapshot {
            id: self.id.clone(),
            location: self.current.clone(),
            destination: self.target().cloned(),
            current_track: self.held_track.clone(),
            status: self.status(),
        }
    }

    fn journey(&self) -> Option<&Journey> {
        match &self.state {
            TrainState::Idle => None,
            TrainState::Waiting(journey) | TrainState::Moving(journey) => Some(journey),
        }
    }

    /// Takes the current journey out of the state, leaving the train idle
    fn take_journey(&mut self) -> Option<Journey> {
        match std::mem::replace(&mut self.state, TrainState::Idle) {
            TrainState::Idle => None,
            TrainState::Waiting(journey) | TrainState::Moving(journey) => Some(journey),
        }
    }

    /// Plan a route from the current station to `destination`.
    ///
    /// On success any previous journey is replaced and the train waits for
    /// its first move. A lock held from the previous journey is kept until the
    /// next handoff or until the new route finishes. Returns false and changes
    /// nothing if the destination is unreachable.
    pub fn set_destination(
        &mut self,
        destination: StationId,
        network: &RailNetwork,
        events: &mut dyn SimEventSink,
    ) -> bool {
        let Some(route) = find_path(network, &self.current, &destination) else {
            events.record(SimEvent::RouteNotFound {
                train: self.id.clone(),
                from: self.current.clone(),
                to: destination,
            });
            return false;
        };

        events.record(SimEvent::RoutePlanned {
            train: self.id.clone(),
            from: self.current.clone(),
            to: destination.clone(),
            total_cost: route.total_cost,
            tracks: route.remaining(),
        });

        self.state = TrainState::Waiting(Journey {
            target: destination,
            route,
        });
        true
    }

    /// Try to advance one track along the route.
    ///
    /// Returns an error, without touching the train or the lock table, if the
    /// next track is unknown to the network or does not start at the current
    /// station.
    pub fn advance(
        &mut self,
        network: &RailNetwork,
        locks: &mut TrackLockManager,
        events: &mut dyn SimEventSink,
    ) -> Result<TrainUpdateResult> {
        let Some(journey) = self.journey() else {
            events.record(SimEvent::NoRoute {
                train: self.id.clone(),
            });
            return Ok(TrainUpdateResult::Idle);
        };

        let Some(next_track) = journey.route.next_track().cloned() else {
            self.finish(locks, events);
            return Ok(TrainUpdateResult::Arrived);
        };

        let track = network
            .track(&next_track)
            .with_context(|| format!("track {} on route is not in the network", next_track))?;
        let next_station = track
            .other_end(&self.current)
            .with_context(|| {
                format!(
                    "track {} does not connect to station {}",
                    next_track, self.current
                )
            })?
            .clone();

        if !locks.try_acquire(&next_track, &self.id) {
            events.record(SimEvent::Blocked {
                train: self.id.clone(),
                holder: locks.holder(&next_track).cloned(),
                track: next_track,
            });
            if let Some(journey) = self.take_journey() {
                self.state = TrainState::Waiting(journey);
            }
            return Ok(TrainUpdateResult::Waiting);
        }

        self.current = next_station;
        if let Some(mut journey) = self.take_journey() {
            journey.route.tracks.pop_front();
            self.state = TrainState::Moving(journey);
        }

        // Release the old lock only now that the new one is held
        if let Some(previous) = self.held_track.replace(next_track.clone()) {
            if previous != next_track {
                locks.release(&previous, &self.id);
            }
        }

        events.record(SimEvent::Moved {
            train: self.id.clone(),
            track: next_track,
            station: self.current.clone(),
        });
        Ok(TrainUpdateResult::Moved)
    }

    /// Route complete: drop the held lock and go idle
    fn finish(&mut self, locks: &mut TrackLockManager, events: &mut dyn SimEventSink) {
        if let Some(track) = self.held_track.take() {
            locks.release(&track, &self.id);
        }
        self.state = TrainState::Idle;

        events.record(SimEvent::Arrived {
            train: self.id.clone(),
            station: self.current.clone(),
        });
    }
}

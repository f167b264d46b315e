//! Simulation events and the sinks that receive them
//!
//! Trains and the controller report what happens through a `SimEventSink`
//! instead of logging directly. Nothing in the simulation depends on an event
//! being observed.

use log::{debug, info, warn};

use super::types::{StationId, TrackId, TrainId};

/// Something that happened during setup or a tick
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    TrainCreated {
        train: TrainId,
        station: StationId,
    },
    /// A train with this ID already exists
    TrainRejected {
        train: TrainId,
    },
    RoutePlanned {
        train: TrainId,
        from: StationId,
        to: StationId,
        total_cost: f64,
        tracks: usize,
    },
    RouteNotFound {
        train: TrainId,
        from: StationId,
        to: StationId,
    },
    Moved {
        train: TrainId,
        track: TrackId,
        station: StationId,
    },
    /// The next track is held by someone else
    Blocked {
        train: TrainId,
        track: TrackId,
        holder: Option<TrainId>,
    },
    Arrived {
        train: TrainId,
        station: StationId,
    },
    /// Advanced with no destination set
    NoRoute {
        train: TrainId,
    },
    Fault {
        train: TrainId,
        reason: String,
    },
}

/// Receiver for simulation events
pub trait SimEventSink {
    fn record(&mut self, event: SimEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

impl SimEventSink for NullEventSink {
    fn record(&mut self, _event: SimEvent) {}
}

/// Collects events in order, mostly for tests
impl SimEventSink for Vec<SimEvent> {
    fn record(&mut self, event: SimEvent) {
        self.push(event);
    }
}

/// Forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl SimEventSink for LogEventSink {
    fn record(&mut self, event: SimEvent) {
        match event {
            SimEvent::TrainCreated { train, station } => {
                info!("[Train {}] created @ {}", train, station);
            }
            SimEvent::TrainRejected { train } => {
                warn!("Cannot create pre-existing train {}", train);
            }
            SimEvent::RoutePlanned {
                train,
                from,
                to,
                total_cost,
                tracks,
            } => {
                info!(
                    "[Train {}] ready {}->{} @ {} ({} tracks)",
                    train, from, to, total_cost, tracks
                );
            }
            SimEvent::RouteNotFound { train, from, to } => {
                warn!("[Train {}] failed to find path {}->{}", train, from, to);
            }
            SimEvent::Moved {
                train,
                track,
                station,
            } => {
                info!("[Train {}] move via {} to {}", train, track, station);
            }
            SimEvent::Blocked {
                train,
                track,
                holder,
            } => match holder {
                Some(holder) => debug!("[Train {}] wait: {} held by {}", train, track, holder),
                None => debug!("[Train {}] wait: {} unavailable", train, track),
            },
            SimEvent::Arrived { train, station } => {
                info!("[Train {}] idle @ {}: finished", train, station);
            }
            SimEvent::NoRoute { train } => {
                debug!("[Train {}] no destination set", train);
            }
            SimEvent::Fault { train, reason } => {
                warn!("[Train {}] fault: {}", train, reason);
            }
        }
    }
}

//! Rail simulation core
//!
//! Trains move over a shared graph of stations and tracks, one track per tick,
//! and each track can only be occupied by one train at a time. Nothing here
//! prints or sleeps; the driver decides when to tick and how to show state.

mod controller;
mod events;
mod min_heap;
mod pathfinding;
mod rail_network;
mod track_locks;
mod train;
mod types;

pub use controller::{RailController, SimulationStats};
pub use events::{LogEventSink, NullEventSink, SimEvent, SimEventSink};
pub use min_heap::MinHeap;
pub use pathfinding::{find_path, Route};
pub use rail_network::RailNetwork;
pub use track_locks::{TrackLock, TrackLockManager};
pub use train::{SimTrain, TrainUpdateResult};
pub use types::{
    Position, Station, StationId, Track, TrackId, TrainId, TrainSnapshot, TrainStatus,
};

//! Core types for the rail simulation
//!
//! Identifiers, stations, tracks and the read-only train snapshot.

use std::fmt;

/// Declares a string-backed identifier newtype.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// A wrapper type for station IDs
    StationId
);

string_id!(
    /// A wrapper type for track IDs
    TrackId
);

string_id!(
    /// A wrapper type for train IDs. Also used as the holder of a track lock.
    TrainId
);

/// A 2D position on the map. Only used for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A station in the rail network
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub position: Position,
}

impl Station {
    pub fn new(id: impl Into<StationId>, name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: Position::new(x, y),
        }
    }
}

/// A track connecting two stations.
///
/// `source` and `target` are labels only: a track can be traversed in either
/// direction. `base_cost` must be non-negative; this is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub source: StationId,
    pub target: StationId,
    pub base_cost: f64,
}

impl Track {
    pub fn new(
        id: impl Into<TrackId>,
        source: impl Into<StationId>,
        target: impl Into<StationId>,
        base_cost: f64,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            base_cost,
        }
    }

    /// Returns the endpoint on the far side of `station`, or `None` if the
    /// track does not touch `station` at all
    pub fn other_end(&self, station: &StationId) -> Option<&StationId> {
        if self.source == *station {
            Some(&self.target)
        } else if self.target == *station {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// Public status of a train
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainStatus {
    /// No destination, no route, no lock
    Idle,
    /// Has a route but did not advance on the last tick (or has not ticked yet)
    Waiting,
    /// Advanced along its route on the last tick
    Moving,
}

impl fmt::Display for TrainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrainStatus::Idle => "IDLE",
            TrainStatus::Waiting => "WAITING",
            TrainStatus::Moving => "MOVING",
        };
        f.write_str(label)
    }
}

/// Read-only view of a train, produced on demand
#[derive(Debug, Clone, PartialEq)]
pub struct TrainSnapshot {
    pub id: TrainId,
    pub location: StationId,
    pub destination: Option<StationId>,
    pub current_track: Option<TrackId>,
    pub status: TrainStatus,
}

//! Exclusive track reservations
//!
//! A track can be held by at most one train. This table is the only state
//! shared between trains and it is only changed through `try_acquire` and
//! `release`.

use std::collections::HashMap;
use std::time::Instant;

use super::types::{TrackId, TrainId};

/// A reservation of one track by one holder
#[derive(Debug, Clone)]
pub struct TrackLock {
    pub holder: TrainId,
    pub acquired_at: Instant,
}

/// Reservation table keyed by track ID
#[derive(Debug, Default)]
pub struct TrackLockManager {
    locks: HashMap<TrackId, TrackLock>,
}

impl TrackLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self, track_id: &TrackId) -> bool {
        self.locks.contains_key(track_id)
    }

    /// Gets the current holder of a track, if any
    pub fn holder(&self, track_id: &TrackId) -> Option<&TrainId> {
        self.locks.get(track_id).map(|lock| &lock.holder)
    }

    pub fn lock(&self, track_id: &TrackId) -> Option<&TrackLock> {
        self.locks.get(track_id)
    }

    /// Try to reserve a track.
    /// Succeeds without side effects if `holder` already has it, acquires it
    /// if free, and fails if someone else holds it.
    pub fn try_acquire(&mut self, track_id: &TrackId, holder: &TrainId) -> bool {
        match self.locks.get(track_id) {
            Some(lock) => lock.holder == *holder,
            None => {
                self.locks.insert(
                    track_id.clone(),
                    TrackLock {
                        holder: holder.clone(),
                        acquired_at: Instant::now(),
                    },
                );
                true
            }
        }
    }

    /// Release a track.
    /// Only the current holder can release; anything else is a no-op that
    /// returns false.
    pub fn release(&mut self, track_id: &TrackId, holder: &TrainId) -> bool {
        match self.locks.get(track_id) {
            Some(lock) if lock.holder == *holder => {
                self.locks.remove(track_id);
                true
            }
            _ => false,
        }
    }

    /// Number of tracks currently held
    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }

    /// All tracks held by `holder`, sorted by track ID
    pub fn locks_held_by(&self, holder: &TrainId) -> Vec<TrackId> {
        let mut held: Vec<TrackId> = self
            .locks
            .iter()
            .filter(|(_, lock)| lock.holder == *holder)
            .map(|(track_id, _)| track_id.clone())
            .collect();
        held.sort();
        held
    }
}

//! Rail Simulation Library
//!
//! A discrete-time rail network where trains share single-occupancy tracks.

pub mod simulation;

//! Parking Lot Simulation Library
//!
//! A concurrent parking lot simulation: bounded slot pool, single-lane gate
//! and tick-polled collision avoidance, runnable headless from the CLI.

pub mod simulation;

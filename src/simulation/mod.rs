//! Parking lot simulation core
//!
//! Vehicles compete for a bounded pool of slots, queue while the lot is
//! full, park for a random dwell time and leave through a single-lane gate.
//! Each vehicle runs on its own thread; presentation only reads snapshots.

mod config;
mod gate;
mod layout;
mod monitor;
mod movement;
mod path;
mod registry;
pub mod report;
mod slot_pool;
mod snapshot;
mod stats;
mod types;
mod vehicle;
mod world;

pub use config::{
    DelayRange, LayoutConfig, SimConfig, DEFAULT_COLUMNS, DEFAULT_ROWS, DEFAULT_VEHICLE_COUNT,
};
pub use gate::{Gate, GateGuard};
pub use layout::{LotLayout, SlotSpec};
pub use monitor::{LogMonitor, NoOpMonitor, SimulationMonitor};
pub use movement::{blocks, crowds, Motion, StepOutcome};
pub use path::{Path, PathSegment};
pub use registry::VehicleRegistry;
pub use slot_pool::{PoolSnapshot, SimSlot, SlotLease, SlotPool};
pub use snapshot::{SimSnapshot, VehicleSnapshot};
pub use stats::SimulationStats;
pub use types::{Axis, Heading, Position, Rect, SlotId, VehicleId, VehicleState};
pub use vehicle::SimVehicle;
pub use world::SimWorld;

//! Read-only views of the simulation for presentation

use std::time::Duration;

use super::slot_pool::PoolSnapshot;
use super::stats::SimulationStats;
use super::types::{Axis, Position, SlotId, VehicleId, VehicleState};

/// A vehicle as seen at snapshot time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub position: Position,
    /// Axis the vehicle last moved along; `None` while parked
    pub lane: Option<Axis>,
    pub state: VehicleState,
    pub slot: Option<SlotId>,
}

/// Whole-simulation view. Each part is consistent on its own (all vehicle
/// positions come from one instant); parts are taken one after another, not
/// under a single lock.
#[derive(Debug, Clone, PartialEq)]
pub struct SimSnapshot {
    pub elapsed: Duration,
    /// Vehicles on the map, ordered by id
    pub vehicles: Vec<VehicleSnapshot>,
    pub pool: PoolSnapshot,
    pub gate_holder: Option<VehicleId>,
    pub stats: SimulationStats,
}

impl SimSnapshot {
    pub fn count_in(&self, state: VehicleState) -> usize {
        self.vehicles.iter().filter(|v| v.state == state).count()
    }
}

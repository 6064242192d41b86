//! Observers of the simulation
//!
//! Vehicle tasks report lifecycle events to a `SimulationMonitor` shared by
//! every thread. Callbacks run on the vehicle's own thread and must be
//! cheap; gate callbacks run while the gate is held.

use log::{debug, info, trace};

use super::movement::StepOutcome;
use super::types::{Position, SlotId, VehicleId, VehicleState};

/// Trait for observing a running simulation
pub trait SimulationMonitor: Send + Sync {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when a vehicle moves from one lifecycle state to the next.
    fn on_state_change(&self, _vehicle: VehicleId, _from: VehicleState, _to: VehicleState) {}
    /// Called when a vehicle finds the lot full and starts waiting for a slot.
    fn on_slot_wait(&self, _vehicle: VehicleId) {}
    /// Called after a vehicle was granted a slot.
    fn on_slot_acquired(&self, _vehicle: VehicleId, _slot: SlotId, _occupied: usize) {}
    /// Called after a vehicle gave its slot back.
    fn on_slot_released(&self, _vehicle: VehicleId, _slot: SlotId, _occupied: usize) {}
    /// Called once a vehicle holds the gate.
    fn on_gate_entered(&self, _vehicle: VehicleId) {}
    /// Called right before a vehicle lets go of the gate.
    fn on_gate_left(&self, _vehicle: VehicleId) {}
    /// Called after every movement tick that did not finish a segment.
    fn on_step(&self, _vehicle: VehicleId, _outcome: StepOutcome, _position: Position) {}
}

/// A monitor that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl SimulationMonitor for NoOpMonitor {
    fn name(&self) -> &str {
        "NoOpMonitor"
    }
}

/// Logs lifecycle events through the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMonitor;

impl SimulationMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_state_change(&self, vehicle: VehicleId, from: VehicleState, to: VehicleState) {
        match to {
            VehicleState::Queued => info!("Vehicle {vehicle} arrives at the parking lot"),
            VehicleState::Parked => info!("Vehicle {vehicle} is parked"),
            VehicleState::Departed => info!("Vehicle {vehicle} has left"),
            _ => debug!("Vehicle {vehicle}: {from} -> {to}"),
        }
    }

    fn on_slot_wait(&self, vehicle: VehicleId) {
        info!("Vehicle {vehicle} is blocked and waits for a free slot");
    }

    fn on_slot_acquired(&self, vehicle: VehicleId, slot: SlotId, occupied: usize) {
        info!("Vehicle {vehicle} takes slot {slot} ({occupied} occupied)");
    }

    fn on_slot_released(&self, vehicle: VehicleId, slot: SlotId, occupied: usize) {
        info!("Vehicle {vehicle} frees slot {slot} ({occupied} occupied)");
    }

    fn on_gate_entered(&self, vehicle: VehicleId) {
        debug!("Vehicle {vehicle} holds the gate");
    }

    fn on_step(&self, vehicle: VehicleId, outcome: StepOutcome, position: Position) {
        if outcome == StepOutcome::Held {
            trace!(
                "Vehicle {vehicle} held at ({:.1}, {:.1})",
                position.x,
                position.y
            );
        }
    }
}

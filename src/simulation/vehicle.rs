//! Vehicles and their lifecycle
//!
//! A vehicle's position, lane, state and held slot sit behind one
//! per-vehicle lock. Only the vehicle's own task writes them; other vehicles
//! read the position for collision checks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use super::monitor::SimulationMonitor;
use super::registry::VehicleRegistry;
use super::snapshot::VehicleSnapshot;
use super::types::{Axis, Position, SlotId, VehicleId, VehicleState};
use super::world::SimWorld;

#[derive(Debug)]
struct VehicleInner {
    position: Position,
    /// Axis of the last movement, `None` before the first step and while
    /// parked
    lane: Option<Axis>,
    state: VehicleState,
    slot: Option<SlotId>,
}

/// A vehicle in the parking simulation
#[derive(Debug)]
pub struct SimVehicle {
    id: VehicleId,
    inner: Mutex<VehicleInner>,
}

impl SimVehicle {
    pub fn new(id: VehicleId, position: Position) -> Self {
        Self {
            id,
            inner: Mutex::new(VehicleInner {
                position,
                lane: None,
                state: VehicleState::Arriving,
                slot: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VehicleInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.lock().position
    }

    pub fn state(&self) -> VehicleState {
        self.lock().state
    }

    pub fn slot(&self) -> Option<SlotId> {
        self.lock().slot
    }

    pub fn lane(&self) -> Option<Axis> {
        self.lock().lane
    }

    /// Move by `delta` along `axis`, returning the new position
    pub fn shift(&self, axis: Axis, delta: f32) -> Position {
        let mut inner = self.lock();
        inner.position = inner.position.shifted(axis, delta);
        inner.lane = Some(axis);
        inner.position
    }

    pub fn snapshot(&self) -> VehicleSnapshot {
        let inner = self.lock();
        VehicleSnapshot {
            id: self.id,
            position: inner.position,
            lane: inner.lane,
            state: inner.state,
            slot: inner.slot,
        }
    }

    fn transition(&self, to: VehicleState, monitor: &dyn SimulationMonitor) {
        let from = {
            let mut inner = self.lock();
            if to == VehicleState::Parked {
                inner.lane = None;
            }
            std::mem::replace(&mut inner.state, to)
        };
        monitor.on_state_change(self.id, from, to);
    }

    fn set_slot(&self, slot: Option<SlotId>) {
        self.lock().slot = slot;
    }

    /// Run the whole lifecycle: arrive, queue, enter, park, dwell, leave,
    /// exit. Blocks the calling thread until the vehicle has departed.
    pub fn drive(self: &Arc<Self>, world: &SimWorld, dwell: Duration) {
        let layout = world.layout();
        let motion = world.motion();
        let registry = world.registry();
        let monitor = world.monitor();

        // Arriving -> Queued: join the map once the spawn point is clear
        while !registry.try_admit(self, motion.min_lane_distance) {
            thread::sleep(motion.tick_interval);
        }
        let on_map = OnMap {
            registry,
            id: self.id,
        };
        self.transition(VehicleState::Queued, monitor);
        motion.follow(self, &layout.queue, registry, monitor);

        // Queued -> EnteringGate: the simulation's blocking point
        let lease = match world.pool().try_acquire() {
            Some(lease) => lease,
            None => {
                monitor.on_slot_wait(self.id);
                world.pool().acquire()
            }
        };
        self.set_slot(Some(lease.id));
        monitor.on_slot_acquired(self.id, lease.id, lease.occupied);
        self.transition(VehicleState::EnteringGate, monitor);

        let gate = world.gate().enter(self.id);
        monitor.on_gate_entered(self.id);
        motion.follow(self, &layout.entrance, registry, monitor);
        monitor.on_gate_left(self.id);
        drop(gate);

        self.transition(VehicleState::Parking, monitor);
        motion.follow(self, &lease.parking, registry, monitor);

        self.transition(VehicleState::Parked, monitor);
        thread::sleep(dwell);

        self.transition(VehicleState::LeavingSlot, monitor);
        motion.follow(self, &lease.leaving, registry, monitor);
        let slot = lease.id;
        let occupied = world.pool().release(lease);
        self.set_slot(None);
        monitor.on_slot_released(self.id, slot, occupied);

        self.transition(VehicleState::ExitingGate, monitor);
        let gate = world.gate().enter(self.id);
        monitor.on_gate_entered(self.id);
        motion.follow(self, &layout.exit, registry, monitor);
        monitor.on_gate_left(self.id);
        drop(gate);
        motion.follow(self, &layout.departure, registry, monitor);

        self.transition(VehicleState::Departed, monitor);
        drop(on_map);
    }
}

/// Membership of a driving vehicle; leaves the registry when dropped, so a
/// vehicle thread that unwinds does not stay on the map blocking its lane
struct OnMap<'a> {
    registry: &'a VehicleRegistry,
    id: VehicleId,
}

impl Drop for OnMap<'_> {
    fn drop(&mut self) {
        self.registry.remove(self.id);
    }
}

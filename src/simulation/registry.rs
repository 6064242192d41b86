//! Set of vehicles currently on the map
//!
//! The registry lock guards membership. Admissions and movement steps also
//! hold it across their check and the position update, so a step always
//! decides on positions no other vehicle can change before it lands.
//! Lock order is registry, then vehicle.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::snapshot::VehicleSnapshot;
use super::types::{Axis, Position, VehicleId};
use super::vehicle::SimVehicle;

#[derive(Debug, Default)]
pub struct VehicleRegistry {
    vehicles: Mutex<HashMap<VehicleId, Arc<SimVehicle>>>,
}

impl VehicleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<VehicleId, Arc<SimVehicle>>> {
        self.vehicles.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a vehicle unconditionally
    pub fn insert(&self, vehicle: Arc<SimVehicle>) {
        self.lock().insert(vehicle.id(), vehicle);
    }

    /// Add `vehicle` only if no member on its lane is closer than
    /// `clearance`, in either direction. Check and insert are atomic with
    /// respect to other admissions.
    pub fn try_admit(&self, vehicle: &Arc<SimVehicle>, clearance: f32) -> bool {
        let mut vehicles = self.lock();
        let spawn = vehicle.position();
        let crowded = vehicles.values().any(|other| {
            let p = other.position();
            p.x == spawn.x && (p.y - spawn.y).abs() < clearance
        });
        if crowded {
            return false;
        }
        vehicles.insert(vehicle.id(), Arc::clone(vehicle));
        true
    }

    pub fn remove(&self, id: VehicleId) -> Option<Arc<SimVehicle>> {
        self.lock().remove(&id)
    }

    pub fn contains(&self, id: VehicleId) -> bool {
        self.lock().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshots of every member, read under the registry lock so no
    /// vehicle moves in between
    pub fn snapshots(&self) -> Vec<VehicleSnapshot> {
        self.lock()
            .values()
            .map(|vehicle| vehicle.snapshot())
            .collect()
    }

    /// Shift `mover` by `delta` along `axis` unless `blocked` holds for the
    /// position of any other member. Returns whether the vehicle moved.
    pub fn step_unless(
        &self,
        mover: &SimVehicle,
        axis: Axis,
        delta: f32,
        blocked: impl Fn(Position) -> bool,
    ) -> bool {
        let vehicles = self.lock();
        let held = vehicles
            .values()
            .filter(|other| other.id() != mover.id())
            .any(|other| blocked(other.position()));
        if !held {
            mover.shift(axis, delta);
        }
        !held
    }
}

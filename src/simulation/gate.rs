//! Single-lane gate shared by entering and leaving vehicles

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use super::types::VehicleId;

/// Binary mutual exclusion over the driveway. Waiters are woken one at a
/// time in no particular order.
#[derive(Debug, Default)]
pub struct Gate {
    holder: Mutex<Option<VehicleId>>,
    freed: Condvar,
}

/// Possession of the gate; dropping it opens the gate for the next vehicle
#[derive(Debug)]
#[must_use = "the gate is released as soon as the guard is dropped"]
pub struct GateGuard<'a> {
    gate: &'a Gate,
    vehicle: VehicleId,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<VehicleId>> {
        self.holder.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until the gate is free, then take it
    pub fn enter(&self, vehicle: VehicleId) -> GateGuard<'_> {
        let mut holder = self.lock();
        while holder.is_some() {
            holder = self
                .freed
                .wait(holder)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *holder = Some(vehicle);
        GateGuard {
            gate: self,
            vehicle,
        }
    }

    /// Vehicle currently crossing, if any
    pub fn holder(&self) -> Option<VehicleId> {
        *self.lock()
    }
}

impl GateGuard<'_> {
    pub fn vehicle(&self) -> VehicleId {
        self.vehicle
    }
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        let mut holder = self.gate.lock();
        debug_assert_eq!(*holder, Some(self.vehicle));
        *holder = None;
        self.gate.freed.notify_one();
    }
}

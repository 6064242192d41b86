//! Simulation statistics

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters of a simulation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub total_vehicles_spawned: usize,
    pub total_vehicles_departed: usize,
    pub peak_occupied: usize,
}

impl SimulationStats {
    /// Vehicles spawned but not yet departed
    pub fn active_vehicles(&self) -> usize {
        self.total_vehicles_spawned - self.total_vehicles_departed
    }

    pub fn completion_rate(&self) -> f32 {
        if self.total_vehicles_spawned > 0 {
            self.total_vehicles_departed as f32 / self.total_vehicles_spawned as f32 * 100.0
        } else {
            0.0
        }
    }
}

/// Shared counters updated by vehicle threads
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    spawned: AtomicUsize,
    departed: AtomicUsize,
}

impl StatsCounters {
    pub(crate) fn record_spawn(&self) {
        self.spawned.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_departure(&self) {
        self.departed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn read(&self, peak_occupied: usize) -> SimulationStats {
        let total_vehicles_departed = self.departed.load(Ordering::Relaxed);
        SimulationStats {
            // departures are recorded after spawns, read them first
            total_vehicles_spawned: self
                .spawned
                .load(Ordering::Relaxed)
                .max(total_vehicles_departed),
            total_vehicles_departed,
            peak_occupied,
        }
    }
}

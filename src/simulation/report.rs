//! Terminal presentation of simulation snapshots
//!
//! Only reads `SimSnapshot`; never touches live simulation state.

use std::fmt::Write;

use super::snapshot::SimSnapshot;
use super::types::VehicleState;

/// Render a summary of the snapshot
pub fn summary(snapshot: &SimSnapshot) -> String {
    let mut out = String::new();
    let pool = &snapshot.pool;
    let _ = writeln!(out, "=== Parking Simulation Summary ===");
    let _ = writeln!(out, "Time: {:.2}s", snapshot.elapsed.as_secs_f32());
    let _ = writeln!(
        out,
        "Occupied: {}/{} (peak {}), waiting for a slot: {}",
        pool.occupied, pool.capacity, pool.peak_occupied, pool.waiting
    );
    let _ = writeln!(
        out,
        "Gate: {}",
        snapshot
            .gate_holder
            .map_or_else(|| "open".to_string(), |id| format!("vehicle {id}"))
    );
    let _ = writeln!(
        out,
        "Vehicles: spawned={}, departed={}, on map={}",
        snapshot.stats.total_vehicles_spawned,
        snapshot.stats.total_vehicles_departed,
        snapshot.vehicles.len()
    );
    let _ = writeln!(
        out,
        "  queued={}, parking={}, parked={}, leaving={}",
        snapshot.count_in(VehicleState::Queued),
        snapshot.count_in(VehicleState::Parking),
        snapshot.count_in(VehicleState::Parked),
        snapshot.count_in(VehicleState::LeavingSlot),
    );
    out
}

/// Render the lot as one line per strip; `#` is an occupied slot
pub fn lot_map(snapshot: &SimSnapshot, columns: usize) -> String {
    let mut out = String::new();
    for (strip, slots) in snapshot.pool.available.chunks(columns.max(1)).enumerate() {
        let cells: String = slots
            .iter()
            .map(|available| if *available { "[ ]" } else { "[#]" })
            .collect();
        let _ = writeln!(out, "strip {}: {}", strip + 1, cells);
    }
    out
}

/// Print summary and lot map to stdout
pub fn print_summary(snapshot: &SimSnapshot, columns: usize) {
    print!("{}", summary(snapshot));
    print!("{}", lot_map(snapshot, columns));
    println!();
}

#![allow(dead_code)]

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use parking_sim::simulation::{DelayRange, LotLayout, SimConfig, SlotPool};

/// Configuration with coarse steps and fast ticks so full runs finish
/// quickly. Every lot coordinate is a multiple of the step size.
pub fn fast_config(rows: usize, columns: usize, vehicles: usize) -> SimConfig {
    SimConfig {
        rows,
        columns,
        vehicle_count: vehicles,
        spawn: DelayRange::fixed(0),
        dwell: DelayRange::fixed(20),
        step_size: 5.0,
        tick_interval: Duration::from_millis(1),
        min_lane_distance: 30.0,
        seed: Some(42),
        ..SimConfig::default()
    }
}

pub fn pool_with_capacity(rows: usize, columns: usize) -> SlotPool {
    SlotPool::from_layout(&LotLayout::new(&fast_config(rows, columns, 0)))
}

/// Run `f` on a new thread and wait at most `timeout` for its result
pub fn with_timeout<T, F>(timeout: Duration, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(timeout)
        .unwrap_or_else(|_| panic!("did not finish within {timeout:?}"))
}

//! Simulation context and driver
//!
//! `SimWorld` owns everything vehicles share: the slot pool, the gate, the
//! registry, the layout and the monitor. Vehicle threads hold it through an
//! `Arc`; there is no global state.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::SimConfig;
use super::gate::Gate;
use super::layout::LotLayout;
use super::monitor::{LogMonitor, SimulationMonitor};
use super::movement::Motion;
use super::registry::VehicleRegistry;
use super::slot_pool::SlotPool;
use super::snapshot::SimSnapshot;
use super::stats::{SimulationStats, StatsCounters};
use super::types::VehicleId;
use super::vehicle::SimVehicle;

/// The parking simulation
pub struct SimWorld {
    config: SimConfig,
    layout: LotLayout,
    motion: Motion,
    pool: SlotPool,
    gate: Gate,
    registry: VehicleRegistry,
    stats: StatsCounters,
    monitor: Arc<dyn SimulationMonitor>,
    started: Instant,
}

impl SimWorld {
    /// Create a world that logs lifecycle events
    pub fn new(config: SimConfig) -> Result<Self> {
        Self::with_monitor(config, Arc::new(LogMonitor))
    }

    /// Create a world reporting to `monitor`. Fails, naming the parameter,
    /// if the configuration is invalid.
    pub fn with_monitor(config: SimConfig, monitor: Arc<dyn SimulationMonitor>) -> Result<Self> {
        config.validate()?;
        let layout = LotLayout::new(&config);
        let pool = SlotPool::from_layout(&layout);
        Ok(Self {
            motion: Motion::from_config(&config),
            layout,
            pool,
            gate: Gate::new(),
            registry: VehicleRegistry::new(),
            stats: StatsCounters::default(),
            monitor,
            config,
            started: Instant::now(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn layout(&self) -> &LotLayout {
        &self.layout
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn pool(&self) -> &SlotPool {
        &self.pool
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn registry(&self) -> &VehicleRegistry {
        &self.registry
    }

    pub fn monitor(&self) -> &dyn SimulationMonitor {
        self.monitor.as_ref()
    }

    /// Start one vehicle on its own thread. The handle finishes once the
    /// vehicle has departed. The vehicle counts as spawned once its thread
    /// runs.
    pub fn spawn_vehicle(self: &Arc<Self>, id: VehicleId, dwell: Duration) -> Result<JoinHandle<()>> {
        let vehicle = Arc::new(SimVehicle::new(id, self.layout.spawn_point));
        let world = Arc::clone(self);
        thread::Builder::new()
            .name(format!("vehicle-{id}"))
            .spawn(move || {
                world.stats.record_spawn();
                vehicle.drive(&world, dwell);
                world.stats.record_departure();
            })
            .with_context(|| format!("Failed to spawn thread for vehicle {id}"))
    }

    /// Spawn `vehicle_count` vehicles at random intervals and wait until all
    /// of them have left
    pub fn run(self: &Arc<Self>) -> Result<SimulationStats> {
        self.run_with(Self::spawn_vehicle)
    }

    /// `run` with a custom way of starting vehicles. If starting one fails,
    /// no further vehicles are spawned; those already on their way are
    /// joined before the error is returned.
    fn run_with<S>(self: &Arc<Self>, mut spawn: S) -> Result<SimulationStats>
    where
        S: FnMut(&Arc<Self>, VehicleId, Duration) -> Result<JoinHandle<()>>,
    {
        let count = self.config.vehicle_count;
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        info!("=== SPAWNING VEHICLES ===");
        info!(
            "Lot capacity: {} ({} x {}), vehicles: {}",
            self.layout.capacity(),
            self.config.rows,
            self.config.columns,
            count
        );

        let mut handles = Vec::with_capacity(count);
        let mut spawn_error = None;
        for i in 0..count {
            let dwell = self.config.dwell.sample(&mut rng);
            match spawn(self, VehicleId(i), dwell) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    error!(
                        "{err:#}; waiting for {} vehicle(s) already spawned",
                        handles.len()
                    );
                    spawn_error = Some(err);
                    break;
                }
            }
            if i + 1 < count {
                thread::sleep(self.config.spawn.sample(&mut rng));
            }
        }

        let panicked = handles
            .into_iter()
            .map(JoinHandle::join)
            .filter(Result::is_err)
            .count();

        let stats = self.stats();
        self.log_completion(&stats);
        if let Some(err) = spawn_error {
            return Err(err);
        }
        if panicked > 0 {
            bail!("{panicked} vehicle thread(s) panicked");
        }
        Ok(stats)
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats.read(self.pool.snapshot().peak_occupied)
    }

    /// Read-only view for presentation
    pub fn snapshot(&self) -> SimSnapshot {
        let mut vehicles = self.registry.snapshots();
        vehicles.sort_by_key(|v| v.id);
        SimSnapshot {
            elapsed: self.started.elapsed(),
            vehicles,
            pool: self.pool.snapshot(),
            gate_holder: self.gate.holder(),
            stats: self.stats(),
        }
    }

    fn log_completion(&self, stats: &SimulationStats) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Elapsed time: {:.2}s", self.started.elapsed().as_secs_f32());
        info!("Total vehicles spawned: {}", stats.total_vehicles_spawned);
        info!("Total vehicles departed: {}", stats.total_vehicles_departed);
        info!("Active vehicles: {}", stats.active_vehicles());
        info!(
            "Peak occupancy: {}/{}",
            stats.peak_occupied,
            self.layout.capacity()
        );
        info!("Completion rate: {:.1}%", stats.completion_rate());
    }
}

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use log::info;

use parking_sim::simulation::{
    report, DelayRange, SimConfig, SimWorld, DEFAULT_COLUMNS, DEFAULT_ROWS, DEFAULT_VEHICLE_COUNT,
};

#[derive(Parser)]
#[command(name = "parking_sim")]
#[command(about = "Concurrent parking lot simulation")]
struct Cli {
    /// Number of strips of slots
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Number of slots per strip
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    columns: usize,

    /// Number of vehicles to spawn
    #[arg(long, default_value_t = DEFAULT_VEHICLE_COUNT)]
    vehicles: usize,

    /// Minimum delay between arrivals in milliseconds
    #[arg(long, default_value = "1000")]
    spawn_min_ms: u64,

    /// Maximum delay between arrivals in milliseconds
    #[arg(long, default_value = "2000")]
    spawn_max_ms: u64,

    /// Minimum parked time in milliseconds
    #[arg(long, default_value = "40000")]
    dwell_min_ms: u64,

    /// Maximum parked time in milliseconds
    #[arg(long, default_value = "50000")]
    dwell_max_ms: u64,

    /// Distance covered per movement tick
    #[arg(long, default_value = "1.0")]
    step: f32,

    /// Milliseconds between movement ticks
    #[arg(long, default_value = "10")]
    tick_ms: u64,

    /// Minimum distance between vehicles sharing a lane
    #[arg(long, default_value = "30.0")]
    min_distance: f32,

    /// Seed for reproducible arrival and dwell times
    #[arg(long)]
    seed: Option<u64>,

    /// Print a lot summary every this many milliseconds (0 disables)
    #[arg(long, default_value = "1000")]
    report_interval_ms: u64,
}

impl Cli {
    fn config(&self) -> SimConfig {
        SimConfig {
            rows: self.rows,
            columns: self.columns,
            vehicle_count: self.vehicles,
            spawn: DelayRange::new(self.spawn_min_ms, self.spawn_max_ms),
            dwell: DelayRange::new(self.dwell_min_ms, self.dwell_max_ms),
            step_size: self.step,
            tick_interval: Duration::from_millis(self.tick_ms),
            min_lane_distance: self.min_distance,
            seed: self.seed,
            ..SimConfig::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let world = Arc::new(SimWorld::new(cli.config())?);
    info!("Running parking simulation in headless mode...");

    let runner = {
        let world = Arc::clone(&world);
        thread::spawn(move || world.run())
    };

    let columns = world.config().columns;
    if cli.report_interval_ms > 0 {
        let interval = Duration::from_millis(cli.report_interval_ms);
        while !runner.is_finished() {
            thread::sleep(interval);
            report::print_summary(&world.snapshot(), columns);
        }
    }

    let stats = runner
        .join()
        .map_err(|_| anyhow!("Simulation driver panicked"))??;

    println!("=== Final State ===");
    report::print_summary(&world.snapshot(), columns);
    if stats.active_vehicles() > 0 {
        return Err(anyhow!(
            "{} vehicle(s) did not leave the lot",
            stats.active_vehicles()
        ));
    }
    Ok(())
}

//! Simulation configuration
//!
//! Plain values consumed by the core. Everything is checked once by
//! [`SimConfig::validate`] before any vehicle is spawned.

use std::time::Duration;

use anyhow::{bail, ensure, Result};
use rand::Rng;

use super::types::{
    Position, Rect, BACK_OUT_DISTANCE, EXIT_LANE_INSET, EXIT_ROW_INSET, FIRST_SLOT_INSET_X,
    FIRST_SLOT_OFFSET_Y, PARK_INSET,
};

/// Default lot: 4 strips of 5 slots
pub const DEFAULT_ROWS: usize = 4;
pub const DEFAULT_COLUMNS: usize = 5;
pub const DEFAULT_VEHICLE_COUNT: usize = 100;

/// Inclusive range of delays in milliseconds, sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// A range that always yields the same delay
    pub fn fixed(ms: u64) -> Self {
        Self::new(ms, ms)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_millis(rng.random_range(self.min_ms..=self.max_ms))
    }

    fn check(&self, name: &str) -> Result<()> {
        ensure!(
            self.min_ms <= self.max_ms,
            "invalid configuration: `{name}` range is malformed (min {} ms > max {} ms)",
            self.min_ms,
            self.max_ms
        );
        Ok(())
    }
}

/// Geometry of the lot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Paved area of the lot; the gate sits on its top edge
    pub bounds: Rect,
    pub slot_width: f32,
    pub slot_height: f32,
    /// Horizontal distance between neighbouring strips of slots
    pub strip_spacing: f32,
    /// Vertical distance between neighbouring slots within a strip
    pub slot_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bounds: Rect::new(Position::new(100.0, 130.0), Position::new(500.0, 455.0)),
            slot_width: 30.0,
            slot_height: 30.0,
            strip_spacing: 90.0,
            slot_spacing: 45.0,
        }
    }
}

/// Full configuration of a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Number of strips of slots
    pub rows: usize,
    /// Number of slots per strip
    pub columns: usize,
    /// Vehicles spawned by the driver
    pub vehicle_count: usize,
    /// Delay between consecutive arrivals
    pub spawn: DelayRange,
    /// Time a vehicle stays parked
    pub dwell: DelayRange,
    /// Distance covered by one movement step
    pub step_size: f32,
    /// Sleep between movement ticks
    pub tick_interval: Duration,
    /// Minimum gap kept between vehicles sharing a lane
    pub min_lane_distance: f32,
    /// Seed for reproducible spawn and dwell delays
    pub seed: Option<u64>,
    pub layout: LayoutConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            vehicle_count: DEFAULT_VEHICLE_COUNT,
            spawn: DelayRange::new(1000, 2000),
            dwell: DelayRange::new(40_000, 50_000),
            step_size: 1.0,
            tick_interval: Duration::from_millis(10),
            min_lane_distance: 30.0,
            seed: None,
            layout: LayoutConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn capacity(&self) -> usize {
        self.rows * self.columns
    }

    /// Reject configurations the simulation cannot run with, naming the
    /// offending parameter
    pub fn validate(&self) -> Result<()> {
        ensure!(self.rows >= 1, "invalid configuration: `rows` must be at least 1");
        ensure!(
            self.columns >= 1,
            "invalid configuration: `columns` must be at least 1"
        );
        self.spawn.check("spawn")?;
        self.dwell.check("dwell")?;
        ensure!(
            self.step_size.is_finite() && self.step_size > 0.0,
            "invalid configuration: `step_size` must be a positive number, got {}",
            self.step_size
        );
        ensure!(
            !self.tick_interval.is_zero(),
            "invalid configuration: `tick_interval` must be greater than zero"
        );
        ensure!(
            self.min_lane_distance.is_finite() && self.min_lane_distance >= 0.0,
            "invalid configuration: `min_lane_distance` must be a non-negative number, got {}",
            self.min_lane_distance
        );
        self.validate_layout()
    }

    fn validate_layout(&self) -> Result<()> {
        let layout = &self.layout;
        let bounds = layout.bounds;
        ensure!(
            bounds.width() > 0.0 && bounds.height() > 0.0,
            "invalid configuration: `bounds` must have a positive area"
        );
        ensure!(
            layout.slot_width > 0.0 && layout.slot_height > 0.0,
            "invalid configuration: `slot_width` and `slot_height` must be positive"
        );
        ensure!(
            layout.slot_width + PARK_INSET < FIRST_SLOT_INSET_X - EXIT_LANE_INSET,
            "invalid configuration: `slot_width` {} leaves no room for the exit lane",
            layout.slot_width
        );
        ensure!(
            layout.strip_spacing > layout.slot_width + BACK_OUT_DISTANCE,
            "invalid configuration: `strip_spacing` must exceed slot width plus back-out distance ({})",
            layout.slot_width + BACK_OUT_DISTANCE
        );
        ensure!(
            layout.slot_spacing >= layout.slot_height,
            "invalid configuration: `slot_spacing` must be at least `slot_height`"
        );

        let last_strip_x = bounds.max.x
            - FIRST_SLOT_INSET_X
            - (self.rows - 1) as f32 * layout.strip_spacing;
        let last_back_out = Position::new(
            last_strip_x + PARK_INSET - BACK_OUT_DISTANCE,
            bounds.min.y,
        );
        if !bounds.contains(last_back_out) {
            bail!(
                "invalid configuration: `rows` = {} strips do not fit in the lot width",
                self.rows
            );
        }
        let last_slot_bottom = bounds.min.y
            + FIRST_SLOT_OFFSET_Y
            + (self.columns - 1) as f32 * layout.slot_spacing
            + layout.slot_height;
        if last_slot_bottom > bounds.max.y - EXIT_ROW_INSET {
            bail!(
                "invalid configuration: `columns` = {} slots do not fit in the lot height",
                self.columns
            );
        }
        Ok(())
    }
}

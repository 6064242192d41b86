//! Stepped movement with collision avoidance
//!
//! Vehicles advance one fixed step per tick along the current segment. Before
//! each step the registry is polled for another vehicle ahead on the same
//! lane (same perpendicular coordinate). If the step would bring the mover
//! inside the minimum lane distance it holds for that tick and tries again
//! on the next one. There is no queueing and no backoff.
//!
//! The step that finishes a segment puts the vehicle on a corner, where its
//! next segment starts on the crossing lane. That step also holds while any
//! vehicle sits on either lane through the landing point within the minimum
//! lane distance, in either direction, so turning vehicles merge into gaps
//! instead of cutting in.
//!
//! The check and the move happen under the registry lock. Two vehicles
//! meeting head-on on one lane hold each other forever; the lot layout never
//! routes vehicles that way.

use std::thread;
use std::time::Duration;

use super::config::SimConfig;
use super::monitor::SimulationMonitor;
use super::path::{Path, PathSegment};
use super::registry::VehicleRegistry;
use super::types::Position;
use super::vehicle::SimVehicle;

/// Result of a single movement tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Advanced one step
    Moved,
    /// Another vehicle is too close ahead; position unchanged
    Held,
    /// The segment target has been reached (or passed)
    Arrived,
}

/// Whether `other` blocks `mover` travelling along `segment`: same lane and
/// ahead in the direction of travel by less than `threshold`
pub fn blocks(mover: Position, other: Position, segment: &PathSegment, threshold: f32) -> bool {
    if other.across(segment.axis) != mover.across(segment.axis) {
        return false;
    }
    let gap = (other.along(segment.axis) - mover.along(segment.axis)) * segment.heading.sign();
    gap > 0.0 && gap < threshold
}

/// Whether `other` sits on either lane through `landing` closer than
/// `distance`
pub fn crowds(landing: Position, other: Position, distance: f32) -> bool {
    (other.x == landing.x && (other.y - landing.y).abs() < distance)
        || (other.y == landing.y && (other.x - landing.x).abs() < distance)
}

/// Discretization of motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub step_size: f32,
    pub tick_interval: Duration,
    pub min_lane_distance: f32,
}

impl Motion {
    pub fn new(step_size: f32, tick_interval: Duration, min_lane_distance: f32) -> Self {
        Self {
            step_size,
            tick_interval,
            min_lane_distance,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(
            config.step_size,
            config.tick_interval,
            config.min_lane_distance,
        )
    }

    /// Gap below which a step is suppressed: after the step the gap must
    /// still be at least the minimum lane distance
    pub fn blocking_gap(&self) -> f32 {
        self.min_lane_distance + self.step_size
    }

    /// One tick of movement along `segment`, without sleeping
    pub fn step(
        &self,
        vehicle: &SimVehicle,
        segment: &PathSegment,
        registry: &VehicleRegistry,
    ) -> StepOutcome {
        let here = vehicle.position();
        if segment.is_reached(here) {
            return StepOutcome::Arrived;
        }
        let delta = segment.heading.sign() * self.step_size;
        let landing = here.shifted(segment.axis, delta);
        let turning = segment.is_reached(landing);
        let gap = self.blocking_gap();
        let moved = registry.step_unless(vehicle, segment.axis, delta, |other| {
            blocks(here, other, segment, gap)
                || (turning && crowds(landing, other, self.min_lane_distance))
        });
        if moved {
            StepOutcome::Moved
        } else {
            StepOutcome::Held
        }
    }

    /// Drive `segment` to completion, one step per tick
    pub fn follow_segment(
        &self,
        vehicle: &SimVehicle,
        segment: &PathSegment,
        registry: &VehicleRegistry,
        monitor: &dyn SimulationMonitor,
    ) {
        loop {
            let outcome = self.step(vehicle, segment, registry);
            if outcome == StepOutcome::Arrived {
                return;
            }
            monitor.on_step(vehicle.id(), outcome, vehicle.position());
            thread::sleep(self.tick_interval);
        }
    }

    /// Drive every segment of `path` in order
    pub fn follow(
        &self,
        vehicle: &SimVehicle,
        path: &Path,
        registry: &VehicleRegistry,
        monitor: &dyn SimulationMonitor,
    ) {
        for segment in path.iter() {
            self.follow_segment(vehicle, segment, registry, monitor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_only_ahead_on_same_lane() {
        let right = PathSegment::right(500.0);
        let mover = Position::new(100.0, 50.0);
        assert!(blocks(mover, Position::new(120.0, 50.0), &right, 31.0));
        // behind
        assert!(!blocks(mover, Position::new(80.0, 50.0), &right, 31.0));
        // other lane
        assert!(!blocks(mover, Position::new(120.0, 51.0), &right, 31.0));
        // far enough
        assert!(!blocks(mover, Position::new(131.0, 50.0), &right, 31.0));
    }

    #[test]
    fn blocks_respects_heading() {
        let up = PathSegment::up(0.0);
        let mover = Position::new(10.0, 100.0);
        assert!(blocks(mover, Position::new(10.0, 90.0), &up, 30.0));
        assert!(!blocks(mover, Position::new(10.0, 110.0), &up, 30.0));
    }

    #[test]
    fn crowds_checks_both_lanes_through_landing() {
        let corner = Position::new(385.0, 425.0);
        assert!(crowds(corner, Position::new(380.0, 425.0), 30.0));
        assert!(crowds(corner, Position::new(385.0, 400.0), 30.0));
        assert!(!crowds(corner, Position::new(355.0, 425.0), 30.0));
        assert!(!crowds(corner, Position::new(380.0, 420.0), 30.0));
    }

    #[test]
    fn blocking_gap_keeps_minimum_after_step() {
        let motion = Motion::new(5.0, Duration::from_millis(1), 30.0);
        assert_eq!(motion.blocking_gap(), 35.0);
    }
}

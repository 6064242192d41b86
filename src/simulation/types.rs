//! Core types for the parking simulation
//!
//! Identifiers, 2D geometry and the vehicle lifecycle states.

use std::fmt;

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub usize);

/// A wrapper type for slot IDs (index into the slot pool)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 2D position in lot coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Coordinate along the given axis
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Coordinate on the axis perpendicular to `axis` (the lane)
    pub fn across(&self, axis: Axis) -> f32 {
        self.along(axis.perpendicular())
    }

    /// Returns a copy shifted by `delta` along `axis`
    pub fn shifted(&self, axis: Axis, delta: f32) -> Position {
        match axis {
            Axis::Horizontal => Position::new(self.x + delta, self.y),
            Axis::Vertical => Position::new(self.x, self.y + delta),
        }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Position,
    pub max: Position,
}

impl Rect {
    pub fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    pub fn from_size(origin: Position, width: f32, height: f32) -> Self {
        Self::new(origin, Position::new(origin.x + width, origin.y + height))
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Movement axis of a path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Direction of travel along an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// Increasing coordinate (right / down)
    Forward,
    /// Decreasing coordinate (left / up)
    Backward,
}

impl Heading {
    pub fn sign(self) -> f32 {
        match self {
            Heading::Forward => 1.0,
            Heading::Backward => -1.0,
        }
    }
}

/// Lifecycle state of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleState {
    /// Spawned, waiting for the spawn point to clear
    Arriving,
    /// On the map, driving to (or waiting at) the holding point
    Queued,
    /// Holds a slot and the gate, crossing the entrance
    EnteringGate,
    /// Driving to the slot
    Parking,
    /// Dwelling in the slot
    Parked,
    /// Backing out and driving to the exit staging point
    LeavingSlot,
    /// Slot released, crossing the exit and driving off the map
    ExitingGate,
    /// Off the map, removed from the registry
    Departed,
}

impl VehicleState {
    pub fn label(self) -> &'static str {
        match self {
            VehicleState::Arriving => "arriving",
            VehicleState::Queued => "queued",
            VehicleState::EnteringGate => "entering",
            VehicleState::Parking => "parking",
            VehicleState::Parked => "parked",
            VehicleState::LeavingSlot => "leaving",
            VehicleState::ExitingGate => "exiting",
            VehicleState::Departed => "departed",
        }
    }
}

impl fmt::Display for VehicleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Horizontal distance from the lot's right edge to the entrance lane
pub const ENTRY_LANE_INSET: f32 = 55.0;

/// Horizontal distance from the lot's right edge to the exit lane
pub const EXIT_LANE_INSET: f32 = 25.0;

/// Distance above the lot where vehicles appear
pub const SPAWN_OFFSET: f32 = 150.0;

/// Distance above the lot where the queue head waits for a slot
pub const QUEUE_HOLD_OFFSET: f32 = 35.0;

/// Entrance crossing ends this far inside the lot
pub const GATE_INNER_OFFSET: f32 = 5.0;

/// Exit crossing ends this far above the lot
pub const GATE_OUTER_OFFSET: f32 = 10.0;

/// Exit staging point, inside the lot below the gate
pub const EXIT_STAGING_OFFSET: f32 = 15.0;

/// Distance from the lot's bottom edge to the exit row
pub const EXIT_ROW_INSET: f32 = 30.0;

/// Offset of the first slot from the lot's top right corner
pub const FIRST_SLOT_INSET_X: f32 = 90.0;
pub const FIRST_SLOT_OFFSET_Y: f32 = 80.0;

/// Gap between a slot edge and the point a vehicle parks at / the aisle
pub const PARK_INSET: f32 = 5.0;

/// How far a vehicle backs out of its slot before heading to the exit
pub const BACK_OUT_DISTANCE: f32 = 30.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_axis_accessors() {
        let p = Position::new(3.0, 7.0);
        assert_eq!(p.along(Axis::Horizontal), 3.0);
        assert_eq!(p.across(Axis::Horizontal), 7.0);
        assert_eq!(p.shifted(Axis::Vertical, -2.0), Position::new(3.0, 5.0));
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::from_size(Position::new(0.0, 0.0), 10.0, 5.0);
        assert!(r.contains(Position::new(10.0, 5.0)));
        assert!(!r.contains(Position::new(10.5, 1.0)));
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 5.0);
    }
}

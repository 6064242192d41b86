//! Paths made of axis-aligned movement segments

use std::ops::Deref;
use std::sync::Arc;

use super::types::{Axis, Heading, Position};

/// One axis-aligned leg of a route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    pub axis: Axis,
    pub heading: Heading,
    /// Coordinate on `axis` where the segment ends
    pub target: f32,
}

impl PathSegment {
    pub fn new(axis: Axis, heading: Heading, target: f32) -> Self {
        Self {
            axis,
            heading,
            target,
        }
    }

    pub fn right(target: f32) -> Self {
        Self::new(Axis::Horizontal, Heading::Forward, target)
    }

    pub fn left(target: f32) -> Self {
        Self::new(Axis::Horizontal, Heading::Backward, target)
    }

    pub fn down(target: f32) -> Self {
        Self::new(Axis::Vertical, Heading::Forward, target)
    }

    pub fn up(target: f32) -> Self {
        Self::new(Axis::Vertical, Heading::Backward, target)
    }

    /// Whether `position` has reached or passed the target in the heading
    /// direction. A final step can overshoot when the step size does not
    /// divide the distance; that counts as reached.
    pub fn is_reached(&self, position: Position) -> bool {
        let current = position.along(self.axis);
        match self.heading {
            Heading::Forward => current >= self.target,
            Heading::Backward => current <= self.target,
        }
    }
}

/// An immutable, cheaply cloneable sequence of segments
#[derive(Debug, Clone, PartialEq)]
pub struct Path(Arc<[PathSegment]>);

impl Path {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments.into())
    }

    /// Final position when the path is driven from `start` with exact
    /// arrivals (no overshoot)
    pub fn end_position(&self, start: Position) -> Position {
        self.0.iter().fold(start, |p, segment| match segment.axis {
            Axis::Horizontal => Position::new(segment.target, p.y),
            Axis::Vertical => Position::new(p.x, segment.target),
        })
    }
}

impl Deref for Path {
    type Target = [PathSegment];

    fn deref(&self) -> &[PathSegment] {
        &self.0
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self::new(segments)
    }
}

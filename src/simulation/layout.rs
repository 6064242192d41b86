//! Lot layout: slot geometry and the routes vehicles drive
//!
//! Vehicles enter on the entrance lane near the right edge of the lot, turn
//! left along the gate row, drive down the aisle of their strip and pull
//! into the slot. Leaving vehicles back out, drive down to the exit row,
//! right to the exit lane and up to the exit staging point below the gate.
//! Lanes are laid out so no two routes meet head-on.

use super::config::SimConfig;
use super::path::{Path, PathSegment};
use super::types::{
    Axis, Heading, Position, Rect, SlotId, BACK_OUT_DISTANCE, ENTRY_LANE_INSET, EXIT_LANE_INSET,
    EXIT_ROW_INSET, EXIT_STAGING_OFFSET, FIRST_SLOT_INSET_X, FIRST_SLOT_OFFSET_Y,
    GATE_INNER_OFFSET, GATE_OUTER_OFFSET, PARK_INSET, QUEUE_HOLD_OFFSET, SPAWN_OFFSET,
};

/// Geometry and routes of a single slot
#[derive(Debug, Clone)]
pub struct SlotSpec {
    pub id: SlotId,
    pub area: Rect,
    /// Where a parked vehicle stands
    pub parked_at: Position,
    /// From the end of the entrance to `parked_at`
    pub parking: Path,
    /// From `parked_at` to the exit staging point
    pub leaving: Path,
}

/// The complete lot
#[derive(Debug, Clone)]
pub struct LotLayout {
    pub bounds: Rect,
    pub rows: usize,
    pub columns: usize,
    /// Where vehicles appear, above the lot on the entrance lane
    pub spawn_point: Position,
    /// Spawn point to the queue head
    pub queue: Path,
    /// Queue head through the gate into the lot
    pub entrance: Path,
    /// Exit staging point through the gate out of the lot
    pub exit: Path,
    /// Outside the gate back to the top edge of the map
    pub departure: Path,
    pub slots: Vec<SlotSpec>,
}

/// Segment along `axis` from coordinate `from` to `to`
fn toward(axis: Axis, from: f32, to: f32) -> PathSegment {
    let heading = if to >= from {
        Heading::Forward
    } else {
        Heading::Backward
    };
    PathSegment::new(axis, heading, to)
}

impl LotLayout {
    /// Build the layout for a validated configuration
    pub fn new(config: &SimConfig) -> Self {
        let layout = &config.layout;
        let bounds = layout.bounds;

        let entry_x = bounds.max.x - ENTRY_LANE_INSET;
        let exit_x = bounds.max.x - EXIT_LANE_INSET;
        let spawn_point = Position::new(entry_x, bounds.min.y - SPAWN_OFFSET);
        let gate_inner_y = bounds.min.y + GATE_INNER_OFFSET;
        let exit_row_y = bounds.max.y - EXIT_ROW_INSET;
        let staging_y = bounds.min.y + EXIT_STAGING_OFFSET;

        let mut slots = Vec::with_capacity(config.capacity());
        for row in 0..config.rows {
            for column in 0..config.columns {
                let origin = Position::new(
                    bounds.max.x - FIRST_SLOT_INSET_X - row as f32 * layout.strip_spacing,
                    bounds.min.y + FIRST_SLOT_OFFSET_Y + column as f32 * layout.slot_spacing,
                );
                let area = Rect::from_size(origin, layout.slot_width, layout.slot_height);
                let aisle_x = area.max.x + PARK_INSET;
                let parked_at = Position::new(origin.x + PARK_INSET, origin.y + PARK_INSET);

                let parking = Path::new(vec![
                    toward(Axis::Horizontal, entry_x, aisle_x),
                    PathSegment::down(parked_at.y),
                    PathSegment::left(parked_at.x),
                ]);
                let leaving = Path::new(vec![
                    PathSegment::left(parked_at.x - BACK_OUT_DISTANCE),
                    PathSegment::down(exit_row_y),
                    PathSegment::right(exit_x),
                    PathSegment::up(staging_y),
                ]);

                slots.push(SlotSpec {
                    id: SlotId(row * config.columns + column),
                    area,
                    parked_at,
                    parking,
                    leaving,
                });
            }
        }

        Self {
            bounds,
            rows: config.rows,
            columns: config.columns,
            spawn_point,
            queue: Path::new(vec![PathSegment::down(bounds.min.y - QUEUE_HOLD_OFFSET)]),
            entrance: Path::new(vec![PathSegment::down(gate_inner_y)]),
            exit: Path::new(vec![PathSegment::up(bounds.min.y - GATE_OUTER_OFFSET)]),
            departure: Path::new(vec![PathSegment::up(spawn_point.y)]),
            slots,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

//! Peg lattice geometry
//!
//! A downward-pointing triangle of pegs: row `r` holds `r + 1` pegs, every row
//! is centred on the canvas and pegs are `width / (rows + 1)` apart. Below the
//! last row the canvas is split into `rows + 1` equal-width slots.

use glam::Vec2;
use serde::Serialize;

use super::config::RowCount;
use crate::consts::*;

/// Peg identity (row, column), used for collision cooldown bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PegId {
    pub row: u16,
    pub col: u16,
}

/// A fixed circular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Peg {
    pub id: PegId,
    pub pos: Vec2,
}

/// Immutable board geometry shared by every ball in a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lattice {
    rows: RowCount,
    width: f32,
    height: f32,
    /// Row-major; row `r` starts at index `r * (r + 1) / 2`
    pegs: Vec<Peg>,
    peg_spacing: f32,
    slot_width: f32,
    slot_top: f32,
}

impl Lattice {
    /// Lay out the pegs and slots for a canvas
    pub fn build(rows: RowCount, width: f32, height: f32) -> Self {
        let row_total = rows.get();
        let peg_spacing = width / (row_total + 1) as f32;
        let row_pitch = (height - LATTICE_VERTICAL_RESERVE) / row_total as f32;

        let mut pegs = Vec::with_capacity(rows.peg_count());

        for row in 0..row_total {
            let y = LATTICE_TOP + row as f32 * row_pitch;
            let cols = row + 1;
            let start_x = (width - (cols - 1) as f32 * peg_spacing) / 2.0;

            for col in 0..cols {
                pegs.push(Peg {
                    id: PegId {
                        row: row as u16,
                        col: col as u16,
                    },
                    pos: Vec2::new(start_x + col as f32 * peg_spacing, y),
                });
            }
        }

        Self {
            rows,
            width,
            height,
            pegs,
            peg_spacing,
            slot_width: width / rows.slot_count() as f32,
            slot_top: height - SLOT_BAND_OFFSET,
        }
    }

    pub fn rows(&self) -> RowCount {
        self.rows
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    pub fn peg_spacing(&self) -> f32 {
        self.peg_spacing
    }

    /// Pegs of a single row
    ///
    /// # Panics
    ///
    /// Panics if `row` is not below [`RowCount::get`] for this lattice.
    pub fn row(&self, row: usize) -> &[Peg] {
        let start = row * (row + 1) / 2;
        &self.pegs[start..start + row + 1]
    }

    pub fn slot_count(&self) -> usize {
        self.rows.slot_count()
    }

    pub fn slot_width(&self) -> f32 {
        self.slot_width
    }

    /// Top edge of the slot band
    pub fn slot_top(&self) -> f32 {
        self.slot_top
    }

    /// A ball whose centre reaches this height has landed
    pub fn settle_line(&self) -> f32 {
        self.slot_top - BALL_RADIUS
    }

    /// Slot under horizontal position `x`, clamped to a valid index
    pub fn slot_at(&self, x: f32) -> usize {
        // `as usize` saturates negatives and NaN to 0
        let index = (x / self.slot_width).floor() as usize;
        index.min(self.slot_count() - 1)
    }

    /// Horizontal centre of a slot
    pub fn slot_center(&self, slot: usize) -> f32 {
        (slot as f32 + 0.5) * self.slot_width
    }

    /// Drop point above the apex peg
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, SPAWN_Y)
    }
}

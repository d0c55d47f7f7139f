//! Row-clear sweep.
//!
//! The cleared rows are painted over left to right, half a column per frame,
//! before the core is told to remove them. Driven by elapsed time like the
//! drop scheduler, so it never needs its own timer.

use crate::core::RowList;
use crate::types::{BOARD_WIDTH, TICK_MS};

/// Frames for a full sweep (half a column per frame)
pub const SWEEP_FRAMES: u32 = BOARD_WIDTH as u32 * 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearAnimation {
    rows: RowList,
    elapsed_ms: u32,
    frame_ms: u32,
    finished: bool,
}

impl ClearAnimation {
    pub fn new(rows: RowList) -> Self {
        Self::with_frame_ms(rows, TICK_MS)
    }

    pub fn with_frame_ms(rows: RowList, frame_ms: u32) -> Self {
        Self {
            rows,
            elapsed_ms: 0,
            frame_ms: frame_ms.max(1),
            finished: false,
        }
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Frames shown so far, capped at [`SWEEP_FRAMES`]
    pub fn frames(&self) -> u32 {
        (self.elapsed_ms / self.frame_ms).min(SWEEP_FRAMES)
    }

    /// Feed elapsed time. Returns true exactly once, on the call that
    /// completes the sweep.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if self.finished {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.frames() >= SWEEP_FRAMES {
            self.finished = true;
            return true;
        }
        false
    }

    /// Whether the sweep has reached `col` of a cleared row
    pub fn is_swept(&self, row: usize, col: u16) -> bool {
        self.rows.contains(&row) && (col as u32) * 2 < self.frames()
    }
}

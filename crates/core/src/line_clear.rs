//! Line clear engine - completed-row detection and the two-phase animation
//!
//! A clear runs for a fixed duration split in two subphases:
//!
//! 1. **Glow**: completed rows pulse. The grid is not touched.
//! 2. **Shift**: the completed rows have been removed from the grid and every
//!    surviving row past them eases from its old index to its new one.
//!
//! The grid mutation happens exactly once, on the first [`LineClearEngine::advance`]
//! whose elapsed time reaches the glow duration. Moving rows are snapshotted
//! when the clear begins because the grid no longer holds them in their old
//! place once the shift starts.
//!
//! Scoring is not done here; [`ClearStep::Finished`] hands the cleared count
//! back to the session.

use arrayvec::ArrayVec;

use crate::grid::{CompletedRows, Grid};
use crate::types::{AnimationPhase, Cell, GameConfig, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// A surviving row that changes index when the clear compacts the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovingRow {
    pub original_row: u8,
    pub target_row: u8,
    /// Row contents captured when the clear began
    pub cells: [Cell; WIDTH],
}

impl MovingRow {
    /// Signed distance in rows (negative: toward the lock edge)
    pub fn distance(&self) -> i32 {
        self.target_row as i32 - self.original_row as i32
    }
}

pub type MovingRows = ArrayVec<MovingRow, HEIGHT>;

/// Animation durations in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClearTiming {
    pub total_ms: u32,
    pub glow_ms: u32,
}

impl ClearTiming {
    pub fn new(total_ms: u32, glow_ms: u32) -> Self {
        let total_ms = total_ms.max(1);
        Self {
            total_ms,
            glow_ms: glow_ms.min(total_ms),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.clear_duration_ms, config.glow_duration_ms())
    }

    /// Glow share of the total duration
    pub fn glow_ratio(&self) -> f32 {
        self.glow_ms as f32 / self.total_ms as f32
    }
}

impl Default for ClearTiming {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// What a call to [`LineClearEngine::advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearStep {
    /// No clear in progress
    Idle,
    /// Still running. `rows_removed` is true on the one step that compacted
    /// the grid.
    Running { rows_removed: bool },
    /// The animation ended; `cleared` is the count captured at start
    Finished { cleared: u32, rows_removed: bool },
}

/// State of an in-flight clear
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClearAnimation {
    elapsed_ms: u32,
    glowing_rows: CompletedRows,
    moving_rows: MovingRows,
    rows_removed: bool,
    cleared_count: u32,
}

impl ClearAnimation {
    fn new(rows: CompletedRows, grid: &Grid) -> Self {
        let mut moving_rows = MovingRows::new();
        for row in 0..HEIGHT as u8 {
            if rows.contains(&row) {
                continue;
            }
            let cleared_before = rows.iter().filter(|&&r| r < row).count() as u8;
            if cleared_before == 0 {
                continue;
            }
            let mut cells = [0; WIDTH];
            cells.copy_from_slice(grid.row(row as usize));
            moving_rows.push(MovingRow {
                original_row: row,
                target_row: row - cleared_before,
                cells,
            });
        }

        Self {
            elapsed_ms: 0,
            cleared_count: rows.len() as u32,
            glowing_rows: rows,
            moving_rows,
            rows_removed: false,
        }
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Rows pulsing in the glow subphase; empty once removed
    pub fn glowing_rows(&self) -> &[u8] {
        &self.glowing_rows
    }

    pub fn moving_rows(&self) -> &[MovingRow] {
        &self.moving_rows
    }

    pub fn rows_removed(&self) -> bool {
        self.rows_removed
    }

    pub fn cleared_count(&self) -> u32 {
        self.cleared_count
    }

    /// Remove the glowing rows, highest index first so lower indices stay
    /// put while removing.
    fn remove_rows(&mut self, grid: &mut Grid) {
        for &row in self.glowing_rows.iter().rev() {
            grid.remove_row(row as usize);
        }
        self.glowing_rows.clear();
        self.rows_removed = true;
    }
}

/// Drives line-clear detection and animation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineClearEngine {
    timing: ClearTiming,
    active: Option<ClearAnimation>,
}

impl LineClearEngine {
    pub fn new(timing: ClearTiming) -> Self {
        Self {
            timing,
            active: None,
        }
    }

    pub fn timing(&self) -> ClearTiming {
        self.timing
    }

    pub fn is_clearing(&self) -> bool {
        self.active.is_some()
    }

    pub fn animation(&self) -> Option<&ClearAnimation> {
        self.active.as_ref()
    }

    /// Scan for complete rows and start a clear if there are any
    ///
    /// Returns the number of rows being cleared, or `None` if nothing is
    /// complete or a clear is already running.
    pub fn begin(&mut self, grid: &Grid) -> Option<u32> {
        if self.active.is_some() {
            return None;
        }
        let rows = grid.completed_rows();
        if rows.is_empty() {
            return None;
        }
        let anim = ClearAnimation::new(rows, grid);
        let count = anim.cleared_count;
        self.active = Some(anim);
        Some(count)
    }

    /// Advance the animation clock, compacting the grid at the glow boundary
    pub fn advance(&mut self, grid: &mut Grid, delta_ms: u32) -> ClearStep {
        let Some(anim) = self.active.as_mut() else {
            return ClearStep::Idle;
        };

        anim.elapsed_ms = anim.elapsed_ms.saturating_add(delta_ms);

        let mut rows_removed = false;
        if !anim.rows_removed && anim.elapsed_ms >= self.timing.glow_ms {
            anim.remove_rows(grid);
            rows_removed = true;
        }

        if anim.elapsed_ms >= self.timing.total_ms {
            let cleared = anim.cleared_count;
            self.active = None;
            return ClearStep::Finished {
                cleared,
                rows_removed,
            };
        }

        ClearStep::Running { rows_removed }
    }

    /// Drop any in-flight clear without touching the grid
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn phase(&self) -> AnimationPhase {
        match &self.active {
            None => AnimationPhase::Idle,
            Some(anim) if anim.elapsed_ms < self.timing.glow_ms => AnimationPhase::Glow,
            Some(_) => AnimationPhase::Shift,
        }
    }

    /// Overall progress in [0, 1]
    pub fn progress(&self) -> f32 {
        self.active.as_ref().map_or(0.0, |anim| {
            (anim.elapsed_ms as f32 / self.timing.total_ms as f32).min(1.0)
        })
    }

    /// Glow subphase progress in [0, 1]
    pub fn glow_progress(&self) -> f32 {
        self.active.as_ref().map_or(0.0, |anim| {
            if self.timing.glow_ms == 0 {
                return 1.0;
            }
            (anim.elapsed_ms as f32 / self.timing.glow_ms as f32).min(1.0)
        })
    }

    /// Pulse intensity in [0, 1] for glowing rows
    pub fn glow_intensity(&self) -> f32 {
        if self.active.is_none() {
            return 0.0;
        }
        glow_intensity(self.glow_progress())
    }

    /// Shift subphase progress in [0, 1]; zero throughout the glow
    pub fn shift_progress(&self) -> f32 {
        if self.active.is_none() {
            return 0.0;
        }
        let ratio = self.timing.glow_ratio();
        if ratio >= 1.0 {
            return 1.0;
        }
        ((self.progress() - ratio) / (1.0 - ratio)).clamp(0.0, 1.0)
    }

    /// Current vertical offset of a moving row, in rows
    pub fn row_offset(&self, row: &MovingRow) -> f32 {
        ease_out_cubic(self.shift_progress()) * row.distance() as f32
    }

    /// Whether `row` is glowing right now
    pub fn is_glowing(&self, row: u8) -> bool {
        self.active
            .as_ref()
            .is_some_and(|anim| anim.glowing_rows.contains(&row))
    }
}

impl Default for LineClearEngine {
    fn default() -> Self {
        Self::new(ClearTiming::default())
    }
}

/// Cubic ease-out: fast start, gentle landing
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Sine pulse (two full periods over the glow) mapped to [0, 1]
pub fn glow_intensity(glow_progress: f32) -> f32 {
    0.5 + 0.5 * (glow_progress * std::f32::consts::PI * 4.0).sin()
}

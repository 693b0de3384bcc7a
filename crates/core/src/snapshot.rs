use arrayvec::ArrayVec;

use crate::line_clear::{LineClearEngine, MovingRow};
use crate::pieces::{Piece, Shape};
use crate::types::{AnimationPhase, PieceKind, SessionState, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl PieceSnapshot {
    /// Absolute grid cells, same mapping as placement checks
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        crate::collision::absolute_cells(&self.shape, self.x, self.y)
    }
}

/// A moving row together with its offset at snapshot time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingRowSnapshot {
    pub row: MovingRow,
    /// Offset in rows from `row.original_row`
    pub offset: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSnapshot {
    pub phase: AnimationPhase,
    pub elapsed_ms: u32,
    pub progress: f32,
    pub glow_intensity: f32,
    pub shift_progress: f32,
    pub glowing: [bool; BOARD_HEIGHT as usize],
    pub moving: ArrayVec<MovingRowSnapshot, { BOARD_HEIGHT as usize }>,
}

impl AnimationSnapshot {
    pub fn clear(&mut self) {
        self.phase = AnimationPhase::Idle;
        self.elapsed_ms = 0;
        self.progress = 0.0;
        self.glow_intensity = 0.0;
        self.shift_progress = 0.0;
        self.glowing = [false; BOARD_HEIGHT as usize];
        self.moving.clear();
    }

    /// Refill from the engine without reallocating.
    pub fn fill_from(&mut self, engine: &LineClearEngine) {
        self.clear();
        let Some(anim) = engine.animation() else {
            return;
        };

        self.phase = engine.phase();
        self.elapsed_ms = anim.elapsed_ms();
        self.progress = engine.progress();
        self.glow_intensity = engine.glow_intensity();
        self.shift_progress = engine.shift_progress();
        for &row in anim.glowing_rows() {
            self.glowing[row as usize] = true;
        }
        for row in anim.moving_rows() {
            self.moving.push(MovingRowSnapshot {
                row: *row,
                offset: engine.row_offset(row),
            });
        }
    }

    /// Whether a moving row will land on grid row `y`
    pub fn is_move_target(&self, y: u8) -> bool {
        self.moving.iter().any(|m| m.row.target_row == y)
    }
}

impl Default for AnimationSnapshot {
    fn default() -> Self {
        Self {
            phase: AnimationPhase::Idle,
            elapsed_ms: 0,
            progress: 0.0,
            glow_intensity: 0.0,
            shift_progress: 0.0,
            glowing: [false; BOARD_HEIGHT as usize],
            moving: ArrayVec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: Option<PieceSnapshot>,
    pub next: Option<PieceSnapshot>,
    pub state: SessionState,
    pub debug: bool,
    pub seed: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub animation: AnimationSnapshot,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.current = None;
        self.next = None;
        self.state = SessionState::NotStarted;
        self.debug = false;
        self.seed = 0;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = 0;
        self.animation.clear();
    }

    /// Whether inputs are accepted
    pub fn playable(&self) -> bool {
        self.state == SessionState::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            next: None,
            state: SessionState::NotStarted,
            debug: false,
            seed: 0,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
            animation: AnimationSnapshot::default(),
        }
    }
}

//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data: the rules that act on it live in
//! `updown-tetris-core`.
//!
//! # Board Orientation
//!
//! The playfield is upside down compared to the classic game:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Lock edge**: row 0. Pieces travel toward it and merge against it.
//! - **Spawn edge**: row 19. New pieces appear here.
//!
//! # Game Timing Defaults
//!
//! | Setting | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval used by the terminal runner |
//! | `BASE_DROP_MS` | 500 | Drop interval at level 1 |
//! | `DROP_STEP_MS` | 50 | Interval reduction per level |
//! | `MIN_DROP_MS` | 50 | Drop interval floor |
//! | `CLEAR_ANIMATION_MS` | 6000 | Full line-clear animation |
//! | `GLOW_PHASE_RATIO` | 0.5 | Share of the animation spent glowing |
//!
//! # Examples
//!
//! ```
//! use updown_tetris_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.color(), 3);
//! assert_eq!(PieceKind::from_color(3), Some(PieceKind::T));
//!
//! let action = GameAction::from_str("moveTowardLock").unwrap();
//! assert_eq!(action, GameAction::MoveTowardLock);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Row pieces lock against.
pub const LOCK_EDGE_ROW: i8 = 0;

/// Row new pieces are anchored on.
pub const SPAWN_EDGE_ROW: i8 = BOARD_HEIGHT as i8 - 1;

/// Fixed frame interval for the terminal runner (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Drop interval at level 1
pub const BASE_DROP_MS: u32 = 500;

/// Drop interval reduction per level gained
pub const DROP_STEP_MS: u32 = 50;

/// Drop interval floor
pub const MIN_DROP_MS: u32 = 50;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per cleared line, multiplied by the level
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Points per row travelled by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Total line-clear animation duration
pub const CLEAR_ANIMATION_MS: u32 = 6000;

/// Fraction of the clear animation spent in the glow subphase
pub const GLOW_PHASE_RATIO: f32 = 0.5;

/// Empty cell value
pub const EMPTY: Cell = 0;

/// A cell on the game board
///
/// `0` is empty, `1..=7` is the colour id of the piece that filled it
/// (see [`PieceKind::color`]).
pub type Cell = u8;

/// The seven tetromino piece kinds
///
/// Colour ids follow the order of the canonical shape table:
/// I=1, O=2, T=3, S=4, Z=5, J=6, L=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in colour-id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Grid colour id (1..=7)
    pub fn color(self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::color`]; `None` for empty or unknown values.
    pub fn from_color(cell: Cell) -> Option<Self> {
        match cell {
            1..=7 => Some(Self::ALL[(cell - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use updown_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Gameplay actions accepted while the session is running
///
/// "Toward lock" is the inverted soft drop: the piece moves one row closer
/// to the lock edge (row 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one row toward the lock edge
    MoveTowardLock,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Travel to the lock edge and lock immediately
    HardDrop,
}

impl GameAction {
    /// Parse action from a camelCase or lowercase name
    ///
    /// # Examples
    ///
    /// ```
    /// use updown_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movetowardlock" => Some(GameAction::MoveTowardLock),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveTowardLock => "moveTowardLock",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
        }
    }
}

/// Grid setup commands available in debug mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugCommand {
    /// Rows 0..5 filled, rows 1 and 3 complete.
    FillTestRows,
    /// Fresh grid with random rows 0..8, rows 2, 4 and 6 complete.
    FillRandomPattern,
    /// Run completed-row detection immediately.
    TriggerLineClear,
}

/// Externally visible session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    Running,
    Paused,
    /// Line-clear animation in progress; normal ticking is suspended.
    Clearing,
    GameOver,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "notStarted",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::Clearing => "clearing",
            SessionState::GameOver => "gameOver",
        }
    }
}

/// Line-clear animation phase as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationPhase {
    #[default]
    Idle,
    /// Completed rows pulse; the grid is untouched.
    Glow,
    /// Completed rows are gone; surviving rows ease into place.
    Shift,
}

/// Events queued by the session for the host to drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A piece merged into the grid.
    PieceLocked {
        kind: PieceKind,
        hard_drop_rows: u32,
    },
    /// Completed rows were found and the animation started.
    LineClearStarted { lines: u32 },
    /// The grid was compacted at the glow/shift boundary.
    RowsRemoved { lines: u32 },
    /// The animation ended and the clear was scored.
    LineClearFinished {
        lines: u32,
        score_delta: u32,
        total_lines: u32,
    },
    LevelUp { level: u32 },
    /// The freshly spawned piece could not be placed.
    GameOver { final_score: u32 },
}

/// Tunable rules and timings.
///
/// Missing fields fall back to the defaults, so a config file only needs the
/// values it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub base_drop_interval_ms: u32,
    pub drop_interval_step_ms: u32,
    pub min_drop_interval_ms: u32,
    pub lines_per_level: u32,
    pub line_clear_points: u32,
    pub hard_drop_points_per_row: u32,
    pub clear_duration_ms: u32,
    pub glow_ratio: f32,
    /// Reset straight back to `NotStarted` after reporting game over.
    pub auto_reset_on_game_over: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_drop_interval_ms: BASE_DROP_MS,
            drop_interval_step_ms: DROP_STEP_MS,
            min_drop_interval_ms: MIN_DROP_MS,
            lines_per_level: LINES_PER_LEVEL,
            line_clear_points: LINE_CLEAR_POINTS,
            hard_drop_points_per_row: HARD_DROP_POINTS_PER_ROW,
            clear_duration_ms: CLEAR_ANIMATION_MS,
            glow_ratio: GLOW_PHASE_RATIO,
            auto_reset_on_game_over: true,
        }
    }
}

impl GameConfig {
    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clear_duration_ms == 0 {
            return Err(ConfigError::ZeroClearDuration);
        }
        if !(self.glow_ratio > 0.0 && self.glow_ratio < 1.0) {
            return Err(ConfigError::GlowRatioOutOfRange(self.glow_ratio));
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        if self.min_drop_interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        if self.min_drop_interval_ms > self.base_drop_interval_ms {
            return Err(ConfigError::DropIntervalFloorAboveBase {
                min: self.min_drop_interval_ms,
                base: self.base_drop_interval_ms,
            });
        }
        Ok(())
    }

    /// Length of the glow subphase in milliseconds.
    pub fn glow_duration_ms(&self) -> u32 {
        (self.clear_duration_ms as f32 * self.glow_ratio).round() as u32
    }
}

/// Rejected [`GameConfig`] values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    ZeroClearDuration,
    GlowRatioOutOfRange(f32),
    ZeroLinesPerLevel,
    ZeroDropInterval,
    DropIntervalFloorAboveBase { min: u32, base: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroClearDuration => write!(f, "clear_duration_ms must be positive"),
            ConfigError::GlowRatioOutOfRange(r) => {
                write!(f, "glow_ratio must lie strictly between 0 and 1, got {r}")
            }
            ConfigError::ZeroLinesPerLevel => write!(f, "lines_per_level must be positive"),
            ConfigError::ZeroDropInterval => write!(f, "min_drop_interval_ms must be positive"),
            ConfigError::DropIntervalFloorAboveBase { min, base } => write!(
                f,
                "min_drop_interval_ms ({min}) exceeds base_drop_interval_ms ({base})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

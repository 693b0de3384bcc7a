//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on terminals or I/O, so the same seed always
//! produces the same game.
//!
//! # Orientation
//!
//! Row 0 is the lock edge and row 19 the spawn edge. Pieces spawn against
//! row 19 and gravity moves them toward row 0. A piece anchored at `(x, y)`
//! places shape cell `(row, col)` at grid cell `(x + col, y - row)`.
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 cell storage, completed-row detection and row removal
//! - [`pieces`]: tetromino shapes and clockwise rotation
//! - [`collision`]: shape-to-grid mapping and placement legality
//! - [`rng`]: deterministic piece and colour generation
//! - [`controller`]: current/next piece, moves, rotation and hard drop
//! - [`line_clear`]: the glow-then-shift line clear animation
//! - [`scoring`]: score, level and gravity rules
//! - [`session`]: the session state machine tying everything together
//! - [`snapshot`]: read-only views for renderers
//!
//! # Example
//!
//! ```
//! use updown_tetris_core::GameSession;
//! use updown_tetris_types::GameAction;
//!
//! let mut game = GameSession::new(12345);
//! game.start();
//!
//! game.handle_input(GameAction::MoveRight);
//! game.handle_input(GameAction::Rotate);
//! game.handle_input(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::tick`](session::GameSession::tick) every frame with
//! the elapsed milliseconds. Gravity starts at 500ms per row and speeds up
//! by 50ms per level down to 50ms. A line clear takes 6000ms, half glow and
//! half shift.

pub mod collision;
pub mod controller;
pub mod grid;
pub mod line_clear;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use updown_tetris_types as types;

// Re-export commonly used types for convenience
pub use collision::{absolute_cells, is_valid_placement};
pub use controller::PieceController;
pub use grid::Grid;
pub use line_clear::{ease_out_cubic, ClearStep, ClearTiming, LineClearEngine, MovingRow};
pub use pieces::{get_shape, Piece, Shape};
pub use rng::{PieceFactory, SimpleRng};
pub use scoring::{ScoreResult, Stats};
pub use session::GameSession;
pub use snapshot::{AnimationSnapshot, GameSnapshot, MovingRowSnapshot, PieceSnapshot};

//! Terminal front-end module.
//!
//! A small game-oriented rendering layer: the session snapshot is drawn into
//! a plain framebuffer ([`GameView`]) which is then flushed to the terminal
//! ([`TerminalRenderer`]). No widget toolkit is involved, which keeps cell
//! aspect ratio (2 columns per board cell) and colours under direct control.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use updown_tetris_core as core;
pub use updown_tetris_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{piece_rgb, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

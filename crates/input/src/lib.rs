//! Terminal input module.
//!
//! Maps `crossterm` key events into [`InputCommand`]s: gameplay actions for
//! the session plus the lifecycle and debug keys handled by the host loop.
//! Key repeat is left to the terminal.

pub mod map;

pub use updown_tetris_types as types;

pub use map::{handle_key_event, should_quit, InputCommand};

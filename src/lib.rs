//! Upside-down falling-block puzzle (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this crate
//! re-exports them as `updown_tetris::{core,input,term,types}` and hosts the
//! terminal binary.

pub use updown_tetris_core as core;
pub use updown_tetris_input as input;
pub use updown_tetris_term as term;
pub use updown_tetris_types as types;

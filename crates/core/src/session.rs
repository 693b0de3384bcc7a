//! Game session module - the top-level state machine
//!
//! This module ties together the grid, piece controller, line clear engine
//! and scoring. It owns all of them; renderers and input layers borrow the
//! session (or a [`GameSnapshot`]) and never mutate its parts directly.
//!
//! The host drives it with [`GameSession::tick`] once per frame. While a
//! line clear is animating, ticks only advance the animation clock; piece
//! gravity and input resume once the clear is scored.

use crate::controller::{PieceController, TOWARD_LOCK};
use crate::grid::Grid;
use crate::line_clear::{ClearStep, ClearTiming, LineClearEngine};
use crate::pieces::Piece;
use crate::rng::PieceFactory;
use crate::scoring::Stats;
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::*;

/// Coarse lifecycle; `Paused` and `Clearing` are layered on top in
/// [`GameSession::state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Lifecycle {
    NotStarted,
    Running,
    GameOver,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    controller: PieceController,
    line_clear: LineClearEngine,
    stats: Stats,
    drop_timer_ms: u32,
    lifecycle: Lifecycle,
    paused: bool,
    debug: bool,
    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Create a session with the default rules and the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    /// Create a session with custom rules
    pub fn with_config(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u32) -> Self {
        Self {
            grid: Grid::new(),
            controller: PieceController::new(PieceFactory::new(seed)),
            line_clear: LineClearEngine::new(ClearTiming::from_config(&config)),
            stats: Stats::new(&config),
            drop_timer_ms: 0,
            lifecycle: Lifecycle::NotStarted,
            paused: false,
            debug: false,
            events: Vec::new(),
            config,
        }
    }

    /// Externally visible state
    pub fn state(&self) -> SessionState {
        if self.lifecycle == Lifecycle::GameOver {
            SessionState::GameOver
        } else if self.paused {
            SessionState::Paused
        } else if self.line_clear.is_clearing() {
            SessionState::Clearing
        } else if self.lifecycle == Lifecycle::Running {
            SessionState::Running
        } else {
            SessionState::NotStarted
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> &Piece {
        self.controller.current()
    }

    pub fn next(&self) -> &Piece {
        self.controller.next()
    }

    pub fn line_clear(&self) -> &LineClearEngine {
        &self.line_clear
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn score(&self) -> u32 {
        self.stats.score
    }

    pub fn level(&self) -> u32 {
        self.stats.level
    }

    pub fn lines(&self) -> u32 {
        self.stats.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.stats.drop_interval_ms
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn animation_phase(&self) -> AnimationPhase {
        self.line_clear.phase()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn seed(&self) -> u32 {
        self.controller.seed()
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn controller_mut(&mut self) -> &mut PieceController {
        &mut self.controller
    }

    /// Drain queued events, oldest first
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.board);
        out.current = Some(PieceSnapshot::from(*self.controller.current()));
        out.next = Some(PieceSnapshot::from(*self.controller.next()));
        out.state = self.state();
        out.debug = self.debug;
        out.seed = self.controller.seed();
        out.score = self.stats.score;
        out.level = self.stats.level;
        out.lines = self.stats.lines;
        out.drop_interval_ms = self.stats.drop_interval_ms;
        out.animation.fill_from(&self.line_clear);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Begin play. Returns false unless the session had not started yet.
    pub fn start(&mut self) -> bool {
        if self.lifecycle != Lifecycle::NotStarted {
            return false;
        }
        self.lifecycle = Lifecycle::Running;
        self.paused = false;
        true
    }

    /// Pause a running or clearing session
    pub fn pause(&mut self) -> bool {
        match self.state() {
            SessionState::Running | SessionState::Clearing => {
                self.paused = true;
                true
            }
            _ => false,
        }
    }

    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Fresh grid, stats and timers, two new pieces, back to `NotStarted`
    ///
    /// Any in-flight clear is discarded whatever its phase. Queued events and
    /// debug mode survive.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.stats = Stats::new(&self.config);
        self.drop_timer_ms = 0;
        self.line_clear.cancel();
        self.controller.reset();
        self.lifecycle = Lifecycle::NotStarted;
        self.paused = false;
    }

    /// Main game tick - advance the animation or gravity by `delta_ms`
    ///
    /// Negative deltas are treated as zero. Returns true if anything moved.
    pub fn tick(&mut self, delta_ms: i64) -> bool {
        let delta = delta_ms.clamp(0, u32::MAX as i64) as u32;

        if self.paused || self.lifecycle == Lifecycle::GameOver {
            return false;
        }

        if self.line_clear.is_clearing() {
            self.advance_clear(delta);
            return true;
        }

        if self.lifecycle != Lifecycle::Running {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(delta);
        if self.drop_timer_ms < self.stats.drop_interval_ms {
            return false;
        }

        if !self.controller.try_move(&self.grid, 0, TOWARD_LOCK) {
            self.lock_piece(0);
        }
        self.drop_timer_ms = 0;
        true
    }

    /// Apply a gameplay action. Ignored unless the session is running.
    pub fn handle_input(&mut self, action: GameAction) -> bool {
        if self.state() != SessionState::Running {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.controller.try_move(&self.grid, -1, 0),
            GameAction::MoveRight => self.controller.try_move(&self.grid, 1, 0),
            GameAction::MoveTowardLock => self.controller.try_move(&self.grid, 0, TOWARD_LOCK),
            GameAction::Rotate => self.controller.try_rotate(&self.grid),
            GameAction::HardDrop => {
                let rows = self.controller.hard_drop(&self.grid);
                self.stats.add_hard_drop(rows, &self.config);
                self.lock_piece(rows);
                true
            }
        }
    }

    /// Merge the current piece, look for completed rows, promote the next
    /// piece and check that it fits
    ///
    /// The spawn check runs against the grid as merged, before any completed
    /// rows are removed.
    fn lock_piece(&mut self, hard_drop_rows: u32) {
        let kind = self.controller.current().kind;
        self.controller.merge_into(&mut self.grid);
        self.events.push(SessionEvent::PieceLocked {
            kind,
            hard_drop_rows,
        });

        self.begin_clear();
        self.controller.advance();

        if !self.controller.current_fits(&self.grid) {
            self.game_over();
        }
    }

    fn begin_clear(&mut self) -> bool {
        match self.line_clear.begin(&self.grid) {
            Some(lines) => {
                self.events.push(SessionEvent::LineClearStarted { lines });
                true
            }
            None => false,
        }
    }

    fn advance_clear(&mut self, delta: u32) {
        let pending_lines = self
            .line_clear
            .animation()
            .map_or(0, |anim| anim.cleared_count());

        match self.line_clear.advance(&mut self.grid, delta) {
            ClearStep::Idle => {}
            ClearStep::Running { rows_removed } => {
                if rows_removed {
                    self.events.push(SessionEvent::RowsRemoved {
                        lines: pending_lines,
                    });
                }
            }
            ClearStep::Finished {
                cleared,
                rows_removed,
            } => {
                if rows_removed {
                    self.events
                        .push(SessionEvent::RowsRemoved { lines: cleared });
                }
                self.finish_clear(cleared);
            }
        }
    }

    fn finish_clear(&mut self, cleared: u32) {
        let result = self.stats.apply_line_clear(cleared, &self.config);
        self.events.push(SessionEvent::LineClearFinished {
            lines: cleared,
            score_delta: result.score_delta,
            total_lines: self.stats.lines,
        });
        if result.leveled_up() {
            self.events.push(SessionEvent::LevelUp {
                level: result.level_after,
            });
        }

        self.lifecycle = Lifecycle::Running;
    }

    fn game_over(&mut self) {
        self.events.push(SessionEvent::GameOver {
            final_score: self.stats.score,
        });

        if self.config.auto_reset_on_game_over {
            self.reset();
        } else {
            self.lifecycle = Lifecycle::GameOver;
            self.paused = false;
            self.line_clear.cancel();
        }
    }

    /// Toggle debug mode; returns the new setting
    pub fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    /// Run a debug command. Ignored unless debug mode is on.
    ///
    /// Grid fills are refused while a clear is animating, since the
    /// animation's row snapshots would no longer match the grid.
    pub fn debug(&mut self, command: DebugCommand) -> bool {
        if !self.debug || self.lifecycle == Lifecycle::GameOver {
            return false;
        }

        match command {
            DebugCommand::FillTestRows if !self.line_clear.is_clearing() => {
                self.fill_test_rows();
                true
            }
            DebugCommand::FillRandomPattern if !self.line_clear.is_clearing() => {
                self.fill_random_pattern();
                true
            }
            DebugCommand::TriggerLineClear => self.begin_clear(),
            _ => false,
        }
    }

    /// Rows 0..5: rows 1 and 3 complete, the rest filled in columns 0..8.
    fn fill_test_rows(&mut self) {
        for y in 0..5i8 {
            for x in 0..BOARD_WIDTH as i8 {
                if y == 1 || y == 3 || x < 8 {
                    let color = self.controller.factory_mut().random_color();
                    self.grid.set(x, y, color);
                }
            }
        }
    }

    /// Fresh grid; rows 2, 4 and 6 complete, rows 0..8 otherwise 70% full.
    fn fill_random_pattern(&mut self) {
        self.grid.clear();
        for y in 0..8i8 {
            for x in 0..BOARD_WIDTH as i8 {
                let factory = self.controller.factory_mut();
                if y == 2 || y == 4 || y == 6 || factory.random_unit() < 0.7 {
                    let color = factory.random_color();
                    self.grid.set(x, y, color);
                }
            }
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}

//! Terminal runner (default binary).
//!
//! Usage: `updown-tetris [config.json]`
//!
//! Pieces spawn at the bottom of the well and rise toward the top, where
//! they lock. The optional JSON file overrides any subset of `GameConfig`.

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use updown_tetris::core::{GameSession, GameSnapshot};
use updown_tetris::input::{handle_key_event, should_quit, InputCommand};
use updown_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use updown_tetris::types::{GameConfig, SessionEvent, TICK_MS};

fn main() -> Result<()> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => GameConfig::default(),
    };
    let mut session = GameSession::with_config(config, clock_seed()).context("invalid config")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();

    let summary = result?;
    eprintln!(
        "score {} level {} lines {} games {}",
        session.score(),
        session.level(),
        session.lines(),
        summary.games_over
    );
    if let Some(best) = summary.best_final_score {
        eprintln!("best final score {best}");
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&text)
        .with_context(|| format!("parse config {}", path.display()))?;
    Ok(config)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[derive(Debug, Default)]
struct Summary {
    games_over: u32,
    best_final_score: Option<u32>,
}

impl Summary {
    fn record(&mut self, events: &[SessionEvent]) {
        for event in events {
            if let SessionEvent::GameOver { final_score } = *event {
                self.games_over += 1;
                self.best_final_score = self.best_final_score.max(Some(final_score));
            }
        }
    }
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<Summary> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut summary = Summary::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(summary);
                    }
                    if let Some(command) = handle_key_event(key) {
                        apply(session, command);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick with the real elapsed time so slow frames do not slow the game.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            session.tick(elapsed.as_millis() as i64);
            summary.record(&session.take_events());
        }
    }
}

fn apply(session: &mut GameSession, command: InputCommand) {
    match command {
        InputCommand::Game(action) => {
            session.handle_input(action);
        }
        InputCommand::Start => {
            session.start();
        }
        InputCommand::TogglePause => {
            session.toggle_pause();
        }
        InputCommand::Reset => session.reset(),
        InputCommand::ToggleDebug => {
            session.toggle_debug();
        }
        InputCommand::Debug(cmd) => {
            session.debug(cmd);
        }
    }
}

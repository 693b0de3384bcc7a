//! Integration tests for the session state machine

use updown_tetris::core::{GameSession, Piece};
use updown_tetris::types::{
    AnimationPhase, DebugCommand, GameAction, GameConfig, SessionEvent, SessionState,
};

fn debug_session(seed: u32) -> GameSession {
    let mut s = GameSession::new(seed);
    s.set_debug(true);
    s
}

fn count_rows_removed(events: &[SessionEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, SessionEvent::RowsRemoved { .. }))
        .count()
}

#[test]
fn test_game_lifecycle() {
    let mut s = GameSession::new(12345);
    assert_eq!(s.state(), SessionState::NotStarted);

    assert!(s.start());
    assert_eq!(s.state(), SessionState::Running);
    assert!(!s.start());

    assert!(s.toggle_pause());
    assert_eq!(s.state(), SessionState::Paused);
    assert!(s.toggle_pause());
    assert_eq!(s.state(), SessionState::Running);

    s.reset();
    assert_eq!(s.state(), SessionState::NotStarted);
}

#[test]
fn test_inputs_are_no_ops_unless_running() {
    let mut s = GameSession::new(12345);
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::MoveTowardLock,
        GameAction::Rotate,
        GameAction::HardDrop,
    ] {
        assert!(!s.handle_input(action));
    }
    assert_eq!(s.grid().occupied_count(), 0);

    s.start();
    s.pause();
    assert!(!s.handle_input(GameAction::HardDrop));
    assert_eq!(s.grid().occupied_count(), 0);
}

#[test]
fn test_move_toward_lock_decrements_row() {
    let mut s = GameSession::new(12345);
    s.start();
    let y = s.current().y;
    assert!(s.handle_input(GameAction::MoveTowardLock));
    assert_eq!(s.current().y, y - 1);
}

#[test]
fn test_hard_drop_adds_two_points_per_row() {
    for seed in [1, 2, 3, 99, 12345] {
        let mut s = GameSession::new(seed);
        s.start();
        assert!(s.handle_input(GameAction::HardDrop));

        let rows = s
            .take_events()
            .iter()
            .find_map(|e| match e {
                SessionEvent::PieceLocked { hard_drop_rows, .. } => Some(*hard_drop_rows),
                _ => None,
            })
            .unwrap();
        assert!(rows > 0);
        assert_eq!(s.score(), 2 * rows);
        assert_eq!(s.grid().occupied_count(), 4);
    }
}

#[test]
fn test_reset_twice_equals_once() {
    let mut a = debug_session(5);
    a.start();
    a.handle_input(GameAction::HardDrop);
    a.debug(DebugCommand::FillRandomPattern);
    a.debug(DebugCommand::TriggerLineClear);
    a.tick(4_000);

    a.reset();
    let once = a.snapshot();
    a.reset();
    let twice = a.snapshot();

    assert_eq!(once.board, twice.board);
    assert_eq!(once.state, twice.state);
    assert_eq!(
        (once.score, once.level, once.lines, once.drop_interval_ms),
        (twice.score, twice.level, twice.lines, twice.drop_interval_ms)
    );
    assert_eq!(once.animation, twice.animation);
    assert_eq!(twice.state, SessionState::NotStarted);
    assert_eq!(twice.animation.phase, AnimationPhase::Idle);

    // Two fresh pieces, both at their spawn placement.
    for snap in [&once, &twice] {
        assert!(snap.current.is_some() && snap.next.is_some());
        for piece in [snap.current.unwrap(), snap.next.unwrap()] {
            let spawn = Piece::new(piece.kind);
            assert_eq!((piece.x, piece.y), (spawn.x, spawn.y));
            assert_eq!(piece.shape, spawn.shape);
        }
    }
    assert_eq!(a.current().y, 19);
    assert_eq!(a.grid().occupied_count(), 0);
}

#[test]
fn test_rows_removed_exactly_once_at_glow_boundary() {
    let mut s = debug_session(12345);
    s.start();
    s.debug(DebugCommand::FillTestRows);
    assert!(s.debug(DebugCommand::TriggerLineClear));
    s.take_events();

    let mut removed_at = None;
    let mut elapsed = 0;
    let mut removals = 0;
    while s.state() == SessionState::Clearing {
        s.tick(16);
        elapsed += 16;
        let n = count_rows_removed(&s.take_events());
        if n > 0 && removed_at.is_none() {
            removed_at = Some(elapsed);
        }
        removals += n;
    }

    assert_eq!(removals, 1);
    // 16ms steps first reach 3000ms at 3008ms.
    assert_eq!(removed_at, Some(3008));
    assert!(elapsed >= 6000);
    assert_eq!(s.lines(), 2);
    assert_eq!(s.score(), 200);
    assert_eq!(s.grid().height(), 20);
    assert!(s.grid().completed_rows().is_empty());
}

#[test]
fn test_pause_during_clear_freezes_animation() {
    let mut s = debug_session(12345);
    s.start();
    s.debug(DebugCommand::FillTestRows);
    s.debug(DebugCommand::TriggerLineClear);
    s.tick(2_000);

    s.pause();
    s.tick(100_000);
    assert_eq!(s.snapshot().animation.elapsed_ms, 2_000);
    assert_eq!(s.animation_phase(), AnimationPhase::Glow);

    // Debug commands still run while paused; a fill is refused mid-clear.
    assert!(!s.debug(DebugCommand::FillTestRows));

    s.resume();
    assert_eq!(s.state(), SessionState::Clearing);
    s.tick(1_000);
    assert_eq!(s.animation_phase(), AnimationPhase::Shift);
}

#[test]
fn test_negative_tick_is_ignored() {
    let mut s = debug_session(12345);
    s.start();
    s.debug(DebugCommand::FillTestRows);
    s.debug(DebugCommand::TriggerLineClear);
    s.tick(1_000);
    s.tick(-5_000);
    assert_eq!(s.snapshot().animation.elapsed_ms, 1_000);
}

#[test]
fn test_clear_finish_events_in_order() {
    let mut s = debug_session(12345);
    s.start();
    s.debug(DebugCommand::FillRandomPattern);
    s.debug(DebugCommand::TriggerLineClear);
    let started = s.take_events();
    let lines = match started.as_slice() {
        [SessionEvent::LineClearStarted { lines }] => *lines,
        other => panic!("unexpected events {other:?}"),
    };
    assert!(lines >= 3);

    s.tick(6_000);
    let events = s.take_events();
    assert_eq!(events[0], SessionEvent::RowsRemoved { lines });
    assert_eq!(
        events[1],
        SessionEvent::LineClearFinished {
            lines,
            score_delta: lines * 100,
            total_lines: lines
        }
    );
}

#[test]
fn test_custom_config_changes_clear_timing() {
    let cfg = GameConfig {
        clear_duration_ms: 1_000,
        glow_ratio: 0.25,
        ..GameConfig::default()
    };
    let mut s = GameSession::with_config(cfg, 12345).unwrap();
    s.set_debug(true);
    s.start();
    s.debug(DebugCommand::FillTestRows);
    s.debug(DebugCommand::TriggerLineClear);

    s.tick(249);
    assert_eq!(s.animation_phase(), AnimationPhase::Glow);
    s.tick(1);
    assert_eq!(s.animation_phase(), AnimationPhase::Shift);
    s.tick(750);
    assert_eq!(s.state(), SessionState::Running);
    assert_eq!(s.lines(), 2);
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut s = GameSession::new(seed);
        s.start();
        let mut kinds = Vec::new();
        for _ in 0..20 {
            kinds.push(s.current().kind);
            s.handle_input(GameAction::MoveLeft);
            s.handle_input(GameAction::HardDrop);
            s.tick(6_000);
        }
        (kinds, s.snapshot().board, s.score())
    };
    assert_eq!(play(42), play(42));
}

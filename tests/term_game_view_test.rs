use updown_tetris::core::{GameSession, GameSnapshot};
use updown_tetris::term::{piece_rgb, GameView, Viewport};
use updown_tetris::types::{DebugCommand, PieceKind, SessionState};

fn screen_text(fb: &updown_tetris::term::FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row(y).iter().map(|g| g.ch).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameSession::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1 the well is 20x20, 22x22 with its border.
    let vp = Viewport::new(22, 22);
    let fb = view.render(&snap, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_lock_edge_cell_two_chars_wide_at_top() {
    let mut snap = GameSnapshot::default();
    snap.board[0][0] = PieceKind::I.color();

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(1, 1).unwrap().ch, '█');
    assert_eq!(fb.get(2, 1).unwrap().ch, '█');
    assert_eq!(fb.get(1, 1).unwrap().style.fg, piece_rgb(PieceKind::I));
    assert_eq!(fb.get(3, 1).unwrap().ch, '·');
}

#[test]
fn term_view_draws_spawned_piece_near_bottom() {
    let mut session = GameSession::new(7);
    session.start();
    let snap = session.snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    for (x, y) in snap.current.unwrap().cells() {
        let cell = fb.get(1 + x as u16 * 2, 1 + y as u16).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, piece_rgb(snap.current.unwrap().kind));
    }
}

#[test]
fn term_view_side_panel_shows_stats_and_debug() {
    let mut session = GameSession::new(3);
    session.start();
    session.toggle_debug();
    session.debug(DebugCommand::FillTestRows);
    session.debug(DebugCommand::TriggerLineClear);
    session.tick(6_000);

    let snap = session.snapshot();
    assert_eq!(snap.state, SessionState::Running);
    let view = GameView::default();
    let text = screen_text(&view.render(&snap, view.min_viewport()));

    assert!(text.contains("SCORE"));
    assert!(text.contains("200"));
    assert!(text.contains("LINES"));
    assert!(text.contains("NEXT"));
    assert!(text.contains("running"));
    assert!(text.contains("DEBUG"));
    assert!(text.contains("seed"));
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let session = GameSession::new(1);
    let snap = session.snapshot();
    let view = GameView::default();
    let vp = Viewport::new(60, 24);

    let mut fb = view.render(&snap, vp);
    let once = fb.clone();
    view.render_into(&snap, vp, &mut fb);
    assert_eq!(fb, once);
}

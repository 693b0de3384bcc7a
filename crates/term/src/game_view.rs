//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Grid row 0 is the lock edge and is drawn at the top of the well, so
//! pieces visibly rise from the bottom. During a line clear the view draws
//! glowing rows in the glow phase and, in the shift phase, draws each moving
//! row from its snapshot at `original_row + offset` instead of at its
//! compacted grid position.

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{AnimationPhase, PieceKind, SessionState, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const GLOW: Rgb = Rgb::new(255, 255, 255);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the well frame lands inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Terminal size needed to show the well and the side panel.
    pub fn min_viewport(&self) -> Viewport {
        Viewport::new(
            BOARD_WIDTH as u16 * self.cell_w + 2 + 2 + 16,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let board_w = BOARD_WIDTH as u16 * self.cell_w;
        let board_h = BOARD_HEIGHT as u16 * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w + 18) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            w: frame_w,
            h: frame_h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_w,
            board_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), WELL_BG),
        );
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)));

        self.draw_board(fb, frame, snap);

        // The piece is frozen and hidden while rows are being cleared.
        if snap.animation.phase == AnimationPhase::Idle {
            if let Some(piece) = snap.current {
                self.draw_piece(fb, frame, &piece);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.state {
            SessionState::NotStarted => draw_overlay_text(fb, frame, "PRESS ENTER"),
            SessionState::Paused => draw_overlay_text(fb, frame, "PAUSED"),
            SessionState::GameOver => draw_overlay_text(fb, frame, "GAME OVER"),
            SessionState::Running | SessionState::Clearing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot) {
        let anim = &snap.animation;
        let shifting = anim.phase == AnimationPhase::Shift;

        for y in 0..BOARD_HEIGHT {
            // Move targets hold compacted content; the moving row draws it.
            if shifting && anim.is_move_target(y) {
                continue;
            }
            let glow = anim.glowing[y as usize].then_some(anim.glow_intensity);
            for (x, &cell) in snap.board[y as usize].iter().enumerate() {
                self.draw_grid_cell(fb, frame, x as u16, y as i32, cell, glow);
            }
        }

        if shifting {
            for moving in &anim.moving {
                let row = moving.row.original_row as i32 + moving.offset.round() as i32;
                for (x, &cell) in moving.row.cells.iter().enumerate() {
                    self.draw_grid_cell(fb, frame, x as u16, row, cell, None);
                }
            }
        }
    }

    fn draw_grid_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: u16,
        y: i32,
        cell: u8,
        glow: Option<f32>,
    ) {
        if !(0..BOARD_HEIGHT as i32).contains(&y) {
            return;
        }
        let y = y as u16;
        match PieceKind::from_color(cell) {
            Some(kind) => {
                let fg = match glow {
                    Some(t) => piece_rgb(kind).lerp(GLOW, t),
                    None => piece_rgb(kind),
                };
                let style = CellStyle::new(fg, WELL_BG).bold();
                self.fill_cell(fb, frame, x, y, '█', style);
            }
            None if cell == EMPTY => {
                let style = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
                self.fill_cell(fb, frame, x, y, '·', style);
            }
            None => {}
        }
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, frame: Frame, piece: &PieceSnapshot) {
        let style = CellStyle::new(piece_rgb(piece.kind), WELL_BG).bold();
        for (x, y) in piece.cells() {
            if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                self.fill_cell(fb, frame, x as u16, y as u16, '█', style);
            }
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            let style = CellStyle::new(piece_rgb(next.kind), Rgb::new(0, 0, 0)).bold();
            // Same orientation as the well: local row 0 drawn lowest.
            let n = next.shape.size() as u16;
            for (row, col) in next.shape.occupied() {
                let py = y + (n - 1 - row as u16);
                fb.fill_rect(panel_x + col as u16 * 2, py, 2, 1, '█', style);
            }
            y = y.saturating_add(n);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "STATE", label);
        fb.put_str(panel_x, y + 1, snap.state.as_str(), value);
        y = y.saturating_add(3);

        if snap.debug {
            let dim = value.dim();
            fb.put_str(panel_x, y, "DEBUG", label);
            let cx = fb.put_str(panel_x, y + 1, "seed ", dim);
            fb.put_u32(cx, y + 1, snap.seed, dim);
            let cx = fb.put_str(panel_x, y + 2, "drop ", dim);
            let cx = fb.put_u32(cx, y + 2, snap.drop_interval_ms, dim);
            fb.put_str(cx, y + 2, "ms", dim);
            if snap.animation.phase != AnimationPhase::Idle {
                let cx = fb.put_str(panel_x, y + 3, "clear ", dim);
                let cx = fb.put_u32(cx, y + 3, snap.animation.elapsed_ms, dim);
                fb.put_str(cx, y + 3, "ms", dim);
            }
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    fb.put_str(x, mid_y, text, style);
}

/// Display colour of a piece kind
pub fn piece_rgb(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

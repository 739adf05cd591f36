//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Rotation, ShapeKind};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

/// Draws the board, the falling piece and a small side panel.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

/// Screen rectangle of the bordered playfield
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::default(), PANEL_BG).cell(' '));

        let board_w = snap.width.saturating_mul(self.cell_w);
        let board_h = snap.height.saturating_mul(self.cell_h);
        let frame = Frame {
            x: viewport.width.saturating_sub(board_w + 2) / 2,
            y: viewport.height.saturating_sub(board_h + 2) / 2,
            w: board_w + 2,
            h: board_h + 2,
        };

        self.draw_border(fb, frame);

        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.cell(x, y).flatten() {
                    Some(kind) => self.draw_block(fb, frame, x, y, kind),
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        if let Some(active) = &snap.active {
            // A landed piece is drawn without bold until it locks.
            let mut style = CellStyle::new(shape_color(active.kind), PLAYFIELD_BG);
            if !active.grounded {
                style = style.bold();
            }
            for &(x, y) in &active.cells {
                if x >= 0 && y >= 0 && (x as u16) < snap.width && (y as u16) < snap.height {
                    self.fill_cell(fb, frame, x as u16, y as u16, '█', style);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_overlay_text(fb, frame, "GAME OVER", 0);
            self.draw_overlay_text(fb, frame, "r: new game", 2);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame) {
        let Frame { x, y, w, h } = frame;
        let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.put_str(x, y, "┌", style);
        fb.put_str(x + w - 1, y, "┐", style);
        fb.put_str(x, y + h - 1, "└", style);
        fb.put_str(x + w - 1, y + h - 1, "┘", style);
        for dx in 1..w - 1 {
            fb.put_str(x + dx, y, "─", style);
            fb.put_str(x + dx, y + h - 1, "─", style);
        }
        for dy in 1..h - 1 {
            fb.put_str(x, y + dy, "│", style);
            fb.put_str(x + w - 1, y + dy, "│", style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        self.fill_cell(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: ShapeKind) {
        let style = CellStyle::new(shape_color(kind), PLAYFIELD_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y += 3;

        fb.put_str(panel_x, y, "PIECES", label);
        fb.put_u32(panel_x, y + 1, snap.pieces, value);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        if let Some(kind) = snap.next {
            fb.put_str(panel_x + 5, y, kind.letter(), value);
            let style = CellStyle::new(shape_color(kind), PANEL_BG).bold();
            for (dx, dy) in get_shape(kind, Rotation::North) {
                fb.fill_rect(panel_x + dx as u16 * 2, y + 1 + dy as u16, 2, 1, '█', style);
            }
        }
        y += 6;

        let help = CellStyle::new(Rgb::new(140, 140, 140), PANEL_BG).dim();
        for line in ["←/→ move", "↑ rotate", "↓ soft drop", "q quit"] {
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str, row_offset: u16) {
        let y = frame.y + frame.h / 2 + row_offset;
        let text_w = text.chars().count() as u16;
        let x = frame.x + frame.w.saturating_sub(text_w) / 2;
        fb.put_str(x, y, text, CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold());
    }
}

/// Block color for a shape kind
pub fn shape_color(kind: ShapeKind) -> Rgb {
    match kind {
        ShapeKind::I => Rgb::new(80, 220, 220),
        ShapeKind::O => Rgb::new(240, 220, 80),
        ShapeKind::T => Rgb::new(200, 120, 220),
        ShapeKind::S => Rgb::new(100, 220, 120),
        ShapeKind::Z => Rgb::new(220, 80, 80),
        ShapeKind::J => Rgb::new(80, 120, 220),
        ShapeKind::L => Rgb::new(255, 165, 0),
    }
}

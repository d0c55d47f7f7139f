//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::clear_animation::ClearAnimation;
use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::palette::{Flavor, Palette};
use crate::types::{Phase, BOARD_HEIGHT, BOARD_WIDTH};

/// Preview area in board cells
const PREVIEW_COLS: u16 = 4;
const PREVIEW_ROWS: u16 = 2;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    palette: Palette,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(Flavor::default())
    }
}

impl GameView {
    /// 2x1 cells help compensate for typical terminal glyph aspect ratio.
    pub fn new(flavor: Flavor) -> Self {
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            palette: flavor.palette(),
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Terminal position of the top-left board cell for `viewport`
    pub fn board_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (start_x + 1, start_y + 1)
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_clear(snap, None, viewport, fb);
    }

    pub fn render_into_with_clear(
        &self,
        snap: &GameSnapshot,
        clearing: Option<&ClearAnimation>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.blank();

        let (frame_w, frame_h) = self.frame_size();
        let (origin_x, origin_y) = self.board_origin(viewport);
        let start_x = origin_x - 1;
        let start_y = origin_y - 1;

        let p = &self.palette;
        let bg = CellStyle::new(p.grid, p.board_bg);
        let border = CellStyle::new(p.grid, Rgb::default());

        // Background for play area.
        fb.fill_rect(origin_x, origin_y, frame_w - 2, frame_h - 2, bg.into_cell(' '));

        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Settled cells.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                match p.cell(cell) {
                    Some(fg) => self.fill_cell_rect(
                        fb,
                        origin_x,
                        origin_y,
                        x as u16,
                        y as u16,
                        '█',
                        CellStyle::new(fg, p.board_bg).bold(),
                    ),
                    None => self.fill_cell_rect(
                        fb,
                        origin_x,
                        origin_y,
                        x as u16,
                        y as u16,
                        '·',
                        bg.dim(),
                    ),
                }
            }
        }

        if let Some(anim) = clearing {
            let sweep = CellStyle::new(p.sweep, p.sweep);
            for &row in anim.rows() {
                for x in 0..BOARD_WIDTH as u16 {
                    if anim.is_swept(row, x) {
                        self.fill_cell_rect(fb, origin_x, origin_y, x, row as u16, ' ', sweep);
                    }
                }
            }
        }

        if let Some(active) = snap.active {
            self.draw_piece(fb, origin_x, origin_y, &active);
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        // Overlays.
        if snap.paused() {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if snap.game_over() {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        } else if snap.phase == Phase::Idle {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PRESS P");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    /// Draw a piece's absolute cells, skipping those above the visible grid
    fn draw_piece(&self, fb: &mut FrameBuffer, origin_x: u16, origin_y: u16, piece: &PieceSnapshot) {
        let style = CellStyle::new(self.palette.piece(piece.kind), self.palette.board_bg).bold();
        for &(row, col) in piece.cells.iter() {
            if row >= 0 && row < BOARD_HEIGHT as i8 && col >= 0 && col < BOARD_WIDTH as i8 {
                self.fill_cell_rect(fb, origin_x, origin_y, col as u16, row as u16, '█', style);
            }
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        origin_x: u16,
        origin_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = origin_x + cell_x * self.cell_w;
        let py = origin_y + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, style.into_cell(ch));
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(self.palette.text, Rgb::default()).bold();
        let value = CellStyle::new(self.palette.text, Rgb::default());

        let mut y = start_y;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, snap.next.as_ref());
        y = y.saturating_add(PREVIEW_ROWS * self.cell_h + 1);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HIGH", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.high_score, value);
        y = y.saturating_add(2);

        if snap.fast_forward {
            fb.put_str(panel_x, y, ">>", value.dim());
        }
    }

    /// Next piece in a small box; its cells are already frame-relative
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, next: Option<&PieceSnapshot>) {
        let bg = CellStyle::new(self.palette.grid, self.palette.preview_bg);
        fb.fill_rect(
            x,
            y,
            PREVIEW_COLS * self.cell_w,
            PREVIEW_ROWS * self.cell_h,
            bg.into_cell(' '),
        );
        let Some(next) = next else {
            return;
        };
        let style = CellStyle::new(self.palette.piece(next.kind), self.palette.preview_bg).bold();
        for &(row, col) in next.cells.iter() {
            if row >= 0 && (row as u16) < PREVIEW_ROWS && col >= 0 && (col as u16) < PREVIEW_COLS {
                fb.fill_rect(
                    x + col as u16 * self.cell_w,
                    y + row as u16 * self.cell_h,
                    self.cell_w,
                    self.cell_h,
                    style.into_cell('█'),
                );
            }
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

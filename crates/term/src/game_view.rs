//! GameView: maps engine snapshots into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Outcome};
use crate::fb::{palette, FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Color, Side, GRID_HEIGHT, GRID_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const BOARD_GAP: u16 = 6;
const PANEL_MIN_W: u16 = 12;

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

/// A lightweight terminal renderer for solo and split-board play.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of one bordered board
    pub fn frame_size(&self) -> (u16, u16) {
        (
            GRID_WIDTH as u16 * self.cell_w + 2,
            GRID_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    fn top(&self, viewport: Viewport, content_h: u16) -> u16 {
        match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(content_h) / 2,
            AnchorY::Top => 0,
        }
    }

    /// Render one game with its side panel.
    ///
    /// Callers can reuse the framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_solo_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let (frame_w, frame_h) = self.frame_size();
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = self.top(viewport, frame_h);
        self.draw_board(fb, snap, x, y);

        let panel_x = x.saturating_add(frame_w).saturating_add(2);
        if panel_x < viewport.width && viewport.width - panel_x >= PANEL_MIN_W {
            self.draw_panel(fb, snap, panel_x, y);
            self.draw_help(fb, panel_x, y.saturating_add(10));
        }
    }

    pub fn render_solo(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_solo_into(snap, viewport, &mut fb);
        fb
    }

    /// Render both sides of a match next to each other.
    ///
    /// Each board gets a two-line header; the outcome banner goes below the
    /// boards once the match is decided.
    pub fn render_versus_into(
        &self,
        one: &GameSnapshot,
        two: &GameSnapshot,
        outcome: Option<Outcome>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let (frame_w, frame_h) = self.frame_size();
        let total_w = frame_w * 2 + BOARD_GAP;
        let content_h = frame_h + 4;
        let left = viewport.width.saturating_sub(total_w) / 2;
        let top = self.top(viewport, content_h);
        let board_y = top.saturating_add(2);

        for (side, snap) in [(Side::One, one), (Side::Two, two)] {
            let x = match side {
                Side::One => left,
                Side::Two => left.saturating_add(frame_w + BOARD_GAP),
            };
            self.draw_header(fb, side, snap, x, top);
            self.draw_board(fb, snap, x, board_y);
        }

        let banner_y = board_y.saturating_add(frame_h).saturating_add(1);
        if let Some(outcome) = outcome {
            let text = match outcome {
                Outcome::Winner(Side::One) => "P1 WINS",
                Outcome::Winner(Side::Two) => "P2 WINS",
                Outcome::Tie => "TIE",
            };
            let style = Style::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold();
            fb.put_centered(left, total_w, banner_y, text, style);
        } else {
            let hint = Style::default().dim();
            fb.put_centered(left, total_w, banner_y, "P1 arrows   P2 WASD", hint);
        }
    }

    pub fn render_versus(
        &self,
        one: &GameSnapshot,
        two: &GameSnapshot,
        outcome: Option<Outcome>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_versus_into(one, two, outcome, viewport, &mut fb);
        fb
    }

    /// Boxed high-score list drawn over an already rendered frame
    pub fn draw_high_scores(&self, fb: &mut FrameBuffer, viewport: Viewport, scores: &[u32]) {
        let rows = scores.len().min(5) as u16;
        let (w, h) = (20u16, rows + 4);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;

        let panel = Style::plain(Rgb::new(220, 220, 220), SCREEN_BG);
        fb.fill_rect(x, y, w, h, ' ', panel);
        draw_border(fb, x, y, w, h, panel);
        fb.put_centered(x, w, y.saturating_add(1), "HIGH SCORES", panel.bold());

        for (i, &score) in scores.iter().take(5).enumerate() {
            let row = y.saturating_add(2 + i as u16);
            let end = fb.put_u32(x.saturating_add(3), row, i as u32 + 1, panel.dim());
            let end = fb.put_str(end, row, ".", panel.dim());
            fb.put_u32(end.saturating_add(1), row, score, panel);
        }
        if scores.is_empty() {
            fb.put_centered(x, w, y.saturating_add(2), "-", panel.dim());
        }
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let (frame_w, frame_h) = self.frame_size();
        let border = Style::plain(Rgb::new(200, 200, 200), SCREEN_BG);
        draw_border(fb, x, y, frame_w, frame_h, border);

        // Locked cells.
        for gy in 0..GRID_HEIGHT as u16 {
            for gx in 0..GRID_WIDTH as u16 {
                match snap.cell(gx as usize, gy as usize) {
                    Some(color) => self.draw_block(fb, x, y, gx, gy, color),
                    None => {
                        let dot = Style::plain(Rgb::new(90, 90, 100), WELL_BG).dim();
                        self.fill_cell_rect(fb, x, y, gx, gy, '·', dot);
                    }
                }
            }
        }

        // Active piece.
        if let Some(active) = snap.active {
            for (cx, cy) in active.cells() {
                if (0..GRID_WIDTH as i8).contains(&cx) && (0..GRID_HEIGHT as i8).contains(&cy) {
                    self.draw_block(fb, x, y, cx as u16, cy as u16, active.color);
                }
            }
        }

        // Overlays.
        let mid = y.saturating_add(frame_h / 2);
        let overlay = Style::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        if snap.game_over {
            fb.put_centered(x, frame_w, mid, "GAME OVER", overlay);
        } else if snap.paused {
            fb.put_centered(x, frame_w, mid, "PAUSED", overlay);
        } else if snap.countdown_ms > 0 {
            let level_x = x.saturating_add(frame_w.saturating_sub(8) / 2);
            let end = fb.put_str(level_x, mid.saturating_sub(1), "LEVEL ", overlay);
            fb.put_u32(end, mid.saturating_sub(1), snap.level, overlay);
            let seconds = snap.countdown_ms.div_ceil(1000);
            let digit_x = x.saturating_add(frame_w / 2);
            fb.put_u32(digit_x, mid.saturating_add(1), seconds, overlay);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, x: u16, y: u16, gx: u16, gy: u16, color: Color) {
        let style = Style::plain(palette(color), WELL_BG).bold();
        self.fill_cell_rect(fb, x, y, gx, gy, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame_x: u16,
        frame_y: u16,
        gx: u16,
        gy: u16,
        ch: char,
        style: Style,
    ) {
        let px = frame_x + 1 + gx * self.cell_w;
        let py = frame_y + 1 + gy * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let label = Style::default().bold();
        let value = Style::plain(Rgb::new(200, 200, 200), SCREEN_BG);

        let rows = [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)];
        for (i, (name, n)) in rows.into_iter().enumerate() {
            let row = y.saturating_add(i as u16 * 3);
            fb.put_str(x, row, name, label);
            fb.put_u32(x, row.saturating_add(1), n, value);
        }
    }

    fn draw_header(&self, fb: &mut FrameBuffer, side: Side, snap: &GameSnapshot, x: u16, y: u16) {
        let label = Style::default().bold();
        let value = Style::plain(Rgb::new(200, 200, 200), SCREEN_BG);

        let end = fb.put_str(x, y, side.label(), label);
        let end = fb.put_str(end.saturating_add(1), y, "SCORE ", value);
        fb.put_u32(end, y, snap.score, value);

        let end = fb.put_str(x, y.saturating_add(1), "LVL ", value);
        let end = fb.put_u32(end, y.saturating_add(1), snap.level, value);
        let end = fb.put_str(end.saturating_add(1), y.saturating_add(1), "LINES ", value);
        fb.put_u32(end, y.saturating_add(1), snap.lines, value);
    }

    fn draw_help(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        let hint = Style::default().dim();
        let lines = ["←→ move", "↑ rotate", "↓ drop", "p pause", "r restart", "q quit"];
        for (i, line) in lines.iter().enumerate() {
            fb.put_str(x, y.saturating_add(i as u16), line, hint);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
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

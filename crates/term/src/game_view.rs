//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::feedback::{Feedback, FloatingMessage, Highlight};
use crate::types::{GameState, Tile, BOARD_SIZE};

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

const BACKGROUND: Rgb = Rgb::new(250, 248, 239);
const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_CELL: Rgb = Rgb::new(205, 193, 180);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);
const SUPER_TILE: Rgb = Rgb::new(60, 58, 50);
const WIN_TEXT: Rgb = Rgb::new(0, 128, 0);
const LOSE_TEXT: Rgb = Rgb::new(184, 134, 11);
const ACCENT: Rgb = Rgb::new(76, 175, 80);

/// Largest tile edge (and gap) a view accepts, in terminal cells.
pub const MAX_CELL_SIZE: u16 = 32;

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    /// Spacing between tiles (and between tiles and the border).
    gap: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 6x3 keeps tiles roughly square with typical terminal glyphs and fits "2048".
        Self {
            cell_w: 6,
            cell_h: 3,
            gap: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    /// Tile sizes are clamped to `1..=MAX_CELL_SIZE`.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_SIZE),
            cell_h: cell_h.clamp(1, MAX_CELL_SIZE),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_gap(mut self, gap: u16) -> Self {
        self.gap = gap.min(MAX_CELL_SIZE);
        self
    }

    /// Outer size of the bordered board in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        let n = BOARD_SIZE as u16;
        let span = |cell: u16| {
            n.saturating_mul(cell)
                .saturating_add((n + 1).saturating_mul(self.gap))
                .saturating_add(2)
        };
        (span(self.cell_w), span(self.cell_h))
    }

    /// Top-left terminal cell of the tile at (row, col), given the frame origin.
    pub fn tile_origin(&self, start_x: u16, start_y: u16, row: u16, col: u16) -> (u16, u16) {
        let offset = |start: u16, index: u16, cell: u16| {
            start
                .saturating_add(1 + self.gap)
                .saturating_add(index.saturating_mul(cell.saturating_add(self.gap)))
        };
        (offset(start_x, col, self.cell_w), offset(start_y, row, self.cell_h))
    }

    /// Frame origin for a viewport.
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_feedback(snap, None, viewport, fb);
    }

    pub fn render_into_with_feedback(
        &self,
        snap: &GameSnapshot,
        feedback: Option<&Feedback>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.frame_origin(viewport);

        let board = CellStyle::new(DARK_TEXT, BOARD_BG);
        fb.fill_rect(start_x + 1, start_y + 1, frame_w.saturating_sub(2), frame_h.saturating_sub(2), ' ', board);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, board.bold());

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let (x, y) = self.tile_origin(start_x, start_y, row as u16, col as u16);
                match snap.board.cells[row][col] {
                    Some(tile) => {
                        let highlight = feedback.map_or(Highlight::None, |f| f.highlight(tile.id));
                        self.draw_tile(fb, x, y, &tile, highlight);
                    }
                    None => {
                        let empty = CellStyle::new(EMPTY_CELL, EMPTY_CELL);
                        fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', empty);
                    }
                }
            }
        }

        if let Some(feedback) = feedback {
            // Oldest first so the newest message ends up on top.
            for msg in feedback.messages() {
                self.draw_message(fb, start_x, start_y, frame_w, msg);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        // Overlays.
        match snap.state {
            GameState::NotStarted => self.draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                ("2048", ACCENT),
                "PRESS ENTER TO START",
            ),
            GameState::Won => self.draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                ("I've grown up perfectly!", WIN_TEXT),
                "PRESS R TO PLAY AGAIN",
            ),
            GameState::Lost => self.draw_overlay(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                ("I've grown up one more time!", LOSE_TEXT),
                "PRESS R TO GROW UP AGAIN",
            ),
            GameState::InProgress => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_feedback(
        &self,
        snap: &GameSnapshot,
        feedback: Option<&Feedback>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_feedback(snap, feedback, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);

        fb.put_char(x, y, '╭', style);
        fb.put_char(right, y, '╮', style);
        fb.put_char(x, bottom, '╰', style);
        fb.put_char(right, bottom, '╯', style);

        for dx in 1..w - 1 {
            fb.put_char(x.saturating_add(dx), y, '─', style);
            fb.put_char(x.saturating_add(dx), bottom, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y.saturating_add(dy), '│', style);
            fb.put_char(right, y.saturating_add(dy), '│', style);
        }
    }

    /// Float a merge message in the gap row above its merge cell, centred on
    /// the cell's column and kept inside the border.
    fn draw_message(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, frame_w: u16, msg: &FloatingMessage) {
        let (tile_x, tile_y) = self.tile_origin(start_x, start_y, msg.pos.row as u16, msg.pos.col as u16);
        let y = tile_y.saturating_sub(1).max(start_y.saturating_add(1));

        let inner_x = start_x.saturating_add(1);
        let inner_w = frame_w.saturating_sub(2);
        let len = (msg.text.chars().count() as u16).min(inner_w);

        let center = tile_x.saturating_add(self.cell_w / 2);
        let x = center
            .saturating_sub(len / 2)
            .min(inner_x.saturating_add(inner_w - len))
            .max(inner_x);

        let style = CellStyle::new(ACCENT, BACKGROUND).bold();
        fb.put_str_centered(x, y, len, msg.text, style);
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, x: u16, y: u16, tile: &Tile, highlight: Highlight) {
        let (bg, fg) = tile_colors(tile.value);
        let mut style = CellStyle::new(fg, bg);
        match highlight {
            Highlight::Merged => style = style.bold(),
            Highlight::Spawned => style = style.dim(),
            Highlight::None => {}
        }
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', style);

        let mid_y = y.saturating_add(self.cell_h / 2);
        let mut digits = [0u8; 10];
        fb.put_str_centered(x, mid_y, self.cell_w, format_value(tile.value, &mut digits), style.bold());
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
        if panel_w < 10 {
            return;
        }

        let label = CellStyle::new(DARK_TEXT, BACKGROUND).bold();
        let value = CellStyle::new(DARK_TEXT, BACKGROUND);

        let mut y = start_y;
        for (name, n) in [("SCORE", snap.score), ("MAX", snap.max_tile), ("MOVES", snap.moves)] {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, n, value);
            y = y.saturating_add(2);
        }

        let help = value.dim();
        for line in ["arrows/wasd move", "r restart", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        (title, color): (&str, Rgb),
        hint: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let band = CellStyle::new(DARK_TEXT, BACKGROUND);
        fb.fill_rect(start_x + 1, mid_y.saturating_sub(1), frame_w.saturating_sub(2), 3, ' ', band);
        fb.put_str_centered(start_x, mid_y.saturating_sub(1), frame_w, title, CellStyle::new(color, BACKGROUND).bold());
        fb.put_str_centered(start_x, mid_y.saturating_add(1), frame_w, hint, band);
    }
}

/// Background and text colour for a tile value.
pub fn tile_colors(value: u32) -> (Rgb, Rgb) {
    let bg = match value {
        2 => Rgb::new(238, 228, 218),
        4 => Rgb::new(237, 224, 200),
        8 => Rgb::new(242, 177, 121),
        16 => Rgb::new(245, 149, 99),
        32 => Rgb::new(246, 124, 95),
        64 => Rgb::new(246, 94, 59),
        128 => Rgb::new(237, 207, 114),
        256 => Rgb::new(237, 204, 97),
        512 => Rgb::new(237, 200, 80),
        1024 => Rgb::new(237, 197, 63),
        2048 => Rgb::new(237, 194, 46),
        _ => SUPER_TILE,
    };
    let fg = if value <= 4 { DARK_TEXT } else { LIGHT_TEXT };
    (bg, fg)
}

/// Format a value into `buf` without allocating.
fn format_value(value: u32, buf: &mut [u8; 10]) -> &str {
    let mut n = value;
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    std::str::from_utf8(&buf[start..]).unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Game};
    use crate::types::{Direction, Pos};

    #[test]
    fn default_frame_fits_an_80x24_terminal() {
        let (w, h) = GameView::default().frame_size();
        assert_eq!((w, h), (31, 19));
        assert!(w < 80 && h < 24);
    }

    #[test]
    fn oversized_cells_are_clamped_and_render() {
        let mut game = Game::new(1);
        game.start();
        let snap = game.snapshot();

        let view = GameView::new(20000, u16::MAX).with_gap(u16::MAX);
        let (w, h) = view.frame_size();
        let n = BOARD_SIZE as u16;
        assert_eq!(w, n * MAX_CELL_SIZE + (n + 1) * MAX_CELL_SIZE + 2);
        assert_eq!(h, w);

        let fb = view.render(&snap, Viewport::new(80, 24));
        assert_eq!((fb.width(), fb.height()), (80, 24));
        assert_eq!(view.tile_origin(u16::MAX, u16::MAX, 3, 3), (u16::MAX, u16::MAX));
    }

    #[test]
    fn zero_cells_become_one() {
        let view = GameView::new(0, 0).with_gap(0);
        assert_eq!(view.frame_size(), (6, 6));
    }

    #[test]
    fn merge_message_floats_above_its_cell() {
        let board = Board::from_values([[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 2, 2]]);
        let mut game = Game::from_board(1, board);
        let result = game.apply_move(Direction::Right);
        assert_eq!(result.merges[0].pos, Pos::new(3, 3));

        let mut feedback = Feedback::new(1);
        feedback.on_move(&result);
        let text = feedback.latest_message().unwrap().text;

        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render_with_feedback(&game.snapshot(), Some(&feedback), Viewport::new(31, 19));

        // Gap row above row 3, inside the border.
        let (_, tile_y) = view.tile_origin(0, 0, 3, 3);
        let row: String = fb.row_text(tile_y - 1).chars().skip(1).take(29).collect();
        let shown = row.trim();
        assert!(!shown.is_empty());
        assert!(text.contains(shown), "{:?} not in {:?}", shown, text);

        // Pushed toward the right edge, against the border.
        assert_ne!(fb.get(29, tile_y - 1).unwrap().ch, ' ');
        assert_eq!(fb.get(30, tile_y - 1).unwrap().ch, '│');
    }

    #[test]
    fn side_panel_labels_the_largest_tile_max() {
        let mut game = Game::new(1);
        game.start();
        let fb = GameView::default().render(&game.snapshot(), Viewport::new(80, 24));
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("MAX"));
        assert!(!text.contains("BEST"));
    }

    #[test]
    fn format_value_writes_digits() {
        let mut buf = [0u8; 10];
        assert_eq!(format_value(2048, &mut buf), "2048");
        assert_eq!(format_value(2, &mut buf), "2");
        assert_eq!(format_value(u32::MAX, &mut buf), "4294967295");
    }

    #[test]
    fn small_and_large_tiles_use_different_text() {
        assert_eq!(tile_colors(2).1, DARK_TEXT);
        assert_eq!(tile_colors(8).1, LIGHT_TEXT);
        assert_eq!(tile_colors(4096).0, SUPER_TILE);
    }
}

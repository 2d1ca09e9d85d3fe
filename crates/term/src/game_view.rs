//! GameView: maps core game state into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested. Each field cell is two terminal
//! columns wide to compensate for glyph aspect ratio.

use blockfall_core::{Game, Shape};
use blockfall_types::{CellColor, PieceKind, FIELD_COLS, FIELD_ROWS};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

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

/// Field cell width in terminal columns.
const CELL_W: u16 = 2;
/// Width of the hold/next side panels.
const PANEL_W: u16 = 10;

fn color_rgb(color: CellColor) -> Rgb {
    match color {
        CellColor::Purple => Rgb::new(160, 70, 200),
        CellColor::Green => Rgb::new(80, 200, 90),
        CellColor::Red => Rgb::new(220, 60, 60),
        CellColor::Orange => Rgb::new(240, 150, 40),
        CellColor::Blue => Rgb::new(70, 100, 230),
        CellColor::Yellow => Rgb::new(230, 210, 50),
        CellColor::Cyan => Rgb::new(70, 200, 220),
    }
}

fn block_style(color: CellColor) -> CellStyle {
    CellStyle {
        fg: color_rgb(color),
        bg: Rgb::new(0, 0, 0),
        bold: false,
        dim: false,
    }
}

fn label_style() -> CellStyle {
    CellStyle {
        fg: Rgb::new(200, 200, 200),
        bg: Rgb::new(0, 0, 0),
        bold: true,
        dim: false,
    }
}

fn ghost_style() -> CellStyle {
    CellStyle {
        fg: Rgb::new(140, 140, 140),
        bg: Rgb::new(0, 0, 0),
        bold: false,
        dim: true,
    }
}

/// Renders the playfield, side panels, and score readout.
#[derive(Default)]
pub struct GameView;

impl GameView {
    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, game: &Game, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let field_w = FIELD_COLS as u16 * CELL_W;
        let field_x = PANEL_W + 2;
        let field_y = 1;

        self.draw_frame(fb, field_x - 1, field_y - 1, field_w + 2, FIELD_ROWS as u16 + 2);
        self.draw_field(game, fb, field_x, field_y);
        self.draw_ghost(game, fb, field_x, field_y);
        self.draw_active(game, fb, field_x, field_y);

        self.draw_hold_panel(game, fb, 0, field_y);
        let right_x = field_x + field_w + 2;
        self.draw_next_panel(game, fb, right_x, field_y);
        self.draw_status(game, fb, right_x, field_y + 17);

        if game.is_game_over() {
            let msg = " GAME OVER - press r ";
            let x = (field_x + field_w / 2).saturating_sub(msg.len() as u16 / 2);
            fb.put_str(x, field_y + FIELD_ROWS as u16 / 2, msg, label_style());
        }
    }

    /// Convenience wrapper allocating a fresh framebuffer.
    pub fn render(&self, game: &Game, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(game, viewport, &mut fb);
        fb
    }

    fn draw_frame(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = label_style();
        for dx in 1..w.saturating_sub(1) {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h.saturating_sub(1) {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
    }

    fn put_block(&self, fb: &mut FrameBuffer, x: u16, y: u16, ch: char, style: CellStyle) {
        fb.put_char(x, y, ch, style);
        fb.put_char(x + 1, y, ch, style);
    }

    fn draw_field(&self, game: &Game, fb: &mut FrameBuffer, origin_x: u16, origin_y: u16) {
        for y in 0..FIELD_ROWS as i8 {
            for x in 0..FIELD_COLS as i8 {
                let px = origin_x + x as u16 * CELL_W;
                let py = origin_y + y as u16;
                match game.field().get(x, y).flatten() {
                    Some(color) => self.put_block(fb, px, py, '█', block_style(color)),
                    None => self.put_block(fb, px, py, ' ', CellStyle::default()),
                }
            }
        }
    }

    fn draw_ghost(&self, game: &Game, fb: &mut FrameBuffer, origin_x: u16, origin_y: u16) {
        let (Some(active), Some(ghost_y)) = (game.active(), game.ghost_row()) else {
            return;
        };
        for &(dx, dy) in active.shape.minos().iter() {
            let x = active.x + dx;
            let y = ghost_y + dy;
            if x >= 0 && (x as usize) < FIELD_COLS && y >= 0 && (y as usize) < FIELD_ROWS {
                let px = origin_x + x as u16 * CELL_W;
                let py = origin_y + y as u16;
                self.put_block(fb, px, py, '░', ghost_style());
            }
        }
    }

    fn draw_active(&self, game: &Game, fb: &mut FrameBuffer, origin_x: u16, origin_y: u16) {
        let Some(active) = game.active() else {
            return;
        };
        let style = block_style(active.color());
        for &(dx, dy) in active.shape.minos().iter() {
            let x = active.x + dx;
            let y = active.y + dy;
            // Rows above the visible field are simply not drawn.
            if x >= 0 && (x as usize) < FIELD_COLS && y >= 0 && (y as usize) < FIELD_ROWS {
                let px = origin_x + x as u16 * CELL_W;
                let py = origin_y + y as u16;
                self.put_block(fb, px, py, '█', style);
            }
        }
    }

    fn draw_mini_piece(&self, fb: &mut FrameBuffer, kind: PieceKind, x: u16, y: u16) {
        let shape = Shape::spawn(kind);
        let style = block_style(kind.color());
        for &(dx, dy) in shape.minos().iter() {
            self.put_block(fb, x + dx as u16 * CELL_W, y + dy as u16, '█', style);
        }
    }

    fn draw_hold_panel(&self, game: &Game, fb: &mut FrameBuffer, x: u16, y: u16) {
        fb.put_str(x, y, "HOLD", label_style());
        if let Some(kind) = game.hold_piece() {
            self.draw_mini_piece(fb, kind, x, y + 2);
        }
        if !game.can_hold() {
            fb.put_str(x, y + 5, "(used)", ghost_style());
        }
    }

    fn draw_next_panel(&self, game: &Game, fb: &mut FrameBuffer, x: u16, y: u16) {
        fb.put_str(x, y, "NEXT", label_style());
        for (i, &kind) in game.next_queue().iter().enumerate() {
            self.draw_mini_piece(fb, kind, x, y + 2 + i as u16 * 3);
        }
    }

    fn draw_status(&self, game: &Game, fb: &mut FrameBuffer, x: u16, y: u16) {
        let style = label_style();
        fb.put_str(x, y, &format!("SCORE {}", game.score()), style);
        fb.put_str(x, y + 1, &format!("LEVEL {}", game.level()), style);
        fb.put_str(x, y + 2, &format!("LINES {}", game.lines()), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(fb: &FrameBuffer) -> String {
        let mut out = String::new();
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                out.push(fb.get(x, y).unwrap().ch);
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn renders_panels_and_score() {
        let mut game = Game::new(1);
        game.start();
        let fb = GameView.render(&game, Viewport::new(80, 24));
        let text = chars(&fb);
        assert!(text.contains("NEXT"));
        assert!(text.contains("HOLD"));
        assert!(text.contains("SCORE 0"));
        assert!(text.contains("LEVEL 1"));
    }

    #[test]
    fn renders_active_piece_blocks() {
        let mut game = Game::new(1);
        game.start();
        // Drop the piece into the visible field so blocks appear.
        game.tick(0);
        game.tick(1100);
        let fb = GameView.render(&game, Viewport::new(80, 24));
        assert!(chars(&fb).contains('█'));
    }

    #[test]
    fn renders_ghost_below_active() {
        let mut game = Game::new(1);
        game.start();
        let fb = GameView.render(&game, Viewport::new(80, 24));
        assert!(chars(&fb).contains('░'));
    }

    #[test]
    fn small_viewport_does_not_panic() {
        let mut game = Game::new(1);
        game.start();
        let _ = GameView.render(&game, Viewport::new(10, 5));
    }
}

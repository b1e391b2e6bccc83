//! GameView: maps the composited game grid into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::RichTextArea;
use crate::engine::{DebugInfo, GameSnapshot, GameState};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::theme::Theme;

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

/// Frame-stream status shown under the debug readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteStatusView {
    pub port: u16,
    pub client_count: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Rows drawn under the play field: status and debug readout.
const FOOTER_ROWS: u16 = 2;

/// A lightweight terminal renderer for the composited canvas.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
    theme: Theme,
}

impl Default for GameView {
    fn default() -> Self {
        // Glyph art is drawn for 1x1 cells; stretching would split sprites.
        Self {
            cell_w: 1,
            anchor_y: AnchorY::Center,
            theme: Theme::default(),
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Render the current game into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        game: &GameState,
        debug: Option<&DebugInfo>,
        remote: Option<&RemoteStatusView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        self.render_area_into(&game.compose(), &game.snapshot(), debug, remote, viewport, fb);
    }

    /// Render an already composited grid with the given scoreboard.
    pub fn render_area_into(
        &self,
        area: &RichTextArea,
        snap: &GameSnapshot,
        debug: Option<&DebugInfo>,
        remote: Option<&RemoteStatusView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::fg(Rgb::new(200, 200, 200)).cell(' '));

        let text = area.text();
        let grid_w = (text.width() as u16).saturating_mul(self.cell_w);
        let grid_h = text.height() as u16;
        let frame_w = grid_w + 2;
        let frame_h = grid_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h + FOOTER_ROWS) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::fg(Rgb::new(110, 110, 130));
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);
        self.draw_grid(fb, area, start_x + 1, start_y + 1);

        let status_y = start_y.saturating_add(frame_h);
        self.draw_status(fb, snap, start_x, status_y, frame_w);

        if let Some(debug) = debug {
            let dim = CellStyle::fg(Rgb::new(150, 150, 160)).dim();
            let next = fb.put_str(start_x, status_y + 1, &debug.summary(), dim);
            if let Some(remote) = remote {
                let line = format!(" | remote :{} ({})", remote.port, remote.client_count);
                fb.put_str(next, status_y + 1, &line, dim);
            }
        }

        if !snap.started {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "READY");
        } else if snap.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        } else if snap.paused {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        game: &GameState,
        debug: Option<&DebugInfo>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(game, debug, None, viewport, &mut fb);
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

    /// Copy the grid top row first; the buffer is already stored that way.
    fn draw_grid(&self, fb: &mut FrameBuffer, area: &RichTextArea, x0: u16, y0: u16) {
        let text = area.text();
        for (index, &ch) in text.chars().iter().enumerate() {
            let row = (index / text.width()) as u16;
            let col = (index % text.width()) as u16;
            let style = self.theme.resolve_set(area.classes_at(index));
            fb.fill_rect(x0 + col * self.cell_w, y0 + row, self.cell_w, 1, ch, style);
        }
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16, w: u16) {
        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(250, 220, 90));
        let lives = CellStyle::fg(Rgb::new(90, 170, 255)).bold();

        let next = fb.put_str(x, y, "SCORE ", label);
        fb.put_u32(next, y, snap.score, value);

        let lives_w = 6 + snap.lives as u16;
        let lx = x.saturating_add(w.saturating_sub(lives_w));
        let next = fb.put_str(lx, y, "LIVES ", label);
        for i in 0..snap.lives as u16 {
            fb.put_char(next + i, y, '>', lives);
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
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GameAction, WINDOW_HEIGHT, WINDOW_WIDTH};

    fn viewport() -> Viewport {
        Viewport::new(WINDOW_WIDTH as u16 + 2, WINDOW_HEIGHT as u16 + 4)
    }

    fn started_game() -> GameState {
        let mut game = GameState::new(9).with_spawn_interval_ms(0);
        game.start();
        game
    }

    #[test]
    fn border_wraps_the_grid() {
        let fb = GameView::default().render(&started_game(), None, viewport());
        let w = WINDOW_WIDTH as u16 + 2;
        let h = WINDOW_HEIGHT as u16 + 2;
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('┌'));
        assert_eq!(fb.get(w - 1, 0).map(|c| c.ch), Some('┐'));
        assert_eq!(fb.get(0, h - 1).map(|c| c.ch), Some('└'));
        assert_eq!(fb.get(w - 1, h - 1).map(|c| c.ch), Some('┘'));
    }

    #[test]
    fn shuttle_is_drawn_with_its_class_style() {
        let view = GameView::default();
        let fb = view.render(&started_game(), None, viewport());
        // Grid row 5 from the bottom is screen row h-1-5, plus the border.
        let y = (WINDOW_HEIGHT - 1 - 5) as u16 + 1;
        let cell = fb.get(1, y).unwrap();
        assert_eq!(cell.ch, '>');
        assert_eq!(cell.style.fg, Rgb::new(90, 170, 255));
        assert!(cell.style.bold);
    }

    #[test]
    fn status_line_shows_score_and_lives() {
        let fb = GameView::default().render(&started_game(), None, viewport());
        let status = fb.row_text(WINDOW_HEIGHT as u16 + 2);
        assert!(status.starts_with("SCORE 0"));
        assert!(status.trim_end().ends_with("LIVES >>>"));
    }

    #[test]
    fn debug_line_only_when_enabled() {
        let game = started_game();
        let row = WINDOW_HEIGHT as u16 + 3;

        let fb = GameView::default().render(&game, None, viewport());
        assert!(fb.row_text(row).trim().is_empty());

        let mut debug = DebugInfo::default();
        debug.record_press("'w'");
        let fb = GameView::default().render(&game, Some(&debug), viewport());
        assert!(fb.row_text(row).contains("'w'"));
    }

    #[test]
    fn overlays_follow_game_flags() {
        let view = GameView::default();
        let mid = (WINDOW_HEIGHT as u16 + 2) / 2;

        let fb = view.render(&GameState::new(9), None, viewport());
        assert!(fb.row_text(mid).contains("READY"));

        let mut game = started_game();
        game.apply_action(GameAction::Pause);
        let fb = view.render(&game, None, viewport());
        assert!(fb.row_text(mid).contains("PAUSED"));
    }

    #[test]
    fn small_viewport_does_not_panic() {
        let fb = GameView::default().render(&started_game(), None, Viewport::new(5, 3));
        assert_eq!(fb.cells().len(), 15);
    }
}

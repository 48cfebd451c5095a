use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::game::ClickGame;

/// Glue between the terminal event stream and the game: keys map to
/// start/reset/quit, mouse presses inside the field become field clicks,
/// and the periodic tick pumps the game clock with wall time.
pub struct App {
    pub should_quit: bool,
    pub game: ClickGame,
    /// Terminal area the field was last rendered into; the ui module
    /// updates this every frame so mouse coordinates can be mapped back
    /// into logical field coordinates.
    pub field_area: Rect,
    last_tick: Instant,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            game: ClickGame::new(),
            field_area: Rect::default(),
            last_tick: Instant::now(),
        }
    }

    pub fn on_tick(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.game.advance(dt.as_millis() as u64);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => self.game.start(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.game.reset(),
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let area = self.field_area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        if mouse.column < area.x
            || mouse.row < area.y
            || mouse.column >= area.x + area.width
            || mouse.row >= area.y + area.height
        {
            return;
        }
        // Map the cell's center back into logical field coordinates.
        let cfg = self.game.config();
        let x = (f32::from(mouse.column - area.x) + 0.5) * cfg.width / f32::from(area.width);
        let y = (f32::from(mouse.row - area.y) + 0.5) * cfg.height / f32::from(area.height);
        self.game.on_field_click(x, y);
    }
}

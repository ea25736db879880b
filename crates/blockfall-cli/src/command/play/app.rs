use std::time::Duration;

use blockfall_engine::GameSession;
use blockfall_runtime::{App, RenderMode, Runtime};
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay};

const FPS: f64 = 60.0;

const FALLING_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["Q", "Esc"], "Quit"),
];

const GAME_OVER_BINDINGS: &[KeyBinding] = &[(&["R"], "Restart"), (&["Q", "Esc"], "Quit")];

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    show_ghost: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession, show_ghost: bool) -> Self {
        Self {
            session,
            show_ghost,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let is_falling = self.session.state().is_falling();
        match key.code {
            KeyCode::Left if is_falling => _ = self.session.try_move(-1, 0),
            KeyCode::Right if is_falling => _ = self.session.try_move(1, 0),
            KeyCode::Down if is_falling => _ = self.session.soft_drop(),
            KeyCode::Up if is_falling => _ = self.session.try_rotate(),
            KeyCode::Char(' ') if is_falling => self.session.hard_drop(),
            KeyCode::Char('r' | 'R') if !is_falling => self.session.reset(),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(FPS));
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_press_event() {
            self.handle_key(key);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let bindings = if self.session.is_game_over() {
            GAME_OVER_BINDINGS
        } else {
            FALLING_BINDINGS
        };
        let session_display = SessionDisplay::new(&self.session, self.show_ghost);
        let help = KeyBindingDisplay::new(bindings);

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(session_display.height()), Constraint::Length(1)])
                .areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
        self.session.tick(elapsed);
    }
}

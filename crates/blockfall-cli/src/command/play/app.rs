use std::time::Duration;

use blockfall_engine::{GameSession, PieceSeed, SessionState};
use crossterm::event::{Event, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    command::play::input::{self, Action},
    tui::{App, RenderMode, Tui},
    ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

const RUNNING_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑", "Z"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Pause"),
    (&["Q"], "Quit"),
];
const NOT_STARTED_BINDINGS: &[KeyBinding] = &[(&["Space"], "Start"), (&["Q"], "Quit")];
const PAUSED_BINDINGS: &[KeyBinding] = &[(&["P"], "Resume"), (&["Q"], "Quit")];
const GAME_OVER_BINDINGS: &[KeyBinding] = &[(&["Space"], "Restart"), (&["Q"], "Quit")];

#[derive(Debug)]
pub(super) struct PlayApp {
    session: GameSession,
    fps: f64,
    show_ghost: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub(super) fn new(fps: f64, seed: Option<PieceSeed>, show_ghost: bool) -> Self {
        let session = seed.map_or_else(GameSession::new, GameSession::with_seed);
        Self {
            session,
            fps,
            show_ghost,
            is_exiting: false,
        }
    }

    fn key_bindings(&self) -> &'static [KeyBinding<'static>] {
        match self.session.session_state() {
            SessionState::NotStarted => NOT_STARTED_BINDINGS,
            SessionState::Running => RUNNING_BINDINGS,
            SessionState::Paused => PAUSED_BINDINGS,
            SessionState::GameOver => GAME_OVER_BINDINGS,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(self.fps);
        tui.set_render_mode(RenderMode::throttled_from_rate(self.fps));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if key.kind == KeyEventKind::Release {
            return;
        }
        match input::action_for_key(self.session.session_state(), key.code) {
            Some(Action::Session(command)) => _ = self.session.handle_command(command),
            Some(Action::Quit) => self.is_exiting = true,
            None => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.session, self.show_ghost);
        let help = KeyBindingDisplay::new(self.key_bindings());

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(25), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, _tui: &mut Tui, now: Duration) {
        self.session.tick(now);
    }
}

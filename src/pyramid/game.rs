use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::core::game::{Context, Game};
use crate::data::Puzzle;
use crate::pyramid::renderer;
use crate::pyramid::session::{GameSession, SessionConfig};
use crate::pyramid::snapshot::SessionSnapshot;
use crate::pyramid::word::Key;

/// Events the keyboard can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleAction {
    Key(Key),
    Hint,
    Reveal,
    Reset,
    Next,
}

impl PuzzleAction {
    /// Key bindings. `completed` lets Enter double as "next puzzle" on the success panel.
    pub fn from_key_event(event: &KeyEvent, completed: bool) -> Option<Self> {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        match event.code {
            KeyCode::Char('r') | KeyCode::Char('R') if ctrl => Some(PuzzleAction::Reveal),
            KeyCode::Char('u') | KeyCode::Char('U') if ctrl => Some(PuzzleAction::Reset),
            KeyCode::Char(_) if ctrl => None,
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                Some(PuzzleAction::Key(Key::Letter(c.to_ascii_uppercase())))
            }
            KeyCode::Backspace | KeyCode::Delete => Some(PuzzleAction::Key(Key::Delete)),
            KeyCode::Tab => Some(PuzzleAction::Hint),
            KeyCode::Right => Some(PuzzleAction::Next),
            KeyCode::Enter if completed => Some(PuzzleAction::Next),
            _ => None,
        }
    }
}

/// Terminal front end for a [`GameSession`]
pub struct PyramidGame {
    session: GameSession,
    /// Latest snapshot pushed by the session; the renderer only reads this
    view: Rc<RefCell<SessionSnapshot>>,
}

impl PyramidGame {
    pub fn new(puzzles: Vec<Puzzle>, config: SessionConfig) -> Self {
        let mut session = GameSession::new(config);
        let view = Rc::new(RefCell::new(session.snapshot()));

        let sink = Rc::clone(&view);
        session.subscribe(move |snapshot| {
            *sink.borrow_mut() = snapshot.clone();
        });
        session.subscribe(|snapshot| {
            debug!(
                phase = ?snapshot.phase,
                four = %snapshot.four.assembled,
                five = %snapshot.five.assembled,
                completed = snapshot.completed_count,
                "state changed"
            );
        });

        session.initialize(puzzles);
        Self { session, view }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.view.borrow().clone()
    }
}

impl Game for PyramidGame {
    type Action = PuzzleAction;

    // Drives the deferred glow and transition queue
    fn tick_rate(&self) -> Option<Duration> {
        Some(Duration::from_millis(50))
    }

    fn on_tick(&mut self, now: Instant) {
        self.session.poll_deferred(now);
    }

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context<Self::Action>) {
        if let Some(action) = PuzzleAction::from_key_event(&event, self.session.is_puzzle_completed()) {
            ctx.send_action(action);
        }
    }

    fn handle_action(&mut self, action: Self::Action) {
        match action {
            PuzzleAction::Key(key) => self.session.handle_key_press(key),
            PuzzleAction::Hint => self.session.request_hint(),
            PuzzleAction::Reveal => self.session.request_reveal(),
            PuzzleAction::Reset => self.session.request_reset(),
            PuzzleAction::Next => self.session.request_next(),
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        renderer::render(frame, &self.view.borrow());
    }
}

/// Core game interface for terminal-hosted games
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use tokio::sync::mpsc::UnboundedSender;

/// Handle games use to queue actions for the engine loop
pub struct Context<A> {
    pub(crate) tx: UnboundedSender<A>,
}

impl<A> Context<A> {
    pub fn new(tx: UnboundedSender<A>) -> Self {
        Self { tx }
    }

    /// Queue an action; it is applied on the next turn of the engine loop
    pub fn send_action(&self, action: A) {
        // The receiver lives as long as the engine loop, so a failed send means we are shutting down.
        let _ = self.tx.send(action);
    }
}

/// Main game trait: input handling, state updates and drawing
pub trait Game {
    /// Discrete event produced from input and applied to game state
    type Action: Send + 'static;

    /// How often `on_tick` runs. `None` disables ticking.
    fn tick_rate(&self) -> Option<Duration>;

    fn on_tick(&mut self, now: Instant);

    /// Translate a key press into actions sent through `ctx`
    fn handle_input(&mut self, event: KeyEvent, ctx: &Context<Self::Action>);

    fn handle_action(&mut self, action: Self::Action);

    fn render(&self, frame: &mut ratatui::Frame);
}

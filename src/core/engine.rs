use crate::core::game::{Context, Game};
use anyhow::Result;
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

pub struct Engine<G: Game> {
    game: G,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G) -> Self {
        Self { game }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<G> {
        // Input is turned into actions and routed back through this channel
        let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel::<G::Action>();
        let ctx = Context::new(action_tx);

        loop {
            terminal.draw(|f| self.game.render(f))?;

            // INPUT (Non-blocking)
            if crossterm::event::poll(Duration::from_millis(0))? {
                if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        if key.code == crossterm::event::KeyCode::Esc { break; }
                        self.game.handle_input(key, &ctx);
                    }
                }
            }

            // Games without ticks still need the loop to wake up so input keeps getting polled.
            let tick_rate = self.game.tick_rate();
            let tick_sleep = tick_rate.unwrap_or(Duration::from_millis(16));
            let tick_fused = tokio::time::sleep(tick_sleep);

            tokio::select! {
                Some(action) = action_rx.recv() => {
                    self.game.handle_action(action);
                }

                _ = tick_fused => {
                    if tick_rate.is_some() {
                        self.game.on_tick(Instant::now());
                    }
                }
            }
        }

        Ok(self.game)
    }
}

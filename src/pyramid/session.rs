use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand_core::RngCore;
use serde::Serialize;
use tracing::{debug, info};

use crate::data::Puzzle;
use crate::pyramid::deferred::{DeferredAction, DeferredQueue};
use crate::pyramid::snapshot::{Observer, SessionSnapshot, WordView};
use crate::pyramid::word::{Key, Word, WordBuffer};

/// Stage of solving the current puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GamePhase {
    InWordFour,
    InWordFive,
    PuzzleCompleted,
}

impl GamePhase {
    /// Step shown to the player: 1 for the four letter word, 2 afterwards
    pub fn step_number(self) -> u8 {
        match self {
            GamePhase::InWordFour => 1,
            GamePhase::InWordFive | GamePhase::PuzzleCompleted => 2,
        }
    }

    /// The word currently accepting input
    pub fn active_word(self) -> Option<Word> {
        match self {
            GamePhase::InWordFour => Some(Word::Four),
            GamePhase::InWordFive => Some(Word::Five),
            GamePhase::PuzzleCompleted => None,
        }
    }

    fn after_solving(word: Word) -> GamePhase {
        match word {
            Word::Four => GamePhase::InWordFive,
            Word::Five => GamePhase::PuzzleCompleted,
        }
    }
}

/// Cosmetic timings. Zero durations commit transitions synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long a solved word glows before the phase moves on
    pub transition_delay: Duration,
    /// How long a hinted letter glows
    pub letter_glow: Duration,
}

impl SessionConfig {
    pub fn immediate() -> Self {
        Self {
            transition_delay: Duration::ZERO,
            letter_glow: Duration::ZERO,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            transition_delay: Duration::from_millis(1000),
            letter_glow: Duration::from_millis(1500),
        }
    }
}

/// Puzzle progression state machine.
///
/// All mutation happens through the methods below; every change that is visible
/// to a renderer emits one [`SessionSnapshot`] to the registered observers.
pub struct GameSession {
    puzzle_order: Vec<Puzzle>,
    current_index: usize,
    phase: GamePhase,
    four: WordBuffer,
    five: WordBuffer,
    completed_count: u32,
    /// Bumped whenever the per-puzzle state is thrown away
    generation: u64,
    deferred: DeferredQueue,
    config: SessionConfig,
    observers: Vec<Observer>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            puzzle_order: Vec::new(),
            current_index: 0,
            phase: GamePhase::InWordFour,
            four: WordBuffer::new(Word::Four),
            five: WordBuffer::new(Word::Five),
            completed_count: 0,
            generation: 0,
            deferred: DeferredQueue::new(),
            config,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&SessionSnapshot) + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ---- read model ----

    pub fn current_puzzle(&self) -> Option<&Puzzle> {
        self.puzzle_order.get(self.current_index)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn step_number(&self) -> u8 {
        self.phase.step_number()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn puzzle_total(&self) -> usize {
        self.puzzle_order.len()
    }

    pub fn puzzle_order(&self) -> &[Puzzle] {
        &self.puzzle_order
    }

    pub fn completed_count(&self) -> u32 {
        self.completed_count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn buffer(&self, word: Word) -> &WordBuffer {
        match word {
            Word::Four => &self.four,
            Word::Five => &self.five,
        }
    }

    fn buffer_mut(&mut self, word: Word) -> &mut WordBuffer {
        match word {
            Word::Four => &mut self.four,
            Word::Five => &mut self.five,
        }
    }

    pub fn is_solved(&self, word: Word) -> bool {
        self.current_puzzle()
            .is_some_and(|p| self.buffer(word).assembled() == p.answer(word))
    }

    pub fn is_word_four_solved(&self) -> bool {
        self.is_solved(Word::Four)
    }

    pub fn is_word_five_solved(&self) -> bool {
        self.is_solved(Word::Five)
    }

    pub fn is_puzzle_completed(&self) -> bool {
        self.phase == GamePhase::PuzzleCompleted
    }

    pub fn should_show_success(&self) -> bool {
        self.is_puzzle_completed()
    }

    /// A solved word is glowing and its phase change has not landed yet
    pub fn is_transition_pending(&self) -> bool {
        let (generation, phase) = (self.generation, self.phase);
        self.deferred.has_pending(|d| {
            d.generation == generation
                && matches!(d.action, DeferredAction::CommitPhase { from, .. } if from == phase)
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            step_number: self.step_number(),
            four: WordView::from_buffer(Word::Four, &self.four, self.is_word_four_solved()),
            five: WordView::from_buffer(Word::Five, &self.five, self.is_word_five_solved()),
            completed_count: self.completed_count,
            puzzle_index: self.current_index,
            puzzle_total: self.puzzle_order.len(),
            show_success: self.should_show_success(),
            transition_pending: self.is_transition_pending(),
            puzzle: self.current_puzzle().cloned(),
        }
    }

    fn emit(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in self.observers.iter_mut() {
            observer(&snapshot);
        }
    }

    // ---- lifecycle ----

    /// Start a fresh session over a shuffled copy of `puzzles`
    pub fn initialize(&mut self, puzzles: Vec<Puzzle>) {
        self.initialize_with(puzzles, &mut rand::rng());
    }

    pub fn initialize_with<R: RngCore + ?Sized>(&mut self, mut puzzles: Vec<Puzzle>, rng: &mut R) {
        puzzles.shuffle(rng);
        self.puzzle_order = puzzles;
        self.current_index = 0;
        self.completed_count = 0;
        info!(puzzles = self.puzzle_order.len(), "session initialized");
        self.reset_puzzle();
    }

    /// Clear all progress on the current puzzle. Index and completed count are kept.
    pub fn reset_puzzle(&mut self) {
        self.clear_puzzle_state();
        debug!(index = self.current_index, generation = self.generation, "puzzle reset");
        self.emit();
    }

    /// Advance to the next puzzle, wrapping to the first. Does nothing on an empty deck.
    pub fn next_puzzle(&mut self) {
        let total = self.puzzle_order.len();
        if total == 0 {
            return;
        }
        self.current_index = (self.current_index + 1) % total;
        info!(index = self.current_index, total, "next puzzle");
        self.reset_puzzle();
    }

    fn clear_puzzle_state(&mut self) {
        self.phase = GamePhase::InWordFour;
        self.four = WordBuffer::new(Word::Four);
        self.five = WordBuffer::new(Word::Five);
        // Deferred actions from before this point are now stale.
        self.generation += 1;
    }

    // ---- input ----

    pub fn handle_key_press(&mut self, key: Key) {
        if self.current_puzzle().is_none() {
            return;
        }
        let Some(word) = self.phase.active_word() else {
            return;
        };
        if self.is_transition_pending() {
            return;
        }
        if matches!(key, Key::Letter(c) if !c.is_ascii_alphabetic()) {
            return;
        }

        let buffer = self.buffer_mut(word);
        let changed = match key {
            Key::Delete => buffer.delete(),
            Key::Letter(letter) => buffer.type_letter(letter.to_ascii_uppercase()),
        };
        if !changed {
            return;
        }

        self.check_progression();
        self.emit();
    }

    /// Reveal the leftmost unhinted letter of `word`
    pub fn get_hint(&mut self, word: Word) {
        let Some(answer) = self.current_puzzle().map(|p| p.answer(word)) else {
            return;
        };
        if self.phase.active_word() == Some(word) && self.is_transition_pending() {
            return;
        }
        let Some(index) = self.buffer_mut(word).reveal_next_hint(&answer) else {
            let phase = self.phase;
            self.check_progression();
            if self.phase != phase {
                self.emit();
            }
            return;
        };
        debug!(%word, index, "hint revealed");

        let glow = self.config.letter_glow;
        if !glow.is_zero() {
            self.buffer_mut(word).glowing_letters.insert(index);
            self.deferred.schedule(
                glow,
                self.generation,
                DeferredAction::ClearLetterGlow { word, index },
            );
        }

        self.check_progression();
        self.emit();
    }

    /// Fill the active word with its answer and move on immediately.
    /// Does nothing unless `word` is the word being solved.
    pub fn reveal_answer(&mut self, word: Word) {
        let Some(answer) = self.current_puzzle().map(|p| p.answer(word)) else {
            return;
        };
        if self.phase.active_word() != Some(word) {
            return;
        }

        let buffer = self.buffer_mut(word);
        buffer.fill(&answer);
        buffer.glowing_letters.clear();
        info!(%word, "answer revealed");

        // Any pending commit for this word is dropped later: the phase no longer matches.
        self.commit_phase(GamePhase::after_solving(word));

        let delay = self.config.transition_delay;
        if !delay.is_zero() {
            self.buffer_mut(word).word_glowing = true;
            self.deferred
                .schedule(delay, self.generation, DeferredAction::ClearWordGlow { word });
        }
        self.emit();
    }

    // ---- progression ----

    fn check_progression(&mut self) {
        match self.phase {
            GamePhase::InWordFour if self.is_word_four_solved() => self.on_word_solved(Word::Four),
            GamePhase::InWordFive if self.is_word_five_solved() => self.on_word_solved(Word::Five),
            _ => {}
        }
    }

    fn on_word_solved(&mut self, word: Word) {
        let to = GamePhase::after_solving(word);
        let delay = self.config.transition_delay;
        if delay.is_zero() {
            self.commit_phase(to);
            return;
        }
        self.buffer_mut(word).word_glowing = true;
        self.deferred.schedule(
            delay,
            self.generation,
            DeferredAction::CommitPhase { from: self.phase, to },
        );
        debug!(%word, ?delay, "word solved; transition deferred");
    }

    fn commit_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        self.phase = to;
        if to == GamePhase::PuzzleCompleted {
            self.completed_count += 1;
        }
        info!(?from, ?to, completed = self.completed_count, "phase transition");
        // The newly active word may already be solved by earlier hints.
        self.check_progression();
    }

    /// Fire deferred actions due at `now`. Stale ones are discarded.
    /// Returns whether anything changed.
    pub fn poll_deferred(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for entry in self.deferred.take_due(now) {
            if entry.generation != self.generation {
                debug!(action = ?entry.action, generation = entry.generation, "discarding stale deferred action");
                continue;
            }
            match entry.action {
                DeferredAction::CommitPhase { from, to } => {
                    if self.phase != from {
                        debug!(?from, current = ?self.phase, "discarding superseded transition");
                        continue;
                    }
                    if let Some(word) = from.active_word() {
                        self.buffer_mut(word).word_glowing = false;
                    }
                    self.commit_phase(to);
                }
                DeferredAction::ClearLetterGlow { word, index } => {
                    self.buffer_mut(word).glowing_letters.remove(&index);
                }
                DeferredAction::ClearWordGlow { word } => {
                    self.buffer_mut(word).word_glowing = false;
                }
            }
            changed = true;
        }
        if changed {
            self.emit();
        }
        changed
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    // ---- event surface ----

    /// Forward a raw key name (`DEL` or a letter)
    pub fn key_press(&mut self, key: &str) -> anyhow::Result<()> {
        let key = key.parse()?;
        self.handle_key_press(key);
        Ok(())
    }

    pub fn request_hint(&mut self) {
        if let Some(word) = self.phase.active_word() {
            self.get_hint(word);
        }
    }

    pub fn request_reveal(&mut self) {
        if let Some(word) = self.phase.active_word() {
            self.reveal_answer(word);
        }
    }

    pub fn request_reset(&mut self) {
        self.reset_puzzle();
    }

    pub fn request_next(&mut self) {
        self.next_puzzle();
    }
}

use serde::Serialize;

use crate::data::Puzzle;
use crate::pyramid::session::GamePhase;
use crate::pyramid::word::{Word, WordBuffer};

/// Callback invoked with a fresh snapshot after every state change
pub type Observer = Box<dyn FnMut(&SessionSnapshot)>;

/// Read-only view of one word row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordView {
    pub word: Word,
    pub input: String,
    pub hints: Vec<Option<char>>,
    /// What each box shows, hint letters first
    pub letters: Vec<Option<char>>,
    pub assembled: String,
    pub glowing_letters: Vec<usize>,
    pub word_glowing: bool,
    pub solved: bool,
}

impl WordView {
    pub fn from_buffer(word: Word, buffer: &WordBuffer, solved: bool) -> Self {
        Self {
            word,
            input: buffer.input.clone(),
            hints: buffer.hints.clone(),
            letters: (0..buffer.len()).map(|i| buffer.display_letter(i)).collect(),
            assembled: buffer.assembled(),
            glowing_letters: buffer.glowing_letters.iter().copied().collect(),
            word_glowing: buffer.word_glowing,
            solved,
        }
    }

    pub fn is_hinted(&self, index: usize) -> bool {
        self.hints.get(index).is_some_and(Option::is_some)
    }

    pub fn is_glowing(&self, index: usize) -> bool {
        self.word_glowing || self.glowing_letters.contains(&index)
    }
}

/// Everything a renderer needs, detached from the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub step_number: u8,
    pub four: WordView,
    pub five: WordView,
    pub completed_count: u32,
    pub puzzle_index: usize,
    pub puzzle_total: usize,
    pub show_success: bool,
    pub transition_pending: bool,
    pub puzzle: Option<Puzzle>,
}

impl SessionSnapshot {
    pub fn view(&self, word: Word) -> &WordView {
        match word {
            Word::Four => &self.four,
            Word::Five => &self.five,
        }
    }

    pub fn has_puzzles(&self) -> bool {
        self.puzzle.is_some()
    }
}

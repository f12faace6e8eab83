use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail};
use serde::Serialize;

/// Placeholder for an input position the player has not typed yet
pub const PLACEHOLDER: char = ' ';

/// The two words the player builds in a puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Word {
    Four,
    Five,
}

impl Word {
    pub fn len(self) -> usize {
        match self {
            Word::Four => 4,
            Word::Five => 5,
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Word::Four => write!(f, "four"),
            Word::Five => write!(f, "five"),
        }
    }
}

/// A keystroke forwarded from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Letter(char),
}

impl FromStr for Key {
    type Err = anyhow::Error;

    /// Accepts `DEL` or a single ASCII letter (uppercased)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "DEL" {
            return Ok(Key::Delete);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Ok(Key::Letter(c.to_ascii_uppercase())),
            (Some(_), None) => bail!("'{}' is not a letter", s),
            _ => Err(anyhow!("expected DEL or a single letter, got '{}'", s)),
        }
    }
}

/// Typed input and revealed hints for one word.
///
/// `input` is a flat string, not a per-position array: deleting collapses it.
/// Positions the player skipped over (because a hint sits there) hold [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordBuffer {
    pub input: String,
    pub hints: Vec<Option<char>>,
    pub glowing_letters: BTreeSet<usize>,
    pub word_glowing: bool,
}

impl WordBuffer {
    pub fn new(word: Word) -> Self {
        Self {
            input: String::new(),
            hints: vec![None; word.len()],
            glowing_letters: BTreeSet::new(),
            word_glowing: false,
        }
    }

    pub fn len(&self) -> usize {
        self.hints.len()
    }

    pub fn is_hinted(&self, index: usize) -> bool {
        self.hints.get(index).is_some_and(Option::is_some)
    }

    /// Hint letters overlaid on the typed input
    pub fn assembled(&self) -> String {
        assembled_word(&self.input, &self.hints, self.len())
    }

    /// Letter displayed at `index`, hint first
    pub fn display_letter(&self, index: usize) -> Option<char> {
        if let Some(Some(hint)) = self.hints.get(index) {
            return Some(*hint);
        }
        typed_letter(&self.input, index)
    }

    /// Remove the typed letter at the last non-hinted index of the input.
    /// Returns whether anything was removed.
    pub fn delete(&mut self) -> bool {
        // Scans the input's own indices, so a hint past the end never blocks.
        let target = (0..self.input.len()).rev().find(|&i| !self.is_hinted(i));
        match target {
            Some(i) => {
                self.input.remove(i);
                true
            }
            None => false,
        }
    }

    /// Place a letter in the first open, non-hinted position. Returns whether it was placed.
    pub fn type_letter(&mut self, letter: char) -> bool {
        let max = self.len();
        if self.input.len() >= max {
            return false;
        }
        let open = (0..max).find(|&i| {
            !self.is_hinted(i)
                && (i >= self.input.len() || self.input.as_bytes()[i] == PLACEHOLDER as u8)
        });
        let Some(i) = open else {
            return false;
        };

        if i < self.input.len() {
            self.input.replace_range(i..i + 1, &letter.to_string());
        } else {
            while self.input.len() < i {
                self.input.push(PLACEHOLDER);
            }
            self.input.push(letter);
        }
        true
    }

    /// Fill the leftmost empty hint slot from `answer`; returns the filled index
    pub fn reveal_next_hint(&mut self, answer: &str) -> Option<usize> {
        let index = self.hints.iter().position(Option::is_none)?;
        let letter = answer.chars().nth(index)?;
        self.hints[index] = Some(letter);
        Some(index)
    }

    /// Replace the whole input with `answer`, dropping hints
    pub fn fill(&mut self, answer: &str) {
        self.input = answer.chars().take(self.len()).collect();
        self.hints.iter_mut().for_each(|h| *h = None);
    }
}

fn typed_letter(input: &str, index: usize) -> Option<char> {
    input.chars().nth(index).filter(|&c| c != PLACEHOLDER)
}

/// Rebuild the displayed word: at each position the hint if set, else the typed
/// letter if any, else nothing. Never longer than `length`.
pub fn assembled_word(input: &str, hints: &[Option<char>], length: usize) -> String {
    (0..length)
        .filter_map(|i| match hints.get(i) {
            Some(Some(hint)) => Some(*hint),
            _ => typed_letter(input, i),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys() {
        assert_eq!("DEL".parse::<Key>().unwrap(), Key::Delete);
        assert_eq!("Q".parse::<Key>().unwrap(), Key::Letter('Q'));
        assert_eq!("q".parse::<Key>().unwrap(), Key::Letter('Q'));
        assert!("".parse::<Key>().is_err());
        assert!("AB".parse::<Key>().is_err());
        assert!("7".parse::<Key>().is_err());
    }

    #[test]
    fn assembled_prefers_hints_and_caps_length() {
        let hints = [Some('C'), None, None, Some('S')];
        assert_eq!(assembled_word("XAT", &hints, 4), "CATS");
        assert_eq!(assembled_word("ABCDEFG", &[None; 4], 4), "ABCD");
        assert_eq!(assembled_word("", &[None; 4], 4), "");
    }

    #[test]
    fn assembled_skips_placeholders() {
        assert_eq!(assembled_word(" A", &[None, None, None, None], 4), "A");
        assert_eq!(assembled_word(" A", &[Some('C'), None, None, None], 4), "CA");
    }

    #[test]
    fn typing_pads_past_leading_hint() {
        let mut buf = WordBuffer::new(Word::Four);
        buf.hints[0] = Some('C');
        assert!(buf.type_letter('A'));
        assert!(buf.type_letter('T'));
        assert!(buf.type_letter('S'));
        assert_eq!(buf.input, " ATS");
        assert_eq!(buf.assembled(), "CATS");
        assert!(!buf.type_letter('X'));
    }

    #[test]
    fn typing_fills_placeholder_gap() {
        let mut buf = WordBuffer::new(Word::Four);
        buf.input = "A T".into();
        assert!(buf.type_letter('B'));
        assert_eq!(buf.input, "ABT");
    }

    #[test]
    fn delete_collapses_from_middle_when_tail_is_hinted() {
        let mut buf = WordBuffer::new(Word::Five);
        buf.input = "ABCDE".into();
        buf.hints[4] = Some('S');
        buf.hints[3] = Some('T');
        assert!(buf.delete());
        assert_eq!(buf.input, "ABDE");
    }

    #[test]
    fn delete_stops_at_hints() {
        let mut buf = WordBuffer::new(Word::Four);
        buf.hints[0] = Some('C');
        buf.input = " A".into();
        assert!(buf.delete());
        assert_eq!(buf.input, " ");
        assert!(!buf.delete());
        assert_eq!(buf.input, " ");
    }

    #[test]
    fn hints_fill_leftmost_first() {
        let mut buf = WordBuffer::new(Word::Four);
        assert_eq!(buf.reveal_next_hint("CATS"), Some(0));
        assert_eq!(buf.reveal_next_hint("CATS"), Some(1));
        assert_eq!(buf.hints, vec![Some('C'), Some('A'), None, None]);
    }
}

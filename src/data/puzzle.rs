use serde::{Deserialize, Serialize};

use crate::pyramid::word::Word;

/// One pyramid: a three letter base word grown into a four and then a five letter word.
///
/// Field names on the wire follow the bundled data file (`puzzle_id`, `4hint`, `5hint`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    #[serde(rename = "puzzle_id")]
    pub id: u32,
    pub three: String,
    pub four: String,
    pub five: String,
    #[serde(rename = "4hint")]
    pub hint_four: String,
    #[serde(rename = "5hint")]
    pub hint_five: String,
}

impl Puzzle {
    /// Uppercased answer for the given step
    pub fn answer(&self, word: Word) -> String {
        match word {
            Word::Four => self.four.to_uppercase(),
            Word::Five => self.five.to_uppercase(),
        }
    }

    /// Clue text shown while solving the given step
    pub fn clue(&self, word: Word) -> &str {
        match word {
            Word::Four => &self.hint_four,
            Word::Five => &self.hint_five,
        }
    }

    /// The word the player adds a letter to for the given step
    pub fn base_of(&self, word: Word) -> String {
        match word {
            Word::Four => self.three.to_uppercase(),
            Word::Five => self.four.to_uppercase(),
        }
    }

    /// Whether each word is the previous one with exactly one letter inserted.
    ///
    /// The game never checks this at runtime; it trusts the data. Used by `check`.
    pub fn is_well_formed(&self) -> bool {
        let three = self.three.to_uppercase();
        let four = self.four.to_uppercase();
        let five = self.five.to_uppercase();

        [&three, &four, &five]
            .iter()
            .all(|w| w.chars().all(|c| c.is_ascii_alphabetic()))
            && three.len() == 3
            && is_single_insertion(&three, &four)
            && is_single_insertion(&four, &five)
    }
}

fn is_single_insertion(shorter: &str, longer: &str) -> bool {
    if longer.len() != shorter.len() + 1 {
        return false;
    }
    (0..longer.len()).any(|skip| {
        longer
            .char_indices()
            .filter(|(i, _)| *i != skip)
            .map(|(_, c)| c)
            .eq(shorter.chars())
    })
}

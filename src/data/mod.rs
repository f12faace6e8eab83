/// Puzzle data: the record format and the fail-soft loader
pub mod loader;
pub mod puzzle;

pub use loader::{load_puzzles, parse_puzzles, PuzzleSource};
pub use puzzle::Puzzle;

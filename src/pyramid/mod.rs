/// Word pyramid - the puzzle state machine and its terminal front end
pub mod deferred;
pub mod game;
pub mod renderer;
pub mod session;
pub mod snapshot;
pub mod word;


pub use game::{PuzzleAction, PyramidGame};
pub use session::{GamePhase, GameSession, SessionConfig};
pub use snapshot::{SessionSnapshot, WordView};
pub use word::{assembled_word, Key, Word, WordBuffer};

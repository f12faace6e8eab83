pub mod cli;
pub mod core {
	pub mod engine;
	pub mod game;
}
pub mod data;
pub mod logging;
pub mod pyramid;

// Re-export for convenience
pub use crate::core::game::{Context, Game};
pub use crate::pyramid::{GamePhase, GameSession, SessionConfig};

pub mod accuracy;
pub mod difficulty;
pub mod event;
pub mod scoring;
pub mod session;

// Re-export the main types for convenience
pub use accuracy::accuracy;
pub use difficulty::Difficulty;
pub use event::{dispatch, Context, GameEvent};
pub use scoring::WordScore;
pub use session::{Feedback, GameSession, GameStats, Phase, GAME_DURATION_SECS};

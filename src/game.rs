//! Game state, turn timing and result tracking.

mod engine;
mod result;
mod runner;
mod timer;
pub mod words;

pub use engine::{DEFAULT_MAX_LIVES, GameEngine, GameError, GuessOutcome};
pub use result::{GameOutcome, SessionStats};
pub use runner::GameRunner;
pub use timer::{Clock, TokioClock, TurnTimer};
pub use words::Difficulty;

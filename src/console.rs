//! Line-oriented terminal I/O for the game.

mod terminal;

pub use terminal::{Console, TurnInput};

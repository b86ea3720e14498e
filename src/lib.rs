//! Terminal hangman where every turn runs against a countdown.
//!
//! The game state lives in [`game::GameEngine`], which knows nothing about
//! terminals. [`console::Console`] does the line I/O and
//! [`game::GameRunner`] drives one game through both.

pub mod console;
pub mod game;

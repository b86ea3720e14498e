//! Built-in answers and random selection.

use clap::ValueEnum;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Single-word answers for beginners.
pub const WORDS: &[&str] = &[
    "python", "banana", "hangman", "testing", "quality", "module", "package", "function",
    "variable", "exception", "object", "class", "method", "loop", "string", "integer", "boolean",
    "dictionary", "tuple", "syntax", "compile", "runtime", "debug", "memory", "process", "thread",
    "queue", "input", "output", "file", "system", "network", "socket", "server", "client",
];

/// Multi-word answers for intermediate play.
pub const PHRASES: &[&str] = &[
    "hello world",
    "unit testing",
    "clean code",
    "open source",
    "time and space",
    "read the docs",
    "pep eight",
    "software design",
    "data structures",
    "object oriented",
    "artificial intelligence",
    "machine learning",
    "deep learning",
    "version control",
    "continuous integration",
    "code review",
    "error handling",
    "garbage collection",
    "software engineering",
    "application programming",
];

/// Which list answers are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// A random word
    Beginner,
    /// A random phrase
    Intermediate,
}

impl Difficulty {
    #[must_use]
    pub const fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::Beginner => WORDS,
            Self::Intermediate => PHRASES,
        }
    }

    /// Parse a menu selection (`1` or `2`).
    #[must_use]
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Beginner),
            "2" => Some(Self::Intermediate),
            _ => None,
        }
    }
}

/// Pick one candidate uniformly at random; `None` for an empty list.
pub fn choose<'a, T, R>(candidates: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    candidates.choose(rng)
}

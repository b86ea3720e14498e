//! Hangman game state: masked answer, guessed letters, lives and the turn timer.

use super::timer::{Clock, TokioClock, TurnTimer};
use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Lives a game starts with unless told otherwise.
pub const DEFAULT_MAX_LIVES: u32 = 6;

/// Errors raised by the game engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A guess that is not exactly one alphabetic character.
    #[error("guess must be a single alphabetic character, got {0:?}")]
    InvalidInput(String),

    #[error("answer must not be empty")]
    EmptyAnswer,

    #[error("a game needs at least one life")]
    NoLives,
}

/// Result of a single guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    /// Whether the letter occurs in the answer
    pub correct: bool,
    /// Positions uncovered by this guess
    pub revealed: usize,
}

impl GuessOutcome {
    const MISS: Self = Self {
        correct: false,
        revealed: 0,
    };
}

/// One character of the answer as the player sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Hidden(char),
    Shown(char),
}

/// A single hangman game.
#[derive(Debug)]
pub struct GameEngine<C = TokioClock> {
    answer: String,
    normalized: Vec<char>,
    slots: Vec<Slot>,
    guessed: BTreeSet<char>,
    lives: u32,
    max_lives: u32,
    clock: C,
    timer: Option<TurnTimer<C>>,
    timeout_penalized: bool,
}

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

impl GameEngine {
    /// Start a game on tokio's clock.
    ///
    /// # Errors
    /// Returns an error if the answer is empty or `max_lives` is zero.
    pub fn new(answer: impl Into<String>, max_lives: u32) -> Result<Self, GameError> {
        Self::with_clock(answer, max_lives, TokioClock)
    }
}

impl<C: Clock + Clone> GameEngine<C> {
    /// Start a game whose turn timers read the given clock.
    ///
    /// # Errors
    /// Returns an error if the answer is empty or `max_lives` is zero.
    pub fn with_clock(
        answer: impl Into<String>,
        max_lives: u32,
        clock: C,
    ) -> Result<Self, GameError> {
        let answer = answer.into();
        if answer.is_empty() {
            return Err(GameError::EmptyAnswer);
        }
        if max_lives == 0 {
            return Err(GameError::NoLives);
        }

        let normalized = answer.chars().map(fold_case).collect();
        let slots = answer
            .chars()
            .map(|c| {
                if c.is_alphabetic() {
                    Slot::Hidden(c)
                } else {
                    Slot::Shown(c)
                }
            })
            .collect();

        Ok(Self {
            answer,
            normalized,
            slots,
            guessed: BTreeSet::new(),
            lives: max_lives,
            max_lives,
            clock,
            timer: None,
            timeout_penalized: false,
        })
    }

    /// The answer with unrevealed letters shown as `_`.
    #[must_use]
    pub fn masked(&self) -> String {
        self.slots
            .iter()
            .map(|slot| match *slot {
                Slot::Hidden(_) => '_',
                Slot::Shown(c) => c,
            })
            .collect()
    }

    /// Guess one letter, case-insensitively.
    ///
    /// A letter guessed before changes nothing and reports zero reveals. A
    /// first-time miss costs a life.
    ///
    /// # Errors
    /// Returns [`GameError::InvalidInput`] unless `input` is exactly one
    /// alphabetic character.
    pub fn guess(&mut self, input: &str) -> Result<GuessOutcome, GameError> {
        let mut chars = input.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => fold_case(c),
            _ => return Err(GameError::InvalidInput(input.to_owned())),
        };

        if !self.guessed.insert(letter) {
            return Ok(GuessOutcome {
                correct: self.normalized.contains(&letter),
                revealed: 0,
            });
        }

        let mut revealed = 0;
        for (slot, &folded) in self.slots.iter_mut().zip(&self.normalized) {
            if folded != letter {
                continue;
            }
            if let Slot::Hidden(original) = *slot {
                *slot = Slot::Shown(original);
                revealed += 1;
            }
        }

        if revealed == 0 {
            self.lives = self.lives.saturating_sub(1);
            tracing::debug!(%letter, lives = self.lives, "Wrong guess");
            return Ok(GuessOutcome::MISS);
        }

        tracing::debug!(%letter, revealed, "Correct guess");
        Ok(GuessOutcome {
            correct: true,
            revealed,
        })
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.slots.iter().all(|slot| matches!(slot, Slot::Shown(_)))
    }

    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.lives == 0
    }

    /// Begin a new turn with a fresh timer and return its deadline.
    pub fn start_turn(&mut self, duration: Duration) -> Instant {
        let mut timer = TurnTimer::new(duration, self.clock.clone());
        timer.start();
        let deadline = timer.deadline();
        self.timer = Some(timer);
        self.timeout_penalized = false;
        deadline
    }

    /// Charge a life for an expired turn, at most once per turn.
    ///
    /// Returns whether this call took the life.
    pub fn handle_timeout(&mut self) -> bool {
        let expired = self.timer.as_ref().is_some_and(TurnTimer::is_expired);
        if !expired || self.timeout_penalized {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.timeout_penalized = true;
        tracing::debug!(lives = self.lives, "Turn timed out");
        true
    }

    /// Whole seconds left on the current turn, 0 before the first turn.
    #[must_use]
    pub fn remaining_time(&self) -> u64 {
        self.timer.as_ref().map_or(0, |timer| timer.remaining().as_secs())
    }

    /// Time left on the current turn, `None` before the first turn.
    #[must_use]
    pub fn turn_remaining(&self) -> Option<Duration> {
        self.timer.as_ref().map(TurnTimer::remaining)
    }

    #[must_use]
    pub fn turn_deadline(&self) -> Option<Instant> {
        self.timer.as_ref().map(TurnTimer::deadline)
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub const fn max_lives(&self) -> u32 {
        self.max_lives
    }

    /// Letters guessed so far, lowercase and sorted.
    #[must_use]
    pub const fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    #[must_use]
    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed.contains(&fold_case(letter))
    }
}

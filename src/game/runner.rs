//! Game runner - plays a single game through a console.

use crate::console::{Console, TurnInput};
use crate::game::{Clock, GameEngine, GameOutcome};
use color_eyre::eyre::Result;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncWrite};

/// Default time allowed for each turn.
pub const DEFAULT_TURN: Duration = Duration::from_secs(15);

/// Runs hangman games turn by turn.
pub struct GameRunner {
    turn: Duration,
}

/// Seconds left for display, rounded up so a fresh turn shows its full length.
fn display_seconds(remaining: Duration) -> u64 {
    remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
}

impl GameRunner {
    /// Create a runner that gives each turn `turn` to answer.
    #[must_use]
    pub const fn new(turn: Duration) -> Self {
        Self { turn }
    }

    /// Play one game until it is solved, lost, or abandoned.
    ///
    /// # Errors
    /// Returns an error if console I/O fails.
    pub async fn play<C, R, W>(
        &self,
        engine: &mut GameEngine<C>,
        console: &mut Console<R, W>,
    ) -> Result<GameOutcome>
    where
        C: Clock + Clone + Send,
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        console.say("\n=== Hangman ===").await?;
        console.say("Type 'quit' to exit this game.").await?;

        while !engine.is_dead() && !engine.is_solved() {
            let deadline = engine.start_turn(self.turn);
            let remaining = engine.turn_remaining().unwrap_or(self.turn);
            let guessed: String = engine.guessed_letters().iter().collect();
            console
                .say(&format!(
                    "\nWord: {}   Lives: {}/{}   Time left: {}s   Guessed: {}",
                    engine.masked(),
                    engine.lives(),
                    engine.max_lives(),
                    display_seconds(remaining),
                    if guessed.is_empty() { "-" } else { guessed.as_str() },
                ))
                .await?;

            let line = match console.read_turn(deadline).await? {
                TurnInput::Line(line) => line,
                TurnInput::TimedOut => {
                    if engine.handle_timeout() {
                        console.say("Time's up! Life deducted.").await?;
                    }
                    continue;
                }
                TurnInput::Closed => {
                    tracing::debug!("Input closed mid-game");
                    return self.quit(engine, console).await;
                }
            };

            if line == "quit" {
                return self.quit(engine, console).await;
            }

            let mut chars = line.chars();
            let single = match (chars.next(), chars.next()) {
                (Some(letter), None) => Some(letter),
                _ => None,
            };
            if single.is_some_and(|letter| engine.has_guessed(letter)) {
                console.say("You already guessed that letter.").await?;
                continue;
            }

            match engine.guess(&line) {
                Ok(outcome) if outcome.correct => {
                    console
                        .say(&format!("Revealed {} position(s).", outcome.revealed))
                        .await?;
                }
                Ok(_) => console.say("Wrong guess. Life deducted.").await?,
                Err(e) => {
                    tracing::debug!(error = %e, "Rejected guess");
                    console.say("Please enter a single letter (a-z).").await?;
                }
            }
        }

        let outcome = if engine.is_solved() {
            console.say("\nYou solved it!").await?;
            GameOutcome::Solved
        } else {
            console.say("\nNo lives left.").await?;
            GameOutcome::Dead
        };
        console.say(&format!("Answer: {}", engine.answer())).await?;
        tracing::info!(?outcome, lives = engine.lives(), "Game finished");
        Ok(outcome)
    }

    async fn quit<C, R, W>(
        &self,
        engine: &GameEngine<C>,
        console: &mut Console<R, W>,
    ) -> Result<GameOutcome>
    where
        C: Clock + Clone + Send,
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        console
            .say(&format!(
                "\nYou quit the game. The answer was: {}",
                engine.answer()
            ))
            .await?;
        tracing::info!(turn_secs = self.turn.as_secs_f64(), "Game abandoned");
        Ok(GameOutcome::Quit)
    }
}

impl Default for GameRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TURN)
    }
}

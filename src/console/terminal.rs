//! Async prompt and deadline-bounded line reading.

use color_eyre::eyre::Result;
use std::time::Duration;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin, Stdout,
};
use tokio::time::{Instant, sleep_until};

/// How long before the deadline the player is warned.
const WARN_BEFORE: Duration = Duration::from_secs(5);

/// What came back from one turn's read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnInput {
    /// A line, trimmed and lowercased
    Line(String),
    /// The deadline passed first
    TimedOut,
    /// Input reached end of file
    Closed,
}

/// A terminal: a line source and an output sink.
pub struct Console<R, W> {
    lines: Lines<R>,
    out: W,
}

impl Console<BufReader<Stdin>, Stdout> {
    /// Console over the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    #[must_use]
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    async fn write(out: &mut W, text: &str) -> Result<()> {
        out.write_all(text.as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }

    /// Write a line.
    ///
    /// # Errors
    /// Returns an error if writing to the output fails.
    pub async fn say(&mut self, text: &str) -> Result<()> {
        Self::write(&mut self.out, &format!("{text}\n")).await
    }

    /// Write `text` without a newline and read one trimmed line.
    ///
    /// Returns `None` once input is closed.
    ///
    /// # Errors
    /// Returns an error if reading or writing fails.
    pub async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        Self::write(&mut self.out, text).await?;
        let line = self.lines.next_line().await?;
        Ok(line.map(|line| line.trim().to_owned()))
    }

    /// Ask for a letter and wait for a line until `deadline`.
    ///
    /// The read is dropped when the deadline wins. `next_line` is cancel
    /// safe, so nothing typed so far is lost for the next turn.
    ///
    /// # Errors
    /// Returns an error if reading or writing fails.
    pub async fn read_turn(&mut self, deadline: Instant) -> Result<TurnInput> {
        Self::write(&mut self.out, "Enter a letter: ").await?;

        let warn_at = deadline
            .checked_sub(WARN_BEFORE)
            .filter(|&at| at > Instant::now());
        let mut warned = warn_at.is_none();

        loop {
            tokio::select! {
                line = self.lines.next_line() => {
                    return Ok(match line? {
                        Some(line) => TurnInput::Line(line.trim().to_lowercase()),
                        None => TurnInput::Closed,
                    });
                }
                () = sleep_until(deadline) => {
                    Self::write(&mut self.out, "\n").await?;
                    tracing::debug!("Turn deadline reached");
                    return Ok(TurnInput::TimedOut);
                }
                () = sleep_until(warn_at.unwrap_or(deadline)), if !warned => {
                    warned = true;
                    let notice = format!("\n{}s left! Enter a letter: ", WARN_BEFORE.as_secs());
                    Self::write(&mut self.out, &notice).await?;
                }
            }
        }
    }

    /// Everything written so far goes through this sink.
    pub const fn output(&self) -> &W {
        &self.out
    }
}

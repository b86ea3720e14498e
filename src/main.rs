//! Hangman - guess the word before the clock or your lives run out.

use clap::Parser;
use color_eyre::eyre::{ContextCompat, Result};
use hangman_timed::console::Console;
use hangman_timed::game::{
    DEFAULT_MAX_LIVES, Difficulty, GameEngine, GameRunner, SessionStats, words,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Play hangman in the terminal with a countdown on every turn
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
struct Args {
    /// Difficulty for every game; asks before each game when omitted
    #[arg(short, long, value_enum)]
    mode: Option<Difficulty>,

    /// Lives at the start of each game
    #[arg(short, long, default_value_t = DEFAULT_MAX_LIVES, value_parser = clap::value_parser!(u32).range(1..))]
    lives: u32,

    /// Seconds allowed per turn
    #[arg(short, long = "turn-seconds", default_value = "15", value_parser = parse_turn_seconds)]
    turn: Duration,

    /// Seed for picking answers, for reproducible games
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the session summary as JSON
    #[arg(long)]
    stats_json: bool,
}

fn parse_turn_seconds(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|e| format!("'{value}' is not a number: {e}"))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("turn length must be positive, got {value}"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("turn length {value} is out of range: {e}"))
}

/// Show the difficulty menu until a valid choice arrives. `None` once input
/// is closed.
async fn choose_mode<R, W>(console: &mut Console<R, W>) -> Result<Option<Difficulty>>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    loop {
        console.say("\n=== Hangman Menu ===").await?;
        console.say("1) Beginner (random word)").await?;
        console.say("2) Intermediate (random phrase)").await?;
        let Some(choice) = console.prompt("Select difficulty (1/2): ").await? else {
            return Ok(None);
        };
        if let Some(difficulty) = Difficulty::from_menu_choice(&choice) {
            return Ok(Some(difficulty));
        }
        console.say("Invalid choice. Please enter 1 or 2.").await?;
    }
}

async fn ask_play_again<R, W>(console: &mut Console<R, W>) -> Result<bool>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    loop {
        let Some(answer) = console.prompt("\nPlay again? (y/n): ").await? else {
            return Ok(false);
        };
        match answer.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => console.say("Please enter y or n.").await?,
        }
    }
}

/// Play games until the player declines another or input closes.
async fn run_session<R, W, G>(
    args: &Args,
    console: &mut Console<R, W>,
    rng: &mut G,
) -> Result<SessionStats>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
    G: Rng + Send,
{
    let runner = GameRunner::new(args.turn);
    let mut stats = SessionStats::default();

    loop {
        let difficulty = match args.mode {
            Some(difficulty) => difficulty,
            None => match choose_mode(console).await? {
                Some(difficulty) => difficulty,
                None => break,
            },
        };

        let answer = words::choose(difficulty.candidates(), rng)
            .with_context(|| format!("No answers available for {difficulty:?}"))?;
        tracing::info!(?difficulty, game = stats.games + 1, "Starting game");

        let mut engine = GameEngine::new(*answer, args.lives)?;
        let outcome = runner.play(&mut engine, console).await?;
        stats.record(outcome);

        if !ask_play_again(console).await? {
            break;
        }
    }

    console.say("\nThanks for playing.").await?;
    Ok(stats)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Game text goes to stdout, so logs stay quiet unless RUST_LOG asks
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(ErrorLayer::default())
        .init();

    color_eyre::install()?;

    let args = Args::parse();
    tracing::info!(?args, "Starting hangman");

    let mut rng = args
        .seed
        .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    let mut console = Console::stdio();

    let stats = run_session(&args, &mut console, &mut rng).await?;

    if args.stats_json {
        console.say(&serde_json::to_string_pretty(&stats)?).await?;
    } else {
        console.say(&stats.summary()).await?;
    }
    tracing::info!(?stats, "Session finished");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangman_timed::game::words::WORDS;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("hangman").chain(extra.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = args(&[]);
        assert_eq!(args.mode, None);
        assert_eq!(args.lives, 6);
        assert_eq!(args.turn, Duration::from_secs(15));
        assert_eq!(args.seed, None);
        assert!(!args.stats_json);
    }

    #[test]
    fn test_flags_parse() {
        let args = args(&[
            "--mode",
            "intermediate",
            "--lives",
            "3",
            "--turn-seconds",
            "7.5",
            "--seed",
            "9",
            "--stats-json",
        ]);
        assert_eq!(args.mode, Some(Difficulty::Intermediate));
        assert_eq!(args.lives, 3);
        assert_eq!(args.turn, Duration::from_millis(7500));
        assert_eq!(args.seed, Some(9));
        assert!(args.stats_json);
    }

    #[test]
    fn test_rejects_bad_values() {
        let rejected: [&[&str]; 5] = [
            &["--lives", "0"],
            &["--turn-seconds", "0"],
            &["--turn-seconds", "-2"],
            &["--turn-seconds", "soon"],
            &["--mode", "expert"],
        ];
        for bad in rejected {
            let argv = std::iter::once("hangman").chain(bad.iter().copied());
            assert!(Args::try_parse_from(argv).is_err(), "accepted {bad:?}");
        }
        assert!(parse_turn_seconds("NaN").is_err());
        assert!(parse_turn_seconds("inf").is_err());
    }

    #[tokio::test]
    async fn test_menu_reprompts_until_valid() {
        let mut console = Console::new(&b"3\n\n2\n"[..], Vec::new());
        let choice = choose_mode(&mut console).await.unwrap();
        assert_eq!(choice, Some(Difficulty::Intermediate));

        let out = String::from_utf8_lossy(console.output()).into_owned();
        assert_eq!(out.matches("Invalid choice. Please enter 1 or 2.").count(), 2);
    }

    #[tokio::test]
    async fn test_menu_closed_input() {
        let mut console = Console::new(&b""[..], Vec::new());
        assert_eq!(choose_mode(&mut console).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_play_again_answers() {
        let mut console = Console::new(&b"maybe\nYES\nn\n"[..], Vec::new());
        assert!(ask_play_again(&mut console).await.unwrap());
        assert!(!ask_play_again(&mut console).await.unwrap());
        assert!(!ask_play_again(&mut console).await.unwrap());

        let out = String::from_utf8_lossy(console.output()).into_owned();
        assert_eq!(out.matches("Please enter y or n.").count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_counts_games() {
        let args = args(&["--mode", "beginner"]);
        let mut console = Console::new(&b"quit\ny\nquit\nn\n"[..], Vec::new());
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let stats = run_session(&args, &mut console, &mut rng).await.unwrap();

        assert_eq!(stats.games, 2);
        assert_eq!(stats.quit, 2);
        let out = String::from_utf8_lossy(console.output()).into_owned();
        assert!(out.ends_with("\nThanks for playing.\n"));
        let revealed = out
            .lines()
            .filter_map(|line| line.strip_prefix("You quit the game. The answer was: "))
            .collect::<Vec<_>>();
        assert_eq!(revealed.len(), 2);
        assert!(revealed.iter().all(|answer| WORDS.contains(answer)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_uses_menu_choice() {
        let args = args(&[]);
        let mut console = Console::new(&b"2\nquit\nno\n"[..], Vec::new());
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let stats = run_session(&args, &mut console, &mut rng).await.unwrap();

        assert_eq!(stats.games, 1);
        let out = String::from_utf8_lossy(console.output()).into_owned();
        let answer = out
            .lines()
            .find_map(|line| line.strip_prefix("You quit the game. The answer was: "))
            .unwrap();
        assert!(answer.contains(' '), "expected a phrase, got {answer:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_ends_when_menu_input_closes() {
        let args = args(&[]);
        let mut console = Console::new(&b""[..], Vec::new());
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let stats = run_session(&args, &mut console, &mut rng).await.unwrap();
        assert_eq!(stats, SessionStats::default());
    }
}

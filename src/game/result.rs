//! Game outcome and session tallies.

use serde::{Deserialize, Serialize};

/// How a single game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    /// Every letter was revealed
    Solved,
    /// The player ran out of lives
    Dead,
    /// The player typed `quit` or closed input
    Quit,
}

/// Results of every game played in this run. Kept in memory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub games: u32,
    pub solved: u32,
    pub lost: u32,
    pub quit: u32,
}

impl SessionStats {
    pub const fn record(&mut self, outcome: GameOutcome) {
        self.games += 1;
        match outcome {
            GameOutcome::Solved => self.solved += 1,
            GameOutcome::Dead => self.lost += 1,
            GameOutcome::Quit => self.quit += 1,
        }
    }

    /// One-line human summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Games: {}, solved: {}, lost: {}, quit: {}",
            self.games, self.solved, self.lost, self.quit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_each_outcome() {
        let mut stats = SessionStats::default();
        stats.record(GameOutcome::Solved);
        stats.record(GameOutcome::Solved);
        stats.record(GameOutcome::Dead);
        stats.record(GameOutcome::Quit);

        assert_eq!(
            stats,
            SessionStats {
                games: 4,
                solved: 2,
                lost: 1,
                quit: 1,
            }
        );
        assert_eq!(stats.summary(), "Games: 4, solved: 2, lost: 1, quit: 1");
    }

    #[test]
    fn test_stats_json_shape() {
        let mut stats = SessionStats::default();
        stats.record(GameOutcome::Dead);
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "games": 1, "solved": 0, "lost": 1, "quit": 0 })
        );
        assert_eq!(serde_json::to_string(&GameOutcome::Quit).unwrap(), "\"quit\"");
    }
}

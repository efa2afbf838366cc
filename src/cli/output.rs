//! Output formatting utilities for CLI.

use fendo::selfplay::GameResult;
use serde::Serialize;

/// Number of players reported on.
const PLAYERS: usize = 2;

/// JSON-serializable game result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult {
    /// Random seed used.
    pub(super) seed: u64,
    /// Winner player IDs (two entries on a tie).
    pub(super) winners: Vec<u8>,
    /// Final scores per player.
    pub(super) scores: Vec<u32>,
    /// Number of moves played.
    pub(super) moves_played: u32,
    /// The applied moves in canonical text encoding.
    pub(super) moves: Vec<String>,
}

impl JsonGameResult {
    /// Create from a `GameResult`.
    pub(super) fn from_game_result(result: &GameResult) -> Self {
        Self {
            seed: result.seed,
            winners: result.winners.clone(),
            scores: result.scores.to_vec(),
            moves_played: result.moves_played,
            moves: result.moves.clone(),
        }
    }
}

/// Format a game result as human-readable text.
pub(super) fn format_text(result: &GameResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Game Result (seed: {})\n", result.seed));
    match result.winners.as_slice() {
        [] => output.push_str("  Winner: none (move cap reached)\n"),
        [winner] => output.push_str(&format!("  Winner: Player {winner}\n")),
        winners => {
            let names: Vec<String> = winners.iter().map(|w| format!("Player {w}")).collect();
            output.push_str(&format!("  Winner: tie ({})\n", names.join(", ")));
        }
    }
    output.push_str(&format!("  Moves: {}\n\n", result.moves_played));

    for (i, score) in result.scores.iter().enumerate() {
        output.push_str(&format!("  Player {}: {score} points\n", i + 1));
    }

    output
}

/// Aggregated statistics over many self-play games.
#[derive(Debug, Default)]
pub(super) struct SelfPlayStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Sole-win count per player.
    pub(super) wins: [u64; PLAYERS],
    /// Tied games (all players in the winner set).
    pub(super) ties: u64,
    /// Games abandoned at the move cap.
    pub(super) incomplete: u64,
    /// Total score per player.
    total_scores: [u64; PLAYERS],
    /// Total moves across all games.
    total_moves: u64,
}

impl SelfPlayStats {
    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_moves += u64::from(result.moves_played);

        if !result.completed {
            self.incomplete += 1;
        } else if let [winner] = result.winners.as_slice() {
            let idx = usize::from(*winner) - 1;
            if idx < PLAYERS {
                self.wins[idx] += 1;
            }
        } else {
            self.ties += 1;
        }

        for (i, score) in result.scores.iter().enumerate().take(PLAYERS) {
            self.total_scores[i] += u64::from(*score);
        }
    }

    /// Merge another accumulator into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.ties += other.ties;
        self.incomplete += other.incomplete;
        self.total_moves += other.total_moves;
        for i in 0..PLAYERS {
            self.wins[i] += other.wins[i];
            self.total_scores[i] += other.total_scores[i];
        }
    }

    /// Sole-win rate for a player (0.0-1.0).
    pub(super) fn win_rate(&self, player_idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins.get(player_idx).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Average score for a player.
    pub(super) fn avg_score(&self, player_idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_scores.get(player_idx).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Average game length in moves.
    pub(super) fn avg_moves(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.games_played as f64
    }
}

/// JSON-serializable stats result.
#[derive(Debug, Serialize)]
pub(super) struct JsonStatsResult {
    /// Total games played.
    games_played: u64,
    /// Per-player statistics.
    players: Vec<JsonStatsPlayer>,
    /// Number of ties.
    ties: u64,
    /// Games abandoned at the move cap.
    incomplete: u64,
    /// Average game length in moves.
    avg_moves: f64,
}

/// JSON-serializable per-player stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonStatsPlayer {
    /// Player ID (1-based).
    player: usize,
    /// Number of sole wins.
    wins: u64,
    /// Sole-win rate (0.0-1.0).
    win_rate: f64,
    /// Average score.
    avg_score: f64,
}

impl JsonStatsResult {
    /// Create from an accumulator.
    pub(super) fn from_stats(stats: &SelfPlayStats) -> Self {
        let players = (0..PLAYERS)
            .map(|i| JsonStatsPlayer {
                player: i + 1,
                wins: stats.wins[i],
                win_rate: stats.win_rate(i),
                avg_score: stats.avg_score(i),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            players,
            ties: stats.ties,
            incomplete: stats.incomplete,
            avg_moves: stats.avg_moves(),
        }
    }
}

/// Format aggregated stats as human-readable text.
pub(super) fn format_stats_text(stats: &SelfPlayStats) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Self-play Results ({} games)\n",
        stats.games_played
    ));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for i in 0..PLAYERS {
        output.push_str(&format!(
            "  Player {}: {:.1}% ({} wins)\n",
            i + 1,
            stats.win_rate(i) * 100.0,
            stats.wins[i]
        ));
    }
    if stats.games_played > 0 {
        output.push_str(&format!(
            "  Ties: {} ({:.1}%)\n\n",
            stats.ties,
            (stats.ties as f64 / stats.games_played as f64) * 100.0
        ));
    }

    output.push_str("Average Scores:\n");
    for i in 0..PLAYERS {
        output.push_str(&format!("  Player {}: {:.1}\n", i + 1, stats.avg_score(i)));
    }

    output.push_str(&format!("\nAverage Game Length: {:.0} moves\n", stats.avg_moves()));
    if stats.incomplete > 0 {
        output.push_str(&format!(
            "Incomplete games (move cap): {}\n",
            stats.incomplete
        ));
    }

    output
}

/// Format aggregated stats as CSV.
pub(super) fn format_stats_csv(stats: &SelfPlayStats) -> String {
    let mut output = String::new();

    // Header
    output.push_str("player,wins,win_rate,avg_score\n");

    // Data rows
    for i in 0..PLAYERS {
        output.push_str(&format!(
            "{},{},{:.4},{:.2}\n",
            i + 1,
            stats.wins[i],
            stats.win_rate(i),
            stats.avg_score(i)
        ));
    }

    output
}

//! Match results storage and reporting

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PlayError, PlayResult};

/// Result of a single game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// The same game seen from the other side.
    pub fn flipped(self) -> GameResult {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }
}

/// How a game ended
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Termination {
    KingCaptured,
    /// The same position came up a third time
    Repetition,
    /// The ply cap was reached
    PlyLimit,
    /// The side to move had no move at all
    NoMove,
}

/// Result of a match (multiple games)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from engine1's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

/// Summary of one game, from White's point of view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    pub result: GameResult,
    pub termination: Termination,
    /// Move log ("e2e4", "Ng1f3", ...)
    pub moves: Vec<String>,
}

/// Everything a finished match produced
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchReport {
    pub engine1: String,
    pub engine2: String,
    pub result: MatchResult,
    pub games: Vec<GameRecord>,
}

impl MatchReport {
    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> PlayResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| PlayError::io(path, e))
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> PlayResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PlayError::io(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== {} vs {} ===\n\n", self.engine1, self.engine2));

        for (i, game) in self.games.iter().enumerate() {
            let outcome = match game.result {
                GameResult::Win => "1-0",
                GameResult::Loss => "0-1",
                GameResult::Draw => "1/2",
            };
            report.push_str(&format!(
                "Game {:>3}: {:<16} - {:<16} {:<4} {:?} ({} plies)\n",
                i + 1,
                game.white,
                game.black,
                outcome,
                game.termination,
                game.moves.len()
            ));
        }

        report.push_str(&"-".repeat(60));
        report.push('\n');
        report.push_str(&format!(
            "{}: {} wins, {} losses, {} draws (score {:.1}%)\n",
            self.engine1,
            self.result.wins,
            self.result.losses,
            self.result.draws,
            self.result.score() * 100.0
        ));
        report
    }
}

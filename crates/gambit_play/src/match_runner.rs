//! Match runner for playing games between engines

use std::time::Duration;

use gambit_core::{record_move, Engine, Position, SearchLimits};
use tracing::{debug, info};

use crate::results::{GameRecord, GameResult, MatchReport, MatchResult, Termination};

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Deepest iteration per move
    pub depth: u32,
    /// Maximum time per move (None = no limit)
    pub time_per_move: Option<Duration>,
    /// Maximum plies per game before declaring draw
    pub max_plies: u32,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            depth: u32::MAX,
            time_per_move: Some(Duration::from_secs(1)),
            max_plies: 300,
            alternate_colors: true,
        }
    }
}

impl MatchConfig {
    /// Create search limits based on this config
    fn search_limits(&self) -> SearchLimits {
        match self.time_per_move {
            Some(time) => SearchLimits::depth_and_time(self.depth, time),
            None => SearchLimits::depth(self.depth),
        }
    }
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Run a match between two engines
    ///
    /// Returns the result from engine1's perspective
    pub fn run_match(&self, engine1: &mut dyn Engine, engine2: &mut dyn Engine) -> MatchReport {
        let mut result = MatchResult::new();
        let mut games = Vec::with_capacity(self.config.num_games as usize);

        for game_num in 0..self.config.num_games {
            let engine1_white = !self.config.alternate_colors || game_num % 2 == 0;

            let game = if engine1_white {
                self.play_game(engine1, engine2)
            } else {
                self.play_game(engine2, engine1)
            };
            let game_result = if engine1_white {
                game.result
            } else {
                game.result.flipped()
            };
            result.record(game_result);

            info!(
                game = game_num + 1,
                of = self.config.num_games,
                white = %game.white,
                black = %game.black,
                result = ?game.result,
                termination = ?game.termination,
                plies = game.moves.len(),
                wins = result.wins,
                losses = result.losses,
                draws = result.draws,
                "game finished"
            );
            games.push(game);
        }

        MatchReport {
            engine1: engine1.name().to_string(),
            engine2: engine2.name().to_string(),
            result,
            games,
        }
    }

    /// Play a single game, returns result from white's perspective
    pub fn play_game(&self, white: &mut dyn Engine, black: &mut dyn Engine) -> GameRecord {
        white.new_game();
        black.new_game();

        let mut positions = vec![Position::startpos()];
        let mut moves = Vec::new();

        let (result, termination) = 'game: {
            for ply in 0..self.config.max_plies {
                let white_to_move = ply % 2 == 0;
                let pos = &positions[positions.len() - 1];

                // Create fresh search limits for each move (resets the clock)
                let limits = self.config.search_limits();
                let search = if white_to_move {
                    white.search(pos, &positions, limits)
                } else {
                    black.search(pos, &positions, limits)
                };

                let Some(m) = search.best_move else {
                    break 'game (GameResult::Draw, Termination::NoMove);
                };
                moves.push(record_move(pos, m, white_to_move));
                let next = pos.make_move(m);
                debug!(ply, record = %moves[moves.len() - 1], score = search.score, depth = search.depth, "move");

                if next.is_king_lost() {
                    let result = if white_to_move {
                        GameResult::Win
                    } else {
                        GameResult::Loss
                    };
                    break 'game (result, Termination::KingCaptured);
                }

                // Only positions with the same side to move can repeat
                let repeats = positions
                    .iter()
                    .rev()
                    .skip(1)
                    .step_by(2)
                    .filter(|p| **p == next)
                    .count();
                positions.push(next);
                if repeats >= 2 {
                    break 'game (GameResult::Draw, Termination::Repetition);
                }
            }
            (GameResult::Draw, Termination::PlyLimit)
        };

        GameRecord {
            white: white.name().to_string(),
            black: black.name().to_string(),
            result,
            termination,
            moves,
        }
    }
}

/// Quick utility to run a single match
pub fn quick_match(engine1: &mut dyn Engine, engine2: &mut dyn Engine, num_games: u32, depth: u32) -> MatchReport {
    let config = MatchConfig {
        num_games,
        depth,
        time_per_move: None,
        ..Default::default()
    };
    let runner = MatchRunner::new(config);
    runner.run_match(engine1, engine2)
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;

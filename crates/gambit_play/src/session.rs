//! A game between a player and the engine, or between two players

use std::fmt;

use gambit_core::{parse_move, record_move, Engine, Move, Position, SearchResult};
use rand::thread_rng;
use tracing::info;

use crate::config::PlayConfig;
use crate::error::{PlayError, PlayResult};
use crate::eval_bar::eval_bar;
use crate::opening::pick_opening;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// Who sits on which side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// The player has White against the engine
    PlayerWhite,
    /// The player has Black against the engine
    PlayerBlack,
    /// Two players, no engine
    PlayerVsPlayer,
}

impl GameMode {
    pub fn engine_side(self) -> Option<Side> {
        match self {
            GameMode::PlayerWhite => Some(Side::Black),
            GameMode::PlayerBlack => Some(Side::White),
            GameMode::PlayerVsPlayer => None,
        }
    }
}

/// One applied half-move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub side: Side,
    /// Move in the mover's orientation, as applied
    pub mv: Move,
    /// Log text such as "Ng1f3" or "e2e4"
    pub record: String,
}

/// Engine move together with what the engine thought of it.
#[derive(Debug, Clone)]
pub struct EngineReply {
    pub played: PlayedMove,
    /// None when the move came from the opening book
    pub search: Option<SearchResult>,
}

/// Game state: every position reached so far plus the move log.
///
/// `positions[0]` is the start and the side to move alternates from White,
/// so the last position is always seen from the side to move.
pub struct GameSession {
    mode: GameMode,
    config: PlayConfig,
    engine: Box<dyn Engine>,
    positions: Vec<Position>,
    moves: Vec<PlayedMove>,
    winner: Option<Side>,
}

impl GameSession {
    pub fn new(mode: GameMode, config: PlayConfig, mut engine: Box<dyn Engine>) -> Self {
        engine.new_game();
        info!(?mode, engine = engine.name(), "new game");
        Self {
            mode,
            config,
            engine,
            positions: vec![Position::startpos()],
            moves: Vec::new(),
            winner: None,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn config(&self) -> &PlayConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PlayConfig {
        &mut self.config
    }

    /// Current position, seen from the side to move.
    pub fn position(&self) -> &Position {
        // Never empty: takebacks keep the start position
        &self.positions[self.positions.len() - 1]
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn moves(&self) -> &[PlayedMove] {
        &self.moves
    }

    /// Half-moves played so far.
    pub fn ply(&self) -> usize {
        self.positions.len() - 1
    }

    pub fn white_to_move(&self) -> bool {
        self.ply() % 2 == 0
    }

    pub fn side_to_move(&self) -> Side {
        if self.white_to_move() {
            Side::White
        } else {
            Side::Black
        }
    }

    /// The side that captured a king, once the game is over.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn is_engine_turn(&self) -> bool {
        !self.is_over() && self.mode.engine_side() == Some(self.side_to_move())
    }

    /// Applies a player's move given as text in absolute coordinates.
    pub fn play(&mut self, text: &str) -> PlayResult<&PlayedMove> {
        if self.is_over() {
            return Err(PlayError::GameOver);
        }
        if self.is_engine_turn() {
            return Err(PlayError::NotYourTurn);
        }
        let m = parse_move(self.position(), text, self.white_to_move())?;
        Ok(self.apply(m))
    }

    /// Lets the engine move, within the configured thinking time.
    pub fn engine_move(&mut self) -> PlayResult<EngineReply> {
        if self.is_over() {
            return Err(PlayError::GameOver);
        }
        if !self.is_engine_turn() {
            return Err(PlayError::NotEngineTurn);
        }

        if self.ply() == 0 && self.config.use_opening_book {
            if let Some(m) = pick_opening(&mut thread_rng()) {
                let played = self.apply(m).clone();
                return Ok(EngineReply { played, search: None });
            }
        }

        let limits = self.config.search_limits();
        let pos = &self.positions[self.positions.len() - 1];
        let result = self.engine.search(pos, &self.positions, limits);
        let m = result.best_move.ok_or(PlayError::NoMove)?;
        let played = self.apply(m).clone();
        Ok(EngineReply {
            played,
            search: Some(result),
        })
    }

    /// Undoes the requester's last move: one ply between players, two
    /// against the engine when it has already answered.
    pub fn takeback(&mut self) -> PlayResult<usize> {
        let count = match self.mode.engine_side() {
            Some(engine) if engine != self.side_to_move() => 2,
            _ => 1,
        };
        if self.ply() < count {
            return Err(PlayError::NothingToTakeBack);
        }

        self.positions.truncate(self.positions.len() - count);
        self.moves.truncate(self.moves.len() - count);
        self.winner = None;
        info!(plies = count, ply = self.ply(), "takeback");
        Ok(count)
    }

    /// Score of the current position from White's point of view.
    pub fn white_score(&self) -> i32 {
        let score = self.position().score;
        if self.white_to_move() {
            score
        } else {
            -score
        }
    }

    /// Board diagram from White's side, with the eval bar when enabled.
    pub fn render(&self, unicode: bool) -> String {
        let mut out = self.position().diagram(self.white_to_move(), unicode);
        if self.config.show_eval {
            out.push_str(&eval_bar(self.white_score()));
            out.push('\n');
        }
        out
    }

    /// Move log as numbered pairs: "1. e2e4 e7e5 2. Ng1f3".
    pub fn log_text(&self) -> String {
        let mut out = String::new();
        for (i, pair) in self.moves.chunks(2).enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&format!("{}.", i + 1));
            for played in pair {
                out.push(' ');
                out.push_str(&played.record);
            }
        }
        out
    }

    fn apply(&mut self, m: Move) -> &PlayedMove {
        let side = self.side_to_move();
        let pos = self.position();
        let record = record_move(pos, m, self.white_to_move());
        let next = pos.make_move(m);
        let king_taken = next.is_king_lost();

        self.positions.push(next);
        info!(%side, ply = self.ply(), %record, "move");
        if king_taken {
            info!(winner = %side, "king captured, game over");
            self.winner = Some(side);
        }

        self.moves.push(PlayedMove { side, mv: m, record });
        &self.moves[self.moves.len() - 1]
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;

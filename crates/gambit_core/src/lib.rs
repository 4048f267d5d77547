//! Position model for the gambit king-capture chess engine.
//!
//! The board is a 10x12 mailbox seen from the side to move, which always
//! owns the uppercase pieces and always moves north. Every applied move
//! rotates the board, so there is no per-colour code anywhere.

pub mod board;
pub mod error;
pub mod movegen;
pub mod notation;
pub mod pst;
pub mod time_control;
pub mod types;

pub use board::*;
pub use error::NotationError;
pub use movegen::MoveGen;
pub use notation::*;
pub use pst::{pst, MATE_LOWER, MATE_UPPER, PIECE_VALUES};
pub use time_control::*;
pub use types::*;

// =============================================================================
// Engine trait, implemented by anything that can pick a move
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if the search produced no move)
    pub best_move: Option<Move>,
    /// Evaluation of the best move from the side to move's perspective
    pub score: i32,
    /// Deepest completed iteration
    pub depth: u32,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether search was stopped by the time budget rather than depth
    pub stopped: bool,
}

/// Trait that all engines implement, so sessions and match runners can
/// swap them freely.
pub trait Engine: Send {
    /// Search `pos` within `limits`.
    ///
    /// `history` must hold every position actually reached in the game so
    /// far (including `pos`); repetition draws are judged against it, and an
    /// incomplete history silently weakens that judgement.
    fn search(&mut self, pos: &Position, history: &[Position], limits: SearchLimits) -> SearchResult;

    /// Returns the engine's name for display
    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "gambit"
    }

    /// Reset internal state for a new game (clear tables, history, etc.)
    fn new_game(&mut self) {}
}

//! Gambit search engine
//!
//! MTD-bi: a binary search on the score driven by a single fail-soft
//! null-window primitive, with null-move pruning, a capture-only quiescence
//! stage and killer moves, all memoised in tables owned by a [`Searcher`].

pub mod config;
mod searcher;
pub mod table;

use gambit_core::{Engine, Position, SearchLimits, SearchResult};
use tracing::debug;

pub use config::SearchConfig;
pub use searcher::{Deepening, Iteration, Searcher};
pub use table::Entry;

/// [`Engine`] adapter that deepens until the limits run out.
///
/// Depth 1 always completes, so a move is available whenever the position
/// has one. The move reported is the one from the last finished depth.
#[derive(Debug, Clone, Default)]
pub struct GambitEngine {
    searcher: Searcher,
}

impl GambitEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            searcher: Searcher::with_config(config),
        }
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }}

impl Engine for GambitEngine {
    fn search(&mut self, pos: &Position, history: &[Position], limits: SearchLimits) -> SearchResult {
        limits.start();

        let mut result = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stopped: false,
        };

        for iteration in self.searcher.search(pos, history) {
            result.depth = iteration.depth;
            result.score = iteration.score;
            if iteration.best_move.is_some() {
                result.best_move = iteration.best_move;
            }
            if !limits.should_deepen(iteration.depth) {
                result.stopped = limits.time_control.is_stopped();
                break;
            }
        }
        result.nodes = self.searcher.nodes();

        debug!(
            depth = result.depth,
            score = result.score,
            nodes = result.nodes,
            stopped = result.stopped,
            "search finished"
        );
        result
    }

    fn name(&self) -> &str {
        "Gambit MTD-bi"
    }

    fn new_game(&mut self) {
        self.searcher.clear();
    }
}

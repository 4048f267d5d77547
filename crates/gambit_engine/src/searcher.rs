//! MTD-bi search: iterative deepening over a fail-soft null-window bound.

use std::collections::HashSet;

use gambit_core::{Move, Position, MATE_LOWER, MATE_UPPER};
use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::table::{BoundedTable, Entry, ScoreKey};

/// One completed iteration of the deepening driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iteration {
    pub depth: u32,
    /// Killer move at the root once the depth is done; None only when the
    /// position has no move worth recording (e.g. the king is already gone)
    pub best_move: Option<Move>,
    /// Lower bound on the root score from the side to move's perspective
    pub score: i32,
}

/// Stateful searcher. Tables survive between searches of the same game;
/// one searcher per concurrent game.
#[derive(Debug, Clone)]
pub struct Searcher {
    config: SearchConfig,
    tp_score: BoundedTable<ScoreKey, Entry>,
    tp_move: BoundedTable<Position, Option<Move>>,
    history: HashSet<Position>,
    nodes: u64,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            tp_score: BoundedTable::new("score", config.table_size),
            tp_move: BoundedTable::new("killer", config.table_size),
            history: HashSet::new(),
            nodes: 0,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Nodes visited since the last call to [`Searcher::search`].
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Best move last recorded for `pos`, if any.
    pub fn killer(&self, pos: &Position) -> Option<Move> {
        self.tp_move.get(pos).copied().flatten()
    }

    /// Stored score bounds for `pos` at `depth`.
    pub fn entry(&self, pos: &Position, depth: i32, root: bool) -> Option<Entry> {
        let key = ScoreKey {
            pos: pos.clone(),
            depth,
            root,
        };
        self.tp_score.get(&key).copied()
    }

    /// Replaces the set of positions already reached in the real game.
    ///
    /// Score bounds computed against the old history are no longer valid, so
    /// the score table is emptied too.
    pub fn set_history(&mut self, history: &[Position]) {
        self.history = history.iter().cloned().collect();
        self.tp_score.clear();
        trace!(positions = self.history.len(), "history replaced");
    }

    /// Forget everything, as for a new game.
    pub fn clear(&mut self) {
        self.tp_score.clear();
        self.tp_move.clear();
        self.history.clear();
        self.nodes = 0;
    }

    /// Fail-soft null-window search around `gamma`.
    ///
    /// A result `r < gamma` means the true score is at most `r`; `r >= gamma`
    /// means it is at least `r`.
    pub fn bound(&mut self, pos: &Position, gamma: i32, depth: i32, root: bool) -> i32 {
        self.nodes += 1;
        let depth = depth.max(0);

        // Our king is gone
        if pos.score <= -MATE_LOWER {
            return -MATE_UPPER;
        }

        // Repeating a game position is a draw. Checked before the table,
        // since stored bounds do not know about the history.
        if self.config.draw_test && !root && self.history.contains(pos) {
            return 0;
        }

        let key = ScoreKey {
            pos: pos.clone(),
            depth,
            root,
        };
        let entry = self.tp_score.get(&key).copied().unwrap_or_default();
        if entry.lower >= gamma && (!root || self.killer(pos).is_some()) {
            return entry.lower;
        }
        if entry.upper < gamma {
            return entry.upper;
        }

        let qs_limit = self.config.qs_limit;
        let mut best = -MATE_UPPER;
        // Some(killer) once a candidate reached gamma; the inner None is a pass
        let mut cutoff: Option<Option<Move>> = None;

        'candidates: {
            if depth > 0 && !root && pos.has_officers() {
                let score = -self.bound(&pos.nullmove(), 1 - gamma, depth - 3, false);
                best = best.max(score);
                if best >= gamma {
                    cutoff = Some(None);
                    break 'candidates;
                }
            }

            if depth == 0 {
                best = best.max(pos.score);
                if best >= gamma {
                    cutoff = Some(None);
                    break 'candidates;
                }
            }

            if let Some(killer) = self.killer(pos) {
                if depth > 0 || pos.value(killer) >= qs_limit {
                    let score = -self.bound(&pos.make_move(killer), 1 - gamma, depth - 1, false);
                    best = best.max(score);
                    if best >= gamma {
                        cutoff = Some(Some(killer));
                        break 'candidates;
                    }
                }
            }

            let mut moves: Vec<(i32, Move)> = pos.gen_moves().map(|m| (pos.value(m), m)).collect();
            moves.sort_by(|a, b| b.0.cmp(&a.0));
            for (value, m) in moves {
                // Sorted, so nothing after this reaches the limit either
                if depth == 0 && value < qs_limit {
                    break;
                }
                let score = -self.bound(&pos.make_move(m), 1 - gamma, depth - 1, false);
                best = best.max(score);
                if best >= gamma {
                    cutoff = Some(Some(m));
                    break 'candidates;
                }
            }
        }

        if let Some(killer) = cutoff {
            self.tp_move.insert(pos.clone(), killer);
        }

        // Every move hands the opponent our king: mated if passing does too,
        // stalemated otherwise.
        if best < gamma && best < 0 && depth > 0 {
            let exposes_king = |p: &Position| p.gen_moves().any(|m| p.value(m) >= MATE_LOWER);
            if pos.gen_moves().all(|m| exposes_king(&pos.make_move(m))) {
                let in_check = exposes_king(&pos.nullmove());
                best = if in_check { -MATE_UPPER } else { 0 };
            }
        }

        if best >= gamma {
            self.tp_score.insert(
                key,
                Entry {
                    lower: best,
                    upper: entry.upper,
                },
            );
        } else {
            self.tp_score.insert(
                key,
                Entry {
                    lower: entry.lower,
                    upper: best,
                },
            );
        }

        best
    }

    /// Iterative deepening from `pos`.
    ///
    /// `history` holds the positions reached in the real game; an incomplete
    /// history only weakens repetition detection. Each call to `next` on the
    /// returned iterator runs one more depth, so the caller stops the search
    /// simply by not asking for more.
    pub fn search(&mut self, pos: &Position, history: &[Position]) -> Deepening<'_> {
        self.nodes = 0;
        if self.config.draw_test {
            self.set_history(history);
        }
        Deepening {
            searcher: self,
            pos: pos.clone(),
            depth: 0,
        }
    }

    /// Binary search on gamma at a fixed depth.
    fn iterate(&mut self, pos: &Position, depth: i32) -> Iteration {
        let roughness = self.config.eval_roughness.max(0);
        let (mut lower, mut upper) = (-MATE_UPPER, MATE_UPPER);
        while lower < upper - roughness {
            let gamma = (lower + upper + 1).div_euclid(2);
            let score = self.bound(pos, gamma, depth, true);
            if score >= gamma {
                lower = score;
            } else {
                upper = score;
            }
        }

        // Makes sure the killer table holds a root move
        self.bound(pos, lower, depth, true);

        let best_move = self.killer(pos);
        let score = self.entry(pos, depth, true).map_or(lower, |e| e.lower);
        debug!(
            depth,
            score,
            nodes = self.nodes,
            best_move = %best_move.map_or_else(|| "-".to_string(), |m| m.to_string()),
            "depth complete"
        );

        Iteration {
            depth: depth as u32,
            best_move,
            score,
        }
    }
}

/// Lazy per-depth results of [`Searcher::search`], starting at depth 1.
#[derive(Debug)]
pub struct Deepening<'a> {
    searcher: &'a mut Searcher,
    pos: Position,
    depth: i32,
}

impl Deepening<'_> {
    /// Nodes visited so far by this search.
    pub fn nodes(&self) -> u64 {
        self.searcher.nodes
    }
}

impl Iterator for Deepening<'_> {
    type Item = Iteration;

    fn next(&mut self) -> Option<Iteration> {
        if self.depth as u32 >= self.searcher.config.max_depth {
            return None;
        }
        self.depth += 1;
        Some(self.searcher.iterate(&self.pos, self.depth))
    }
}

#[cfg(test)]
#[path = "searcher_tests.rs"]
mod searcher_tests;

//! Lazy pseudo-legal move generation over the mailbox.
//!
//! Moves are produced ray by ray, piece by piece, in board order. Nothing is
//! filtered for king safety: the search treats a left-in-check king as a
//! king that will simply be captured on the next ply.

use crate::board::Position;
use crate::types::*;

/// Restartable cursor over the pseudo-legal moves of a position.
///
/// Obtained from [`Position::gen_moves`]; cloning the cursor restarts nothing,
/// call `gen_moves` again for a fresh pass.
#[derive(Clone, Debug)]
pub struct MoveGen<'a> {
    pos: &'a Position,
    from: usize,
    dir: usize,
    /// Last cell reached on the current ray, `None` before the first step.
    reached: Option<Cell>,
    /// Castling move discovered on the rook's ray, yielded right after it.
    pending: Option<Move>,
}

impl<'a> MoveGen<'a> {
    pub(crate) fn new(pos: &'a Position) -> Self {
        Self {
            pos,
            from: 0,
            dir: 0,
            reached: None,
            pending: None,
        }
    }

    fn next_ray(&mut self) {
        self.dir += 1;
        self.reached = None;
    }

    fn next_piece(&mut self) {
        self.from += 1;
        self.dir = 0;
        self.reached = None;
    }

    /// Whether `kind` standing on `from` may step onto `to` along `dir`.
    fn admits(&self, kind: PieceKind, from: Cell, to: Cell, dir: i8) -> bool {
        let board = &self.pos.board;
        let target = board[to as usize];
        // Stay inside the board, and off friendly pieces
        if matches!(target, Square::Offboard | Square::Own(_)) {
            return false;
        }
        if kind != PieceKind::Pawn {
            return true;
        }
        let push = dir == N || dir == N + N;
        if push && target != Square::Empty {
            return false;
        }
        if dir == N + N && (from < A1 - 10 || board[step(from, N) as usize] != Square::Empty) {
            return false;
        }
        if !push && target == Square::Empty {
            let en_passant = self.pos.ep == Some(to);
            let king_passant = self.pos.kp.is_some_and(|kp| kp.abs_diff(to) <= 1);
            if !en_passant && !king_passant {
                return false;
            }
        }
        true
    }
}

impl Iterator for MoveGen<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        if let Some(castle) = self.pending.take() {
            return Some(castle);
        }

        while self.from < BOARD_CELLS {
            let kind = match self.pos.board[self.from] {
                Square::Own(kind) => kind,
                _ => {
                    self.next_piece();
                    continue;
                }
            };
            let dirs = kind.directions();
            if self.dir >= dirs.len() {
                self.next_piece();
                continue;
            }

            let dir = dirs[self.dir];
            let from = self.from as Cell;
            let to = step(self.reached.unwrap_or(from), dir);
            if !self.admits(kind, from, to, dir) {
                self.next_ray();
                continue;
            }

            // Stop crawlers from sliding, and sliding after captures
            if kind.is_crawler() || self.pos.board[to as usize].is_foe() {
                self.next_ray();
            } else {
                self.reached = Some(to);
                // Castling, by sliding the rook next to the king
                let board = &self.pos.board;
                let king = Square::Own(PieceKind::King);
                if from == A1 && board[step(to, E) as usize] == king && self.pos.castling.west {
                    self.pending = Some(Move::new(step(to, E), step(to, W)));
                }
                if from == H1 && board[step(to, W) as usize] == king && self.pos.castling.east {
                    self.pending = Some(Move::new(step(to, W), step(to, E)));
                }
            }
            return Some(Move::new(from, to));
        }
        None
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;

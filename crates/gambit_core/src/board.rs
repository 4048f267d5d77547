use std::fmt;

use crate::error::NotationError;
use crate::movegen::MoveGen;
use crate::notation::parse_square;
use crate::pst::{pst, MATE_LOWER};
use crate::types::*;

/// An immutable, side-relative snapshot of a game.
///
/// The side to move always owns the [`Square::Own`] pieces and always moves
/// north (toward lower cell indices). Applying a move returns the rotated
/// successor, so the same generation and evaluation code serves both colours.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: [Square; BOARD_CELLS],
    /// Evaluation from the side to move's point of view.
    pub score: i32,
    /// Rights of the side to move.
    pub castling: CastlingRights,
    /// Rights of the opponent, in the opponent's own orientation.
    pub foe_castling: CastlingRights,
    /// Cell skipped by the opponent's double pawn push.
    pub ep: Option<Cell>,
    /// Cell the opponent's king crossed while castling.
    pub kp: Option<Cell>,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    /// Standard starting position, White to move, full castling rights.
    pub fn startpos() -> Self {
        let mut board = [Square::Offboard; BOARD_CELLS];
        for rank in 0..8u8 {
            for file in 0..8u8 {
                if let Some(c) = cell(file, rank) {
                    board[c as usize] = Square::Empty;
                }
            }
        }
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            board[(A1 + file) as usize] = Square::Own(kind);
            board[(A1 + file - 10) as usize] = Square::Own(PieceKind::Pawn);
            board[(A8 + file + 10) as usize] = Square::Foe(PieceKind::Pawn);
            // Black's back rank mirrors White's files: queen on d8, king on e8
            board[(A8 + file) as usize] = Square::Foe(kind);
        }
        Position {
            board,
            score: 0,
            castling: CastlingRights::ALL,
            foe_castling: CastlingRights::ALL,
            ep: None,
            kp: None,
        }
    }

    /// Parses Forsyth-Edwards Notation. Move counters are accepted but ignored.
    ///
    /// Unlike [`Position::startpos`], the score is the full piece-square
    /// balance of the board, so positions reached from a parsed FEN and from
    /// the start position are not comparable by score.
    pub fn from_fen(fen: &str) -> Result<Self, NotationError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(NotationError::fen("expected at least 4 fields"));
        }

        let mut board = Self::startpos().board;
        for c in 0..BOARD_CELLS {
            if board[c] != Square::Offboard {
                board[c] = Square::Empty;
            }
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(NotationError::fen("board section must have 8 ranks"));
        }
        for (row, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - row as u8; // FEN lists rank 8 .. 1
            let mut file: u8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as u8;
                } else {
                    let kind = PieceKind::from_glyph(ch)
                        .ok_or_else(|| NotationError::fen(format!("invalid piece {ch:?}")))?;
                    let c = cell(file, rank)
                        .ok_or_else(|| NotationError::fen(format!("rank {} is too long", rank + 1)))?;
                    board[c as usize] = if ch.is_ascii_uppercase() {
                        Square::Own(kind)
                    } else {
                        Square::Foe(kind)
                    };
                    file += 1;
                }
                if file > 8 {
                    return Err(NotationError::fen(format!("rank {} is too long", rank + 1)));
                }
            }
            if file != 8 {
                return Err(NotationError::fen(format!("rank {} is too short", rank + 1)));
            }
        }

        let white_to_move = match parts[1] {
            "w" => true,
            "b" => false,
            other => return Err(NotationError::fen(format!("invalid side to move {other:?}"))),
        };

        // White's west rook is on a1 (queenside); Black's west rook, seen
        // from Black's side of the board, is on h8 (kingside).
        let mut castling = CastlingRights::NONE;
        let mut foe_castling = CastlingRights::NONE;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.east = true,
                    'Q' => castling.west = true,
                    'k' => foe_castling.west = true,
                    'q' => foe_castling.east = true,
                    _ => return Err(NotationError::fen(format!("invalid castling flag {c:?}"))),
                }
            }
        }
        let own_king = board[(A1 + 4) as usize] == Square::Own(PieceKind::King);
        let foe_king = board[(A8 + 4) as usize] == Square::Foe(PieceKind::King);
        castling.west &= own_king && board[A1 as usize] == Square::Own(PieceKind::Rook);
        castling.east &= own_king && board[H1 as usize] == Square::Own(PieceKind::Rook);
        foe_castling.west &= foe_king && board[H8 as usize] == Square::Foe(PieceKind::Rook);
        foe_castling.east &= foe_king && board[A8 as usize] == Square::Foe(PieceKind::Rook);

        let ep = match parts[3] {
            "-" => None,
            sq => Some(parse_square(sq).map_err(|_| NotationError::fen(format!("invalid en-passant square {sq:?}")))?),
        };

        let mut pos = Position {
            board,
            score: 0,
            castling,
            foe_castling,
            ep,
            kp: None,
        };
        pos.score = pos.material_balance();
        Ok(if white_to_move { pos } else { pos.rotate() })
    }

    /// Piece-square balance of the board from the side to move's view.
    pub fn material_balance(&self) -> i32 {
        self.board
            .iter()
            .enumerate()
            .map(|(c, sq)| match *sq {
                Square::Own(k) => pst(k, c as Cell),
                Square::Foe(k) => -pst(k, mirror(c as Cell)),
                _ => 0,
            })
            .sum()
    }

    pub fn piece_at(&self, c: Cell) -> Square {
        self.board[c as usize]
    }

    /// Pseudo-legal moves of the side to move, generated lazily.
    pub fn gen_moves(&self) -> MoveGen<'_> {
        MoveGen::new(self)
    }

    /// The same position seen by the opponent: board reversed, ownership
    /// swapped, score negated, rights swapped, special cells mirrored.
    pub fn rotate(&self) -> Position {
        let mut board = [Square::Offboard; BOARD_CELLS];
        for (c, sq) in self.board.iter().enumerate() {
            board[BOARD_CELLS - 1 - c] = sq.flipped();
        }
        Position {
            board,
            score: -self.score,
            castling: self.foe_castling,
            foe_castling: self.castling,
            ep: self.ep.map(mirror),
            kp: self.kp.map(mirror),
        }
    }

    /// Like [`Position::rotate`] but forgets en-passant and king-passant
    /// state, used to ask "what if the side to move passes".
    pub fn nullmove(&self) -> Position {
        Position {
            ep: None,
            kp: None,
            ..self.rotate()
        }
    }

    /// Applies `m` and returns the successor, already rotated for the
    /// opponent.
    ///
    /// `m` must come from [`Position::gen_moves`]; the move is trusted and not
    /// re-validated.
    pub fn make_move(&self, m: Move) -> Position {
        let (from, to) = (m.from, m.to);
        let moved = self.board[from as usize];
        debug_assert!(moved.is_own(), "no own piece on {from}");
        debug_assert!(is_playable(to), "move target {to} is off the board");

        let mut board = self.board;
        let mut castling = self.castling;
        let mut foe_castling = self.foe_castling;
        let mut ep = None;
        let mut kp = None;
        let score = self.score + self.value(m);

        board[to as usize] = moved;
        board[from as usize] = Square::Empty;

        // Castling rights, we move the rook or capture the opponent's
        if from == A1 {
            castling.west = false;
        }
        if from == H1 {
            castling.east = false;
        }
        if to == A8 {
            foe_castling.east = false;
        }
        if to == H8 {
            foe_castling.west = false;
        }

        match moved {
            Square::Own(PieceKind::King) => {
                castling = CastlingRights::NONE;
                if from.abs_diff(to) == 2 {
                    let crossed = (from + to) / 2;
                    let corner = if to < from { A1 } else { H1 };
                    kp = Some(crossed);
                    board[corner as usize] = Square::Empty;
                    board[crossed as usize] = Square::Own(PieceKind::Rook);
                }
            }
            Square::Own(PieceKind::Pawn) => {
                if (A8..=H8).contains(&to) {
                    board[to as usize] = Square::Own(PieceKind::Queen);
                }
                if from.abs_diff(to) == 20 {
                    ep = Some(step(from, N));
                }
                if self.ep == Some(to) {
                    board[step(to, S) as usize] = Square::Empty;
                }
            }
            _ => {}
        }

        Position {
            board,
            score,
            castling,
            foe_castling,
            ep,
            kp,
        }
        .rotate()
    }

    /// Score change of `m` for the side to move, without applying it.
    pub fn value(&self, m: Move) -> i32 {
        let (from, to) = (m.from, m.to);
        debug_assert!(self.board[from as usize].is_own(), "no own piece on {from}");
        let Square::Own(kind) = self.board[from as usize] else {
            return 0;
        };

        let mut score = pst(kind, to) - pst(kind, from);
        // Capture
        if let Square::Foe(captured) = self.board[to as usize] {
            score += pst(captured, mirror(to));
        }
        // Landing next to the cell a castling king crossed captures "the king"
        if self.kp.is_some_and(|kp| kp.abs_diff(to) < 2) {
            score += pst(PieceKind::King, mirror(to));
        }
        match kind {
            PieceKind::King if from.abs_diff(to) == 2 => {
                score += pst(PieceKind::Rook, (from + to) / 2);
                score -= pst(PieceKind::Rook, if to < from { A1 } else { H1 });
            }
            PieceKind::Pawn => {
                if (A8..=H8).contains(&to) {
                    score += pst(PieceKind::Queen, to) - pst(PieceKind::Pawn, to);
                }
                if self.ep == Some(to) {
                    score += pst(PieceKind::Pawn, mirror(step(to, S)));
                }
            }
            _ => {}
        }
        score
    }

    /// True once the side to move no longer has a king: the game is over.
    pub fn is_king_lost(&self) -> bool {
        self.score <= -MATE_LOWER
    }

    /// Whether the side to move still has a rook, bishop, knight or queen.
    pub fn has_officers(&self) -> bool {
        self.board.iter().any(|sq| {
            matches!(
                sq,
                Square::Own(PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight | PieceKind::Queen)
            )
        })
    }

    /// Text diagram from White's side of the board, rank 8 on top.
    ///
    /// `white_to_move` says which orientation `self` is in; White's pieces
    /// are always drawn uppercase.
    pub fn diagram(&self, white_to_move: bool, unicode: bool) -> String {
        let white_view = if white_to_move { self.clone() } else { self.rotate() };
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            out.push_str(&format!("{} ", rank + 1));
            for file in 0..8u8 {
                let sq = cell(file, rank).map_or(Square::Offboard, |c| white_view.piece_at(c));
                out.push(' ');
                out.push(if unicode { figurine(sq) } else { sq.glyph() });
            }
            out.push('\n');
        }
        out.push_str("   a b c d e f g h\n");
        out
    }
}

fn figurine(sq: Square) -> char {
    match sq {
        Square::Own(k) => match k {
            PieceKind::Pawn => '♟',
            PieceKind::Knight => '♞',
            PieceKind::Bishop => '♝',
            PieceKind::Rook => '♜',
            PieceKind::Queen => '♛',
            PieceKind::King => '♚',
        },
        Square::Foe(k) => match k {
            PieceKind::Pawn => '♙',
            PieceKind::Knight => '♘',
            PieceKind::Bishop => '♗',
            PieceKind::Rook => '♖',
            PieceKind::Queen => '♕',
            PieceKind::King => '♔',
        },
        Square::Empty => '·',
        Square::Offboard => ' ',
    }
}

/// Mover-relative view: the side to move is uppercase and at the bottom.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 2..10usize {
            let line: String = (1..9).map(|col| self.board[row * 10 + col].glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

use std::fmt;

/// Board cell index into the 120-cell mailbox (0..120).
pub type Cell = u8;

pub const BOARD_CELLS: usize = 120;

// Corners of the playable 8x8 area, in the mover's own orientation.
pub const A1: Cell = 91;
pub const H1: Cell = 98;
pub const A8: Cell = 21;
pub const H8: Cell = 28;

// Direction deltas. North always points toward the opponent.
pub const N: i8 = -10;
pub const E: i8 = 1;
pub const S: i8 = 10;
pub const W: i8 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    /// Uppercase glyph, as used for the side to move.
    pub fn glyph(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_glyph(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Ray directions walked by move generation.
    pub fn directions(self) -> &'static [i8] {
        match self {
            PieceKind::Pawn => &PAWN_DIRS,
            PieceKind::Knight => &KNIGHT_DIRS,
            PieceKind::Bishop => &BISHOP_DIRS,
            PieceKind::Rook => &ROOK_DIRS,
            PieceKind::Queen | PieceKind::King => &ROYAL_DIRS,
        }
    }

    /// Pawns, knights and kings move a single step along each direction.
    pub fn is_crawler(self) -> bool {
        matches!(self, PieceKind::Pawn | PieceKind::Knight | PieceKind::King)
    }
}

const PAWN_DIRS: [i8; 4] = [N, N + N, N + W, N + E];
const KNIGHT_DIRS: [i8; 8] = [
    N + N + E,
    E + N + E,
    E + S + E,
    S + S + E,
    S + S + W,
    W + S + W,
    W + N + W,
    N + N + W,
];
const BISHOP_DIRS: [i8; 4] = [N + E, S + E, S + W, N + W];
const ROOK_DIRS: [i8; 4] = [N, E, S, W];
const ROYAL_DIRS: [i8; 8] = [N, E, S, W, N + E, S + E, S + W, N + W];

/// Contents of one mailbox cell, relative to the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Square {
    /// Padding around the playable area.
    Offboard,
    Empty,
    /// Piece of the side to move (uppercase glyph).
    Own(PieceKind),
    /// Piece of the opponent (lowercase glyph).
    Foe(PieceKind),
}

impl Square {
    /// Same cell seen from the other side of the board.
    pub fn flipped(self) -> Square {
        match self {
            Square::Own(k) => Square::Foe(k),
            Square::Foe(k) => Square::Own(k),
            other => other,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Square::Offboard => ' ',
            Square::Empty => '.',
            Square::Own(k) => k.glyph(),
            Square::Foe(k) => k.glyph().to_ascii_lowercase(),
        }
    }

    pub fn is_own(self) -> bool {
        matches!(self, Square::Own(_))
    }

    pub fn is_foe(self) -> bool {
        matches!(self, Square::Foe(_))
    }
}

/// Castling rights of one side, named after the rook's starting corner in
/// that side's own orientation: `west` is the A1 rook, `east` the H1 rook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub west: bool,
    pub east: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        west: true,
        east: true,
    };
    pub const NONE: CastlingRights = CastlingRights {
        west: false,
        east: false,
    };
}

/// A pseudo-legal move as a (from, to) cell pair in the mover's orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Cell,
    pub to: Cell,
}

impl Move {
    pub fn new(from: Cell, to: Cell) -> Self {
        Self { from, to }
    }

    /// The same move expressed in the rotated board's coordinates.
    pub fn mirrored(self) -> Self {
        Self {
            from: mirror(self.from),
            to: mirror(self.to),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            crate::notation::render_square(self.from),
            crate::notation::render_square(self.to)
        )
    }
}

// Helpers
pub fn mirror(cell: Cell) -> Cell {
    (BOARD_CELLS as Cell - 1) - cell
}

/// Cell reached from `cell` by one step of `delta`. The two-row padding keeps
/// every step taken from the playable area inside the array.
#[inline]
pub fn step(cell: Cell, delta: i8) -> Cell {
    (cell as i16 + delta as i16) as Cell
}

/// File (0 = a) and rank (0 = first rank) of a playable cell.
pub fn file_rank(cell: Cell) -> (u8, u8) {
    let row = cell / 10;
    let col = cell % 10;
    (col - 1, 9 - row)
}

pub fn cell(file: u8, rank: u8) -> Option<Cell> {
    if file < 8 && rank < 8 {
        Some(A1 + file - 10 * rank)
    } else {
        None
    }
}

pub fn is_playable(c: Cell) -> bool {
    let row = c / 10;
    let col = c % 10;
    (2..=9).contains(&row) && (1..=8).contains(&col)
}

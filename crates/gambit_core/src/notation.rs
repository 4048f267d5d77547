//! Cell notation ("e2", "e2e4", "Nf3") to and from mailbox cells.
//!
//! Text is always in absolute coordinates, as White sees the board. Positions
//! are side-relative, so when Black is to move the cells are mirrored
//! (`119 - cell`) on the way in and out.

use crate::board::Position;
use crate::error::NotationError;
use crate::types::*;

pub fn parse_square(text: &str) -> Result<Cell, NotationError> {
    let b = text.as_bytes();
    if b.len() != 2 || !(b'a'..=b'h').contains(&b[0]) || !(b'1'..=b'8').contains(&b[1]) {
        return Err(NotationError::InvalidSquare(text.to_string()));
    }
    cell(b[0] - b'a', b[1] - b'1').ok_or_else(|| NotationError::InvalidSquare(text.to_string()))
}

pub fn render_square(c: Cell) -> String {
    if !is_playable(c) {
        return "??".to_string();
    }
    let (file, rank) = file_rank(c);
    format!("{}{}", (b'a' + file) as char, (b'1' + rank) as char)
}

/// Move in the mover's orientation rendered as absolute text, e.g. "e7e5".
pub fn render_move(m: Move, white_to_move: bool) -> String {
    let m = if white_to_move { m } else { m.mirrored() };
    format!("{}{}", render_square(m.from), render_square(m.to))
}

/// Move log entry: piece letter (none for pawns) followed by the move,
/// e.g. "Nb1c3" or "e2e4".
pub fn record_move(pos: &Position, m: Move, white_to_move: bool) -> String {
    let letter = match pos.piece_at(m.from) {
        Square::Own(PieceKind::Pawn) => String::new(),
        Square::Own(kind) => kind.glyph().to_string(),
        _ => String::new(),
    };
    format!("{letter}{}", render_move(m, white_to_move))
}

/// Parsed but not yet resolved move text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveText {
    /// "e2e4", optionally with a piece letter.
    Long {
        piece: Option<PieceKind>,
        from: Cell,
        to: Cell,
    },
    /// "Qd7" or "e4": destination plus piece (pawn when omitted).
    Short { piece: PieceKind, to: Cell },
}

fn parse_move_text(text: &str) -> Result<MoveText, NotationError> {
    let invalid = || NotationError::InvalidMove(text.to_string());
    let mut cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, 'x' | '-' | '+' | '#' | '=' | ':'))
        .collect();
    if !cleaned.is_ascii() {
        return Err(invalid());
    }

    // Only queen promotion exists, so a trailing promotion letter is noise.
    let has_square_suffix = cleaned.len() >= 3
        && cleaned.as_bytes()[cleaned.len() - 2].is_ascii_digit();
    if has_square_suffix {
        cleaned.pop();
    }

    let squares_from = |s: &str| -> Option<MoveText> {
        match s.len() {
            2 => parse_square(s).ok().map(|to| MoveText::Short {
                piece: PieceKind::Pawn,
                to,
            }),
            4 => {
                let from = parse_square(&s[..2]).ok()?;
                let to = parse_square(&s[2..]).ok()?;
                Some(MoveText::Long {
                    piece: None,
                    from,
                    to,
                })
            }
            _ => None,
        }
    };

    if let Some(parsed) = squares_from(&cleaned) {
        return Ok(parsed);
    }

    let mut chars = cleaned.chars();
    let letter = chars.next().ok_or_else(invalid)?;
    let piece = PieceKind::from_glyph(letter)
        .filter(|k| *k != PieceKind::Pawn)
        .ok_or_else(invalid)?;
    match squares_from(chars.as_str()).ok_or_else(invalid)? {
        MoveText::Short { to, .. } => Ok(MoveText::Short { piece, to }),
        MoveText::Long { from, to, .. } => Ok(MoveText::Long {
            piece: Some(piece),
            from,
            to,
        }),
    }
}

/// Resolves user text against the moves `pos` generates.
///
/// Accepts "e2e4", "e2-e4", "Ng1f3", "exd5", "Qd7" and "e4". Short forms must
/// match exactly one generated move.
pub fn parse_move(pos: &Position, text: &str, white_to_move: bool) -> Result<Move, NotationError> {
    let orient = |c: Cell| if white_to_move { c } else { mirror(c) };

    match parse_move_text(text)? {
        MoveText::Long { piece, from, to } => {
            let m = Move::new(orient(from), orient(to));
            let piece_matches = piece.map_or(true, |k| pos.piece_at(m.from) == Square::Own(k));
            if piece_matches && pos.gen_moves().any(|g| g == m) {
                Ok(m)
            } else {
                Err(NotationError::IllegalMove(text.to_string()))
            }
        }
        MoveText::Short { piece, to } => {
            let to = orient(to);
            let mut candidates: Vec<Move> = pos
                .gen_moves()
                .filter(|m| m.to == to && pos.piece_at(m.from) == Square::Own(piece))
                .collect();
            candidates.dedup();
            match candidates.as_slice() {
                [] => Err(NotationError::IllegalMove(text.to_string())),
                [only] => Ok(*only),
                _ => Err(NotationError::AmbiguousMove(text.to_string())),
            }
        }
    }
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;

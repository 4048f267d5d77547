use thiserror::Error;

/// Errors raised while turning text into positions or moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("invalid move text: {0:?}")]
    InvalidMove(String),

    /// Well-formed move that the position does not generate.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Short-form move that matches more than one generated move.
    #[error("ambiguous move {0}, give the origin square as well (e.g. d2d3)")]
    AmbiguousMove(String),

    #[error("invalid FEN: {reason}")]
    InvalidFen { reason: String },
}

impl NotationError {
    pub(crate) fn fen(reason: impl Into<String>) -> Self {
        NotationError::InvalidFen {
            reason: reason.into(),
        }
    }
}

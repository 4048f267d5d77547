use std::path::PathBuf;

use gambit_core::NotationError;
use thiserror::Error;

/// Errors raised by game sessions, matches and configuration loading.
#[derive(Debug, Error)]
pub enum PlayError {
    /// Bad square, unparsable, illegal or ambiguous move text.
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("game is already over")]
    GameOver,

    #[error("it is not your turn, the engine is to move")]
    NotYourTurn,

    #[error("the engine is not to move")]
    NotEngineTurn,

    #[error("engine found no move")]
    NoMove,

    #[error("nothing to take back")]
    NothingToTakeBack,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("could not write config: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("invalid results: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlayError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlayError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type PlayResult<T> = Result<T, PlayError>;

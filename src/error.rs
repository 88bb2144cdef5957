use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::world::ValidationError;

#[derive(Error, Debug)]
pub enum GameError {
    /// The player closed the session. Propagated out of every modal loop.
    #[error("player quit")]
    Quit,

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid world file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid world: {0}")]
    InvalidWorld(String),

    #[error("world failed validation:\n{}", format_validation(.0))]
    Validation(Vec<ValidationError>),

    #[error("frontend error: {0}")]
    Frontend(#[from] io::Error),
}

impl GameError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        GameError::InvalidWorld(msg.into())
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, GameError::Quit)
    }
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type GameResult<T> = Result<T, GameError>;

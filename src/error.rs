use thiserror::Error;

/// Failures at the edges of the game: high-score file and audio output.
/// The simulation itself cannot fail.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("audio error: {0}")]
    Audio(String),
}

pub type Result<T> = std::result::Result<T, GameError>;

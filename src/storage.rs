/// High-score persistence.  One integer, nothing else.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::entities::GameEvent;
use crate::error::Result;

pub trait HighScoreStore {
    /// The stored high score; 0 when there is none or it can't be read.
    fn load(&self) -> i64;
    fn save(&mut self, score: i64) -> Result<()>;
}

/// Persist every new high score found in `events`.  A failed write is
/// logged and the game carries on.
pub fn persist(store: &mut dyn HighScoreStore, events: &[GameEvent]) {
    for event in events {
        if let GameEvent::HighScore(score) = *event {
            if let Err(err) = store.save(score) {
                warn!(score, %err, "could not save high score");
            }
        }
    }
}

/// Default location: `$HOME/.money_shooter_score`, falling back to the
/// working directory when `HOME` is unset.
pub fn default_high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".money_shooter_score")
}

/// Stores the score as plain decimal text.
#[derive(Clone, Debug)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileHighScore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&self) -> i64 {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "no stored high score");
                return 0;
            }
        };
        text.trim().parse().unwrap_or_else(|_| {
            debug!(path = %self.path.display(), "ignoring malformed high score");
            0
        })
    }

    fn save(&mut self, score: i64) -> Result<()> {
        std::fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}

/// In-process store; nothing outlives the program.  Used by `--no-save`.
#[derive(Clone, Debug, Default)]
pub struct MemoryHighScore {
    pub score: i64,
    pub saves: usize,
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> i64 {
        self.score
    }

    fn save(&mut self, score: i64) -> Result<()> {
        self.score = score;
        self.saves += 1;
        Ok(())
    }
}

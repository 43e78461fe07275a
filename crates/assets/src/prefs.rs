//! High-score persistence: a single integer in a small text file.
//!
//! Writes are single-writer and fire-and-forget; a failed write costs at
//! most the latest high score, which is acceptable here, so it logs and
//! moves on instead of failing the game.

use std::fs;
use std::path::PathBuf;

use log::warn;

use prospector_core::scoring::HighScoreStore;

/// File-backed [`HighScoreStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for HighScoreFile {
    fn load(&mut self) -> Option<i64> {
        let text = fs::read_to_string(&self.path).ok()?;
        match text.trim().parse() {
            Ok(score) => Some(score),
            Err(_) => {
                warn!("ignoring unreadable high score file {}", self.path.display());
                None
            }
        }
    }

    fn save(&mut self, score: i64) {
        if let Err(err) = fs::write(&self.path, format!("{score}\n")) {
            warn!(
                "failed to persist high score to {}: {err}",
                self.path.display()
            );
        }
    }
}

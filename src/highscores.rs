//! High score persistence
//!
//! The simulation only carries the best score as a number; where it lives
//! between runs is the store's business. Load and save are fire-and-forget
//! from the game's point of view: a missing or corrupt file reads as zero
//! and a failed write is logged, never surfaced to gameplay.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Storage backend for the single best score
pub trait HighScoreStore {
    fn load(&self) -> u32;
    fn save(&self, score: u32);
}

/// On-disk JSON file layout
#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// JSON file backed store, one file per user
#[derive(Debug, Clone)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under the user's home directory, falling back to the
    /// working directory when HOME is unset
    pub fn default_path() -> PathBuf {
        let mut path = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push(".invaders_highscore.json");
        path
    }
}

impl Default for FileHighScore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => {
                log::info!("no high score file at {:?}, starting at 0", self.path);
                return 0;
            }
        };
        match serde_json::from_str::<HighScoreFile>(&text) {
            Ok(file) => file.high_score,
            Err(err) => {
                log::warn!("corrupt high score file {:?}: {err}", self.path);
                0
            }
        }
    }

    fn save(&self, score: u32) {
        let file = HighScoreFile { high_score: score };
        let json = match serde_json::to_string(&file) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("failed to encode high score: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            log::warn!("failed to write high score to {:?}: {err}", self.path);
        }
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryHighScore {
    score: std::cell::Cell<u32>,
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> u32 {
        self.score.get()
    }

    fn save(&self, score: u32) {
        self.score.set(score);
    }
}

//! High-score table persistence.
//!
//! One JSON file per table, holding a list of `{score, timestamp}` entries
//! sorted by score, highest first. A missing or unreadable file behaves like an
//! empty table so a broken file never blocks play; the next save replaces it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use block_arcade_core::ScoreSink;

/// Entries shown on the game-over screen
pub const DISPLAY_ENTRIES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid score file: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-backed score table; also the engine's high-score collaborator.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
    /// Table as of the last successful add
    latest: Vec<ScoreEntry>,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            latest: Vec::new(),
        }
    }

    /// `<dir>/highscore_<table>.json`
    pub fn in_dir(dir: impl AsRef<Path>, table: &str) -> Self {
        let file = format!("highscore_{}.json", table.to_lowercase());
        Self::new(dir.as_ref().join(file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the table, reporting malformed files. A missing file is empty.
    pub fn try_load(&self) -> Result<Vec<ScoreEntry>, ScoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Read the table; any failure yields an empty table.
    pub fn load(&self) -> Vec<ScoreEntry> {
        self.try_load().unwrap_or_else(|err| {
            warn!(path = %self.path.display(), error = %err, "failed to load high scores");
            Vec::new()
        })
    }

    pub fn save(&self, entries: &[ScoreEntry]) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    /// Append a timestamped entry, persist, and return the sorted table.
    pub fn add_score(&mut self, score: u32) -> Result<Vec<ScoreEntry>, ScoreError> {
        let mut entries = self.load();
        entries.push(ScoreEntry {
            score,
            timestamp: unix_now(),
        });
        // Stable: equal scores keep insertion order.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.save(&entries)?;
        info!(score, rank = rank_of(&entries, score), "high score recorded");
        self.latest = entries.clone();
        Ok(entries)
    }

    /// Table as of the last successful [`ScoreStore::add_score`]
    pub fn latest(&self) -> &[ScoreEntry] {
        &self.latest
    }

    /// Top scores for display, highest first
    pub fn top(&self, n: usize) -> Vec<u32> {
        self.latest.iter().take(n).map(|e| e.score).collect()
    }
}

impl ScoreSink for ScoreStore {
    fn submit(&mut self, score: u32) -> anyhow::Result<()> {
        self.add_score(score)?;
        Ok(())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn rank_of(entries: &[ScoreEntry], score: u32) -> usize {
    entries.iter().take_while(|e| e.score > score).count() + 1
}

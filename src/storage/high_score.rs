//! Best-score persistence
//!
//! The best score is a single decimal integer. `HighScoreFile` keeps it in a
//! plain text file; `MemoryStore` keeps it in memory for tests and for runs
//! where no data directory is available (see `open_store`).

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "snake_odyssey";
const FILE_NAME: &str = "high_score";

/// Durable storage for the best score
pub trait ScoreStore {
    /// Read the stored best score. Absent or unreadable values yield 0.
    fn load(&self) -> u32;

    /// Overwrite the stored best score. Last write wins.
    fn save(&mut self, score: u32) -> Result<()>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> Result<()> {
        (**self).save(score)
    }
}

/// Pick where the best score lives: `explicit` if given, otherwise the
/// platform data directory. With neither, the score is kept in memory for
/// this run only.
pub fn open_store(explicit: Option<&Path>) -> Box<dyn ScoreStore> {
    resolve_store(explicit, dirs::data_dir())
}

fn resolve_store(explicit: Option<&Path>, data_dir: Option<PathBuf>) -> Box<dyn ScoreStore> {
    let file = match (explicit, data_dir) {
        (Some(path), _) => HighScoreFile::new(path),
        (None, Some(data_dir)) => HighScoreFile::in_data_dir(&data_dir),
        (None, None) => {
            tracing::warn!("No data directory found; the high score will not be kept");
            return Box::new(MemoryStore::new());
        }
    };

    tracing::info!("High score file {:?}", file.path());
    Box::new(file)
}

/// Best score kept in a text file
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/snake_odyssey/high_score`
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(APP_DIR).join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for HighScoreFile {
    fn load(&self) -> u32 {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!("No stored high score at {:?}: {}", self.path, err);
                return 0;
            }
        };

        match raw.trim().parse() {
            Ok(score) => score,
            Err(err) => {
                tracing::warn!("Ignoring unparsable high score {:?}: {}", raw.trim(), err);
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        std::fs::write(&self.path, score.to_string())
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;
        Ok(())
    }
}

/// In-memory store; remembers how many times it was written
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(score: u32) -> Self {
        Self {
            value: Some(score),
            writes: 0,
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }
}

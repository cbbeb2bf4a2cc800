pub mod high_score;

pub use high_score::{open_store, HighScoreFile, MemoryStore, ScoreStore};

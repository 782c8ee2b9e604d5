//! Error types
//!
//! None of these ever end a game. Catalogue failures fall back to the
//! built-in questions, audio failures are logged and dropped, and config
//! errors are caught before a session is built.

/// Loading the quiz catalogue failed
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("failed to fetch quiz data: {0}")]
    Fetch(String),
    #[error("failed to parse quiz data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("quiz data contains no genres")]
    Empty,
}

/// A sound cue could not be played
#[derive(Debug, Clone, thiserror::Error)]
pub enum AudioError {
    #[error("audio unavailable: {0}")]
    Unavailable(String),
    #[error("playback failed: {0}")]
    Playback(String),
}

/// A [`crate::GameConfig`] value is out of range
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(String),
    #[error("{name} must be positive (got {value})")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be finite (got {value})")]
    NotFinite { name: &'static str, value: f64 },
    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f64 },
    #[error("enemy speed range is empty ({min}..{max})")]
    EmptySpeedRange { min: f32, max: f32 },
    #[error("enemy_count must be at least 1")]
    NoEnemies,
    #[error("starting_hp must be at least 1")]
    NoHealth,
}

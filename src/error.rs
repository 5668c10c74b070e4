use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("failed to load words for '{language}': {reason}")]
    LoadFailure { language: String, reason: String },

    #[error("word list for '{language}' has no usable rows")]
    EmptyWordList { language: String },

    #[error("word pool needs at least {required} words, got {actual}")]
    PoolTooSmall { required: usize, actual: usize },

    #[error("malformed stored data in {name}: {reason}")]
    StorageRead { name: String, reason: String },

    #[error("failed to persist {name}: {reason}")]
    PersistenceWrite { name: String, reason: String },

    #[error("leaderboard unavailable: {0}")]
    Leaderboard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;

//! Streak error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreakError {
    #[error("Malformed date '{input}': {source}")]
    MalformedDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("History file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StreakResult<T> = Result<T, StreakError>;

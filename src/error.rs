//! Error types for the numguess crate

use thiserror::Error;

/// Main error type for the numguess crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("empty guess interval: low {low} is greater than high {high}")]
    EmptyInterval { low: i64, high: i64 },

    #[error("guess {guess} is out of range (must be {min}-{max})")]
    GuessOutOfRange { guess: i64, min: i64, max: i64 },

    #[error("game already over")]
    GameOver,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid difficulty '{input}'. Expected one of: {expected}")]
    ParseDifficulty { input: String, expected: String },

    #[error("invalid player name '{name}': {reason}")]
    InvalidPlayerName { name: String, reason: &'static str },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

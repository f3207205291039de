//! Error types for the iCal builder.

use thiserror::Error;

/// Errors that can occur while loading, filtering or writing calendars.
#[derive(Error, Debug)]
pub enum KalendarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not load '{url}'. HTTP {status}")]
    Fetch { url: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not find any data file for school year {0}")]
    DatasetNotFound(i32),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid {kind} filter value '{value}'")]
    InvalidFilter { kind: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for iCal builder operations.
pub type KalendarResult<T> = Result<T, KalendarError>;

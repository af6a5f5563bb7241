//! Error types for daygrid.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in daygrid operations.
#[derive(Error, Debug)]
pub enum DaygridError {
    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTimeFormat(String),

    #[error("Invalid event: {0}")]
    Validation(String),

    #[error("No event at index {index} on {date}")]
    IndexOutOfRange { date: NaiveDate, index: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for daygrid operations.
pub type DaygridResult<T> = Result<T, DaygridError>;

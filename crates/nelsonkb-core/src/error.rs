//! Error types for NelsonKB.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed row {line}: {message}")]
    MalformedRow { line: u64, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Scoreboard-specific error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreboardError {
    #[error("Data source unavailable: {message}")]
    SourceUnavailable { message: String },

    #[error("Channel operation failed: {operation}: {message}")]
    ChannelError { operation: String, message: String },

    #[error("Persistence operation failed: {operation} on {path}: {message}")]
    PersistenceError { operation: String, path: String, message: String },

    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl ScoreboardError {
    pub fn config(field: impl Into<String>) -> Self {
        Self::ConfigurationError { field: field.into() }
    }

    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable { message: message.into() }
    }

    pub fn channel(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ChannelError {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn persistence(
        operation: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::PersistenceError {
            operation: operation.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type ScoreboardResult<T> = Result<T, ScoreboardError>;

//! Shared error types for the scoreboard service

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Invalid message handle: {input:?}")]
    InvalidHandle { input: String },
}

pub type SharedResult<T> = Result<T, SharedError>;

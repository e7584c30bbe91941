//! Error types for the MindMate ensemble core.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for ensemble operations.
pub type EnsembleResult<T> = Result<T, EnsembleError>;

/// Errors that can occur while classifying text or generating replies.
///
/// Only `EmptyInput` ever reaches a caller of the public entry points:
/// per-backend failures are recorded into votes/attempts and recovered
/// locally with defaults or the degraded reply.
#[derive(Error, Debug)]
pub enum EnsembleError {
    #[error("empty input: text must contain at least one non-whitespace character")]
    EmptyInput,

    #[error("backend transport error: {0}")]
    Transport(String),

    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("backend response could not be parsed: {0}")]
    Parse(String),

    #[error("backend call timed out after {0:?}")]
    Timeout(Duration),

    #[error("backend label {0:?} has no canonical mapping")]
    UnmappedLabel(String),
}

impl From<reqwest::Error> for EnsembleError {
    fn from(err: reqwest::Error) -> Self {
        EnsembleError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for EnsembleError {
    fn from(err: serde_json::Error) -> Self {
        EnsembleError::Parse(err.to_string())
    }
}

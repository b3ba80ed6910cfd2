//! Session error types
//!
//! Failures reading or writing the persisted session.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the session storage layer
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to access session file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

//! Zodiac table error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the zodiac table
#[derive(Error, Debug)]
pub enum ZodiacError {
    /// Table file could not be read
    #[error("Failed to read zodiac table {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    /// Table is not valid TOML or does not match the schema
    #[error("Failed to parse zodiac table: {0}")]
    Parse(String),

    /// Sign key is not one of the twelve known signs
    #[error("Unknown zodiac sign: {0}")]
    UnknownSign(String),

    /// Same sign listed more than once
    #[error("Duplicate zodiac sign: {0}")]
    DuplicateSign(String),

    /// Sign absent from the table
    #[error("Missing zodiac sign: {0}")]
    MissingSign(String),

    /// A candidate list that must have at least one entry is empty
    #[error("Empty {field} list for {sign}")]
    EmptyList { sign: String, field: &'static str },
}

impl From<toml::de::Error> for ZodiacError {
    fn from(err: toml::de::Error) -> Self {
        ZodiacError::Parse(err.to_string())
    }
}

/// Result type alias for zodiac table operations
pub type ZodiacResult<T> = Result<T, ZodiacError>;

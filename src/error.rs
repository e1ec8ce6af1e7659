//! Centralized error types for mailtriage.

use std::path::PathBuf;
use thiserror::Error;

use crate::command::compose::ValidationError;
use crate::command::GuardViolation;

/// All errors produced by the mailtriage library.
#[derive(Error, Debug)]
pub enum TriageError {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A seed file could not be decoded.
    #[error("Invalid seed file '{path}': {source}")]
    SeedParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A seed record carried a date in neither RFC 3339 nor `YYYY-MM-DD` form.
    #[error("Invalid date '{0}' (expected RFC 3339 or YYYY-MM-DD)")]
    InvalidDate(String),

    /// A seed record decoded but breaks a message invariant.
    #[error("Invalid seed record from '{sender}': {reason}")]
    InvalidSeedRecord {
        sender: String,
        reason: &'static str,
    },

    /// The change-event bus is full.
    #[error("Listener limit reached ({0} registered)")]
    TooManyListeners(usize),

    /// Compose fields were rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A command was invoked while its guard was false.
    #[error(transparent)]
    Guard(#[from] GuardViolation),
}

/// Convenience alias for `Result<T, TriageError>`.
pub type Result<T> = std::result::Result<T, TriageError>;

impl TriageError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

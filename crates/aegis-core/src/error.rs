//! Error types for the tracker library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::Phase;

/// Comprehensive error type for all tracker operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Recovery record not found for the given ID
    #[error("Recovery record with ID {id} not found")]
    RecoveryNotFound { id: u64 },
    /// No business profile registered for the requester's principal
    #[error("No business registered for principal '{principal}'")]
    BusinessNotFound { principal: String },
    /// Requester's business does not own the addressed resource
    #[error("Requester's business does not own {resource} {id}")]
    Forbidden { resource: &'static str, id: u64 },
    /// Action index beyond the phase sequence length
    #[error("Index {index} is out of range for the {phase} phase ({len} actions)")]
    OutOfRange { phase: Phase, index: u32, len: u32 },
    /// Recovery synchronization failed after the plan mutation committed.
    /// The action toggle is durable; only the derived metrics are stale.
    #[error(
        "Recovery synchronization for plan {plan_id} failed after retry: {message}. \
         The action update was committed; recovery metrics may be stale until \
         the next synchronization"
    )]
    SyncFailed { plan_id: u64, message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl TrackerError {
    /// Creates a new database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }

    /// Creates an input validation error for a field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Shorthand for constructing an input validation error.
pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> TrackerError {
    TrackerError::invalid_input(field, reason)
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to TrackerError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| TrackerError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TrackerError::database_error(message, e))
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

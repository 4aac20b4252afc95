//! Core error types for tasktimer-core.
//!
//! Every fallible operation in the library returns [`CoreError`]. Notifier
//! failures are the one category that never reaches this type: they are
//! logged and dropped by the orchestrator.

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::SessionState;

/// Core error type for tasktimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Bad input shape, reported immediately and never retried
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Unknown task id
    #[error("Task {0} not found")]
    NotFound(u64),

    /// Illegal timer state transition (a caller bug)
    #[error("Cannot {action} a session that is {state}")]
    InvalidState {
        action: &'static str,
        state: SessionState,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors from the persistence provider
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Task name is empty after trimming
    #[error("task name must not be empty")]
    EmptyName,

    /// Duration must be a positive number of minutes
    #[error("duration must be a positive number of minutes, got {0}")]
    NonPositiveDuration(u32),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home/data directory could not be resolved
    #[error("could not determine a data directory")]
    NoDataDir,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

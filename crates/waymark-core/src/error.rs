//! Core error types for waymark-core.
//!
//! This module defines the error hierarchy using thiserror. Nothing in this
//! library is fatal to the process: store failures degrade or allow retry,
//! and submit rejections leave the section state untouched.

use std::path::PathBuf;
use thiserror::Error;

use crate::section::QuestionId;

/// Core error type for waymark-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Submit rejected by the wizard engine
    #[error("Submit rejected: {0}")]
    Submit(#[from] SubmitError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Persistence adapter errors.
///
/// A failed `load` degrades to an empty section; a failed `save` keeps the
/// engine on the same section and the user may retry indefinitely.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {message}")]
    OpenFailed { path: PathBuf, message: String },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Store migration failed: {0}")]
    MigrationFailed(String),

    /// Stored document could not be encoded or decoded
    #[error("Document serialization failed: {0}")]
    SerializeFailed(String),

    /// Backend refused the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Reasons the wizard engine rejects an advance attempt.
///
/// All of these are pure guards: no state transition and no persistence
/// attempt has happened when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// One or more questions are incomplete.
    #[error("{} question(s) incomplete", .incomplete.len())]
    Validation { incomplete: Vec<QuestionId> },

    /// No authenticated identity available; the surrounding system must
    /// re-establish it before the section can be saved.
    #[error("No user session available")]
    SessionMissing,

    /// A save is already pending for this section visit.
    #[error("A save is already in flight")]
    SaveInFlight,

    /// The engine has already acknowledged or advanced.
    #[error("Section is no longer accepting submissions")]
    NotAccepting,
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

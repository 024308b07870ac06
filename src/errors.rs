//! Error types for the mindmate application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur during wellbeing-tracking operations.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the mindmate application.
#[derive(Error, Debug)]
pub enum MmError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No active session when one is required.
    #[error("Not logged in. Run `mindmate login` first")]
    NotAuthenticated,

    /// Habit was not found when performing an operation.
    #[error("Habit not found: {id}")]
    HabitNotFound { id: String },

    /// Input rejected before reaching the repository.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// The active session's role does not permit the operation.
    #[error("Permission denied: {action} requires an admin session")]
    PermissionDenied { action: String },

    #[error("{message}")]
    EditorError { message: String },
}

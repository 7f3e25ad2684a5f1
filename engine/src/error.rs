//! Error types for the rename engine.
//!
//! The primary error type is `EngineError`, which represents run-level errors
//! that prevent a rename batch from being planned or executed. Per-file errors
//! (collisions, failed renames, failed backup copies) are recorded in
//! `OperationRecord`, not as EngineError, so one bad file never aborts a batch.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur at the run level (preventing planning or execution).
///
/// File-level failures during `execute` are recorded in `OperationRecord`,
/// not in this enum.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Working directory does not exist or is not a directory
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// File-selection glob pattern failed to compile
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Regex strategy pattern failed to compile
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// Template strategy referenced an unknown placeholder or is malformed
    #[error("Invalid template '{template}': {reason}")]
    Template { template: String, reason: String },

    /// A rename plan was built from lists of differing lengths
    #[error("Plan mismatch: {files} files but {names} proposed names")]
    PlanMismatch { files: usize, names: usize },

    /// Failed to write the operations log file
    #[error("Failed to write operations log {}: {reason}", path.display())]
    LogWriteFailed { path: PathBuf, reason: String },

    /// Failed to load or save the settings file (treated as non-fatal by callers)
    #[error("Settings file error ({}): {reason}", path.display())]
    Settings { path: PathBuf, reason: String },
}

//! Error types for the organizing engine.
//!
//! The taxonomy distinguishes input problems (`Validation`), missing
//! prerequisites (`Precondition`) and filesystem failures (`Operation`).
//! User cancellation is deliberately *not* an error: declined prompts are
//! reported through outcome enums (`Resolved::Cancelled`,
//! `DeleteOutcome::Declined`) so callers can treat them as silent no-ops.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A user-supplied value failed a schema check before any filesystem
    /// call was made.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A prerequisite of the operation does not hold.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// An underlying filesystem call failed.
    #[error("operation failed on {path}: {source}")]
    Operation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create a bucket directory for a group of files.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Prerequisites that must hold before an operation starts.
///
/// These are surfaced before any filesystem mutation; the operation never
/// partially runs.
#[derive(Error, Debug)]
pub enum PreconditionError {
    #[error("no files selected")]
    EmptySelection,

    #[error("no destination directory chosen")]
    NoDestination,

    #[error("destination directory does not exist: {0}")]
    DestinationMissing(PathBuf),
}

/// Errors raised while loading or compiling the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("invalid glob pattern '{0}'")]
    InvalidGlobPattern(String),

    #[error("invalid shortcut chord '{chord}': {reason}")]
    InvalidChord { chord: String, reason: String },

    #[error("IO error reading configuration: {0}")]
    Io(String),
}

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_the_field() {
        let err = EngineError::Validation {
            field: "file name",
            reason: "contains ':'".to_string(),
        };
        assert!(err.to_string().contains("file name"));
        assert!(err.to_string().contains(":"));
    }

    #[test]
    fn precondition_error_includes_missing_path() {
        let err = EngineError::from(PreconditionError::DestinationMissing(PathBuf::from(
            "/tmp/nowhere",
        )));
        assert!(err.to_string().contains("/tmp/nowhere"));
    }
}

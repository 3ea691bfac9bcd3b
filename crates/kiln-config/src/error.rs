//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Package metadata errors
    #[error("package.json not found: {0}")]
    PackageNotFound(PathBuf),

    #[error("invalid package.json at {path}: {message}")]
    InvalidPackage { path: PathBuf, message: String },

    #[error("package.json has no '{field}' field (required for the {format} output)")]
    MissingPackageField {
        field: &'static str,
        format: &'static str,
    },

    // Config parsing errors
    #[error("invalid config value: {0}")]
    InvalidValue(String),

    // Schema validation errors (no filesystem checks)
    #[error("entry path is empty")]
    EmptyEntry,

    #[error("no outputs specified")]
    NoOutputs,

    #[error("duplicate output path: {0}")]
    DuplicateOutput(PathBuf),

    #[error("plugin stage '{0}' appears more than once in the chain")]
    DuplicateStage(&'static str),

    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    // Filesystem validation errors (for CLI use)
    #[error("entry path not found: {0}")]
    EntryNotFound(PathBuf),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for the Kiln CLI.
//!
//! Library errors convert into [`CliError`] through `#[from]`; `main` turns
//! the final error into a miette report via [`cli_error_to_miette`].

mod report;

use std::path::PathBuf;

use thiserror::Error;

pub use report::cli_error_to_miette;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] kiln_config::ConfigError),

    /// Bundling or writing failed
    #[error(transparent)]
    Bundler(#[from] kiln_bundler::Error),

    /// An environment override could not be applied
    #[error("Invalid environment override: {0}")]
    Env(String),

    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        CliError::Env(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_wrapped() {
        let err: CliError = kiln_config::ConfigError::NoOutputs.into();
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: no outputs specified");
    }

    #[test]
    fn test_bundler_error_is_transparent() {
        let err: CliError = kiln_bundler::Error::InvalidOutputPath("../x.js".into()).into();
        assert_eq!(err.to_string(), "Invalid output path: ../x.js");
    }

    #[test]
    fn test_directory_not_found_message() {
        let err = CliError::DirectoryNotFound(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "Directory not found: /nope");
    }
}

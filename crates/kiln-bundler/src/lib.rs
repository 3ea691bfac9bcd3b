#![cfg_attr(docsrs, feature(doc_cfg))]

//! # kiln-bundler
//!
//! Rolldown-based bundling for Kiln.
//!
//! A [`BuildPlan`] turns a resolved [`kiln_config::BuildConfig`] into one
//! Rolldown pass per output. [`build`] runs the passes concurrently and
//! returns the emitted code in declared output order; [`write_outputs`] puts
//! it on disk.
//!
//! ## Quick Start
//!
//! ```no_run
//! use kiln_bundler::{BuildPlan, build, write_outputs};
//! use kiln_config::{BuildConfig, PackageMetadata};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let package = PackageMetadata::from_dir(".")?;
//! let config = BuildConfig::from_package(&package)?;
//!
//! let plan = BuildPlan::new(config, ".")?;
//! let result = build(plan).await?;
//! write_outputs(&result, ".")?;
//! # Ok(()) }
//! ```

pub mod builders;
pub mod diagnostics;
pub mod output;
pub mod plugins;

// Re-export core Rolldown types for library users
pub use rolldown::{BundleOutput, BundlerOptions, InputItem, SourceMapType};

pub use rolldown_common::{ModuleType, Output};

// Re-export plugin types for stage authors
pub use rolldown_plugin::{
    __inner::SharedPluginable, HookLoadArgs, HookLoadOutput, HookLoadReturn, HookResolveIdArgs,
    HookResolveIdOutput, HookResolveIdReturn, HookUsage, Plugin, PluginContext,
};

pub use builders::{BuildPlan, BuildResult, EmittedOutput, OutputPass, build};
pub use output::write_outputs;
pub use plugins::{NodeResolvePlugin, PluginChain, TextInlinePlugin};

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{LogLevel, init_logging, init_logging_from_env};

/// Error types for kiln-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from Rolldown, including failures raised by plugin stages.
    #[error("Rolldown bundler error: {}", format_bundler_error(.0))]
    Bundler(Vec<diagnostics::ExtractedDiagnostic>),

    /// Configuration rejected before bundling started.
    #[error(transparent)]
    Config(#[from] kiln_config::ConfigError),

    /// A pass produced something other than one self-contained file.
    #[error("Output '{file}' {reason}")]
    UnexpectedChunks { file: String, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid output path (e.g., directory traversal attempt).
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// File write operation failed.
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// A build task ended without producing a result.
    #[error("Build task failed: {0}")]
    Task(String),
}

/// Result type alias for kiln-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a bundler error from a Rolldown error.
    ///
    /// Extracts structured diagnostics from Rolldown's error types.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        Error::Bundler(diagnostics::extract_from_rolldown_error(error))
    }
}

fn format_bundler_error(diagnostics: &[diagnostics::ExtractedDiagnostic]) -> String {
    match diagnostics {
        [] => "Unknown bundler error".to_string(),
        [diag] => format!("{}: {}", diag.kind, diag.message),
        many => format!(
            "{} errors: {}",
            many.len(),
            many.iter()
                .map(|d| format!("{}: {}", d.kind, d.message))
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Bundler(_) => "BUNDLER_ERROR",
            Error::Config(_) => "INVALID_CONFIG",
            Error::UnexpectedChunks { .. } => "UNEXPECTED_CHUNKS",
            Error::Io(_) => "IO_ERROR",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::WriteFailure(_) => "WRITE_FAILURE",
            Error::Task(_) => "TASK_FAILURE",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Config(_) => Some(Box::new(
                "Check package.json and kiln.toml. Run `kiln check` to see the resolved build.",
            )),
            Error::UnexpectedChunks { .. } => Some(Box::new(
                "Each output must be a single file. Replace dynamic `import()` calls with static imports.",
            )),
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The output path '{}' is invalid. Ensure it's within the project directory and doesn't contain '..' components.",
                path
            ))),
            Error::WriteFailure(msg) => Some(Box::new(format!(
                "Failed to write file. Check disk space and permissions.\nError: {}",
                msg
            ))),
            Error::Bundler(diagnostics) => match diagnostics.as_slice() {
                [diag] => diag
                    .help
                    .as_ref()
                    .map(|h| Box::new(h.clone()) as Box<dyn std::fmt::Display>),
                _ => Some(Box::new(
                    "Multiple bundler errors occurred. See details below.".to_string(),
                )),
            },
            _ => None,
        }
    }
}

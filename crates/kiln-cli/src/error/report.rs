//! Miette reports for CLI errors.

use kiln_bundler::diagnostics::to_diagnostic_error;
use kiln_config::ConfigError;
use miette::Report;

use crate::error::CliError;

/// Convert a [`CliError`] into a miette report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Bundler(e) => bundler_error_to_miette(e),
        CliError::Config(e) => {
            let help = config_help(&e);
            miette::miette!(help = help, "Configuration error: {}", e)
        }
        other => miette::miette!("{}", other),
    }
}

/// Bundler diagnostics get their own report so the code and help survive.
pub fn bundler_error_to_miette(err: kiln_bundler::Error) -> Report {
    match err {
        kiln_bundler::Error::Bundler(diagnostics) if !diagnostics.is_empty() => {
            if diagnostics.len() > 1 {
                tracing::debug!(count = diagnostics.len(), "reporting first bundler diagnostic");
            }
            match diagnostics.into_iter().next() {
                Some(primary) => Report::new(to_diagnostic_error(primary)),
                None => miette::miette!("Unknown bundler error"),
            }
        }
        other => Report::new(other),
    }
}

fn config_help(err: &ConfigError) -> &'static str {
    match err {
        ConfigError::PackageNotFound(_) => "Run kiln from the package root, or pass --cwd <dir>.",
        ConfigError::MissingPackageField { .. } => {
            "Add the field to package.json, or declare outputs explicitly in kiln.toml."
        }
        ConfigError::EntryNotFound(_) => {
            "Create the entry module or set `entry` in kiln.toml (or KILN_ENTRY)."
        }
        ConfigError::InvalidPattern { .. } => "Patterns use glob syntax, e.g. `src/**/*.txt`.",
        _ => "Run `kiln check` to see the resolved configuration.",
    }
}

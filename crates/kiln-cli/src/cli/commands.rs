use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Available Kiln subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bundle the package
    ///
    /// Re-reads package.json, builds the entry once per output and writes
    /// every bundle to its declared path. Nothing is written if any output
    /// fails.
    Build(BuildArgs),

    /// Validate configuration without building
    ///
    /// Prints the resolved entry, outputs and plugin order. Exits non-zero
    /// if the configuration is invalid.
    Check(CheckArgs),

    /// Print the UMD global name for a package
    Name(NameArgs),
}

/// Arguments for the build command
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// TOML config file to use instead of kiln.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// TOML config file to use instead of kiln.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the resolved configuration as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the name command
#[derive(Args, Debug, Default)]
pub struct NameArgs {
    /// Package name, e.g. `@acme/svelte-date-picker`
    ///
    /// Read from package.json when omitted.
    #[arg(value_name = "PACKAGE")]
    pub package: Option<String>,
}

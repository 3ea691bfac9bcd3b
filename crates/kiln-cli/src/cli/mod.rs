//! Command-line interface definition.
//!
//! - `kiln build` - bundle the package into every configured output
//! - `kiln check` - validate the configuration and print the build plan
//! - `kiln name` - print the UMD global name derived from a package name

mod commands;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{BuildArgs, CheckArgs, Command, NameArgs};

/// Kiln - bundle Svelte component libraries
#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    version,
    about = "Bundle a Svelte component library into ES and UMD outputs",
    long_about = "Kiln builds a Svelte component library for publishing.\n\
                  Output paths come from package.json (`module` for the ES bundle, `main` for\n\
                  the UMD bundle) and the UMD global name is derived from the package name."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress status output and logs except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also honors `NO_COLOR`)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project directory containing package.json
    ///
    /// Defaults to the current directory.
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

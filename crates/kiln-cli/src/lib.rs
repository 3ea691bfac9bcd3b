//! Kiln CLI - bundle a Svelte component library for publishing.
//!
//! The `kiln` binary reads `package.json` (plus an optional `kiln.toml`),
//! builds the entry module once per configured output and writes each bundle
//! to its declared path.
//!
//! - [`cli`] - argument parsing
//! - `commands` - `build`, `check` and `name`
//! - [`config`] - config discovery plus environment overrides
//! - [`error`] - CLI errors and their miette rendering
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines and build summaries
//!
//! ```rust,no_run
//! use kiln_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};

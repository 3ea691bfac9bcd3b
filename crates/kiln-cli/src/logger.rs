//! Tracing subscriber setup for the CLI.
//!
//! Level selection, first match wins:
//! 1. `--verbose`: debug for every kiln crate
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. info for kiln crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const KILN_CRATES: &[&str] = &["kiln_cli", "kiln_bundler", "kiln_config", "kiln_plugin_svelte"];

/// Filter directives enabling `level` for every kiln crate.
pub fn kiln_directives(level: &str) -> String {
    KILN_CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",")
}

fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(kiln_directives("debug"))
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(kiln_directives("info")))
    }
}

/// Install the global subscriber. Logs go to stderr.
///
/// ```rust,no_run
/// use kiln_cli::logger::init_logger;
///
/// init_logger(true, false, false);
/// tracing::debug!("resolving entry");
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .without_time()
        .compact();

    // A subscriber installed earlier (tests) takes precedence.
    let _ = tracing_subscriber::registry()
        .with(select_filter(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}

//! Subscriber setup for applications embedding kiln-bundler.
//!
//! Library code only emits `tracing` events; nothing is printed unless a
//! subscriber is installed. These helpers install a compact one.

use std::fmt;
use std::str::FromStr;
use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt as fmt_layer, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Silent,
    Error,
    Warn,
    #[default]
    Info,
    /// Also turns on Rolldown's own debug output
    Debug,
}

impl LogLevel {
    /// Level for `--verbose` / `--quiet` style flags; quiet wins.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => LogLevel::Error,
            (true, false) => LogLevel::Debug,
            (false, false) => LogLevel::Info,
        }
    }

    fn level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Silent => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
        }
    }

    fn env_filter(self) -> EnvFilter {
        let filter = EnvFilter::builder()
            .with_default_directive(self.level_filter().into())
            .from_env_lossy();

        // Rolldown is chatty below warn; keep it quiet unless debugging.
        match (self, "rolldown=warn".parse()) {
            (LogLevel::Info, Ok(directive)) => filter.add_directive(directive),
            _ => filter,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "trace" => Ok(LogLevel::Debug),
            other => Err(format!("Invalid log level: {}", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level_filter())
    }
}

/// Install a global subscriber at `level`. `RUST_LOG` directives still apply
/// on top. Only the first call in a process has any effect.
///
/// ```rust,no_run
/// use kiln_bundler::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Debug);
/// ```
pub fn init_logging(level: LogLevel) {
    INIT.call_once(|| install(level.env_filter()));
}

/// Install a subscriber configured entirely from `RUST_LOG`, defaulting to
/// [`LogLevel::Info`].
pub fn init_logging_from_env() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| LogLevel::Info.env_filter());
        install(filter);
    });
}

fn install(filter: EnvFilter) {
    // Another subscriber may already be installed by the host application.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer::layer().compact().with_target(false).without_time())
        .try_init();
}

//! Terminal output: status lines and the build summary.
//!
//! All UI output goes to stderr so stdout stays clean for `kiln check` and
//! `kiln name`.

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{OutputSummary, format_duration, format_size, print_build_summary};
pub use messages::{error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(true);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Decide once whether status output is colored.
///
/// `--no-color` and `NO_COLOR` disable colors; `FORCE_COLOR` enables them
/// even when stderr is not a terminal.
pub fn init_colors(no_color: bool) {
    let enabled = if no_color || std::env::var_os("NO_COLOR").is_some() {
        false
    } else if std::env::var_os("FORCE_COLOR").is_some() {
        true
    } else {
        console::user_attended_stderr()
    };

    COLORS.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled_stderr(enabled);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

/// Silence everything but error lines (`--quiet`).
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub(crate) fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

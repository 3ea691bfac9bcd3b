//! Formatting utilities for sizes, durations, and build summaries.

use std::time::Duration;

use console::Term;
use owo_colors::OwoColorize;

use super::{colors_enabled, quiet};

/// One written bundle, as shown in the build summary.
#[derive(Debug, Clone)]
pub struct OutputSummary {
    pub file: String,
    pub format: String,
    pub name: Option<String>,
    pub size: u64,
    pub sourcemap: bool,
}

/// Format file size in human-readable format.
///
/// ```
/// use kiln_cli::ui::format_size;
///
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}

/// Format duration in human-readable format (`50ms`, `1.50s`, `2m 5s`).
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

fn describe(entry: &OutputSummary) -> String {
    let mut label = entry.format.clone();
    if let Some(name) = &entry.name {
        label.push_str(", ");
        label.push_str(name);
    }
    if entry.sourcemap {
        label.push_str(", map");
    }
    label
}

/// Print the table of written outputs to stderr.
pub fn print_build_summary(entries: &[OutputSummary], elapsed: Duration) {
    if quiet() {
        return;
    }
    let width = (Term::stderr().size().1 as usize).clamp(20, 80);
    let total: u64 = entries.iter().map(|e| e.size).sum();
    let rule = "─".repeat(width);

    if !colors_enabled() {
        eprintln!("\nBuild Summary\n{}", rule);
        for entry in entries {
            eprintln!(
                "  ▸ {} {} ({})",
                entry.file,
                format_size(entry.size),
                describe(entry)
            );
        }
        eprintln!("{}\n  Total: {} in {}", rule, format_size(total), format_duration(elapsed));
        return;
    }

    eprintln!("\n{}", "Build Summary".bold().underline());
    eprintln!("{}", rule);
    for entry in entries {
        eprintln!(
            "  {} {} {} {}",
            "▸".blue(),
            entry.file.bright_white().bold(),
            format_size(entry.size).dimmed(),
            format!("({})", describe(entry)).dimmed()
        );
    }
    eprintln!("{}", rule);
    eprintln!(
        "  {} {} in {}",
        "Total:".bold(),
        format_size(total).green(),
        format_duration(elapsed).green()
    );
}

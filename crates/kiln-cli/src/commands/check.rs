//! Check command implementation.
//!
//! Validates configuration without building and prints the resolved plan to
//! stdout.

use std::fmt::Write as _;
use std::path::Path;

use kiln_bundler::BuildPlan;
use kiln_config::{BuildConfig, OutputFormat};

use crate::cli::CheckArgs;
use crate::config::{self, describe_source};
use crate::error::Result;
use crate::ui;

pub fn execute(args: CheckArgs, cwd: &Path) -> Result<()> {
    let loaded = config::load(cwd, args.config.as_deref())?;

    kiln_config::validate_fs(&loaded.config, cwd)?;
    // Same schema checks the build runs, against the same working directory.
    BuildPlan::new(loaded.config.clone(), cwd)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&loaded.config)?);
    } else {
        print!(
            "{}",
            render_plan(&loaded.config, &describe_source(&loaded.source, cwd))
        );
    }

    ui::success("Configuration is valid");
    Ok(())
}

/// Plain-text rendering of a resolved build.
pub fn render_plan(config: &BuildConfig, source: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "config:  {}", source);
    let _ = writeln!(out, "entry:   {}", config.entry.display());
    let _ = writeln!(out, "outputs:");
    for output in &config.outputs {
        let _ = write!(out, "  {} ({}", output.file.display(), output.format);
        if output.format == OutputFormat::Umd {
            if let Some(name) = &output.name {
                let _ = write!(out, ", global {}", name);
            }
        }
        if output.sourcemap {
            let _ = write!(out, ", sourcemap");
        }
        let _ = writeln!(out, ")");
    }

    let stages: Vec<&str> = config.plugins.iter().map(|p| p.stage_name()).collect();
    let _ = writeln!(
        out,
        "plugins: {}",
        if stages.is_empty() {
            "(none)".to_string()
        } else {
            stages.join(" -> ")
        }
    );

    out
}

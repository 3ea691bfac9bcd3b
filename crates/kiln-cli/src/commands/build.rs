//! Build command implementation.

use std::path::Path;
use std::time::Instant;

use kiln_bundler::{BuildPlan, build, write_outputs};

use crate::cli::BuildArgs;
use crate::config::{self, describe_source};
use crate::error::Result;
use crate::ui::{self, OutputSummary};

/// Execute the build command.
///
/// 1. Load package.json and overrides (re-read on every build)
/// 2. Validate the configuration, including that the entry exists
/// 3. Bundle every output concurrently
/// 4. Write all outputs, or none if any write fails
pub async fn execute(args: BuildArgs, cwd: &Path) -> Result<()> {
    let loaded = config::load(cwd, args.config.as_deref())?;
    let config = loaded.config;

    kiln_config::validate_fs(&config, cwd)?;

    ui::info(&format!(
        "Building {} ({})",
        config.entry.display(),
        describe_source(&loaded.source, cwd)
    ));

    let start = Instant::now();
    let plan = BuildPlan::new(config, cwd)?;
    if plan.plugins().is_empty() {
        ui::warning("No plugins configured; only plain JavaScript will be bundled");
    }
    let result = build(plan).await?;
    if let Err(err) = write_outputs(&result, cwd) {
        ui::error("Writing outputs failed, no files were changed");
        return Err(err.into());
    }
    let elapsed = start.elapsed();

    let summary: Vec<OutputSummary> = result
        .outputs
        .iter()
        .map(|output| OutputSummary {
            file: output.descriptor.file.display().to_string(),
            format: output.descriptor.format.to_string(),
            name: output.descriptor.name.clone(),
            size: output.code.len() as u64,
            sourcemap: output.sourcemap.is_some(),
        })
        .collect();

    ui::print_build_summary(&summary, elapsed);
    ui::success(&format!(
        "Built {} output{} in {}",
        summary.len(),
        if summary.len() == 1 { "" } else { "s" },
        ui::format_duration(elapsed)
    ));

    Ok(())
}

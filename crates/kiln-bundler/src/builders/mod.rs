//! Build planning and execution.
//!
//! A [`BuildPlan`] is a validated [`kiln_config::BuildConfig`] pinned to a
//! working directory. Each output descriptor becomes one [`OutputPass`]: a
//! full Rolldown run over the same entry with its own plugin instances.
//!
//! ```no_run
//! use kiln_bundler::{BuildPlan, build};
//! use kiln_config::{BuildConfig, PackageMetadata};
//!
//! # async fn example() -> kiln_bundler::Result<()> {
//! let package = PackageMetadata::from_dir("/work/widget")?;
//! let plan = BuildPlan::new(BuildConfig::from_package(&package)?, "/work/widget")?;
//!
//! for output in build(plan).await?.outputs {
//!     println!("{} ({} bytes)", output.descriptor.file.display(), output.code.len());
//! }
//! # Ok(())
//! # }
//! ```

mod executor;
mod plan;

pub use executor::{BuildResult, EmittedOutput, build};
pub use plan::{BuildPlan, OutputPass};

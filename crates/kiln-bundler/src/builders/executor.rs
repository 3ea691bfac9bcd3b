//! Concurrent execution of output passes.

use std::path::PathBuf;
use std::sync::Arc;

use kiln_config::{OutputDescriptor, PluginSpec};
use rolldown::{BundleOutput, BundlerBuilder as RolldownBundlerBuilder, BundlerOptions};
use rolldown_common::Output;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::builders::plan::BuildPlan;
use crate::plugins::PluginChain;
use crate::{Error, Result};

/// Everything a build emitted, in declared output order.
#[derive(Debug, Clone, Default)]
pub struct BuildResult {
    pub outputs: Vec<EmittedOutput>,
}

/// A single bundle produced by one pass.
#[derive(Debug, Clone)]
pub struct EmittedOutput {
    pub descriptor: OutputDescriptor,
    pub code: String,
    /// Contents of the `.map` file, when the descriptor asks for one
    pub sourcemap: Option<String>,
}

impl BuildResult {
    pub fn get(&self, file: impl AsRef<std::path::Path>) -> Option<&EmittedOutput> {
        self.outputs
            .iter()
            .find(|o| o.descriptor.file == file.as_ref())
    }
}

/// Run every pass of `plan`.
///
/// Passes run concurrently with bounded parallelism and share nothing: each
/// gets freshly constructed plugins. The first failing pass aborts the rest.
pub async fn build(plan: BuildPlan) -> Result<BuildResult> {
    let cwd = plan.cwd().to_path_buf();
    let specs = plan.shared_plugins();
    let jobs: Vec<(OutputDescriptor, BundlerOptions)> = plan
        .passes()
        .iter()
        .map(|pass| (pass.descriptor.clone(), pass.rolldown_options(&plan)))
        .collect();

    tracing::debug!(passes = jobs.len(), cwd = %cwd.display(), "starting build");

    let max_parallel = num_cpus::get().clamp(1, 8);
    let semaphore = Arc::new(Semaphore::new(max_parallel));
    let mut join_set = JoinSet::new();
    let total = jobs.len();

    for (index, (descriptor, options)) in jobs.into_iter().enumerate() {
        let permit = Arc::clone(&semaphore);
        let specs = Arc::clone(&specs);
        let cwd = cwd.clone();

        join_set.spawn(async move {
            let result = match permit.acquire_owned().await {
                Ok(_permit) => run_pass(descriptor, options, &specs, cwd).await,
                Err(e) => Err(Error::Task(e.to_string())),
            };
            (index, result)
        });
    }

    let mut slots: Vec<Option<EmittedOutput>> = (0..total).map(|_| None).collect();

    while let Some(joined) = join_set.join_next().await {
        let (index, result) = match joined {
            Ok(done) => done,
            Err(join_err) => {
                join_set.abort_all();
                return Err(Error::Task(join_err.to_string()));
            }
        };

        match result {
            Ok(output) => slots[index] = Some(output),
            Err(e) => {
                join_set.abort_all();
                return Err(e);
            }
        }
    }

    let outputs = slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| Error::Task(format!("pass {index} produced no result")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(BuildResult { outputs })
}

async fn run_pass(
    descriptor: OutputDescriptor,
    options: BundlerOptions,
    specs: &[PluginSpec],
    cwd: PathBuf,
) -> Result<EmittedOutput> {
    let chain = PluginChain::from_specs(specs, &cwd)?;

    tracing::debug!(
        file = %descriptor.file.display(),
        format = %descriptor.format,
        stages = ?chain.stage_names(),
        "bundling output"
    );

    let mut bundler = RolldownBundlerBuilder::default()
        .with_options(options)
        .with_plugins(chain.into_rolldown_plugins())
        .build()
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    let bundle = bundler
        .generate()
        .await
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    collect_output(descriptor, bundle)
}

/// Reduce a Rolldown bundle to the single file this pass is responsible for.
fn collect_output(descriptor: OutputDescriptor, bundle: BundleOutput) -> Result<EmittedOutput> {
    let mut code = None;
    let mut sourcemap = None;
    let mut extra_chunks = Vec::new();

    for asset in &bundle.assets {
        match asset {
            Output::Chunk(chunk) if chunk.is_entry && code.is_none() => {
                code = Some(chunk.code.clone());
            }
            Output::Chunk(chunk) => extra_chunks.push(chunk.filename.to_string()),
            Output::Asset(asset) if asset.filename.ends_with(".map") => {
                sourcemap = Some(String::from_utf8_lossy(asset.source.as_bytes()).into_owned());
            }
            Output::Asset(asset) => {
                tracing::debug!(asset = %asset.filename, "ignoring emitted asset");
            }
        }
    }

    let file = descriptor.file.display().to_string();

    if !extra_chunks.is_empty() {
        return Err(Error::UnexpectedChunks {
            file,
            reason: format!(
                "would be split into {} additional chunks ({})",
                extra_chunks.len(),
                extra_chunks.join(", ")
            ),
        });
    }

    let code = code.ok_or_else(|| Error::UnexpectedChunks {
        file,
        reason: "produced no entry chunk".to_string(),
    })?;

    Ok(EmittedOutput {
        descriptor,
        code,
        sourcemap,
    })
}

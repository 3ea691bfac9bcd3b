use std::path::{Path, PathBuf};
use std::sync::Arc;

use kiln_config::{BuildConfig, OutputDescriptor, OutputFormat, PluginSpec};
use path_clean::PathClean;
use rolldown::{
    BundlerOptions, InputItem, OutputFormat as RolldownFormat, Platform, ResolveOptions,
    SourceMapType,
};

use crate::Result;

/// A validated build, ready to run.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    cwd: PathBuf,
    entry: PathBuf,
    passes: Vec<OutputPass>,
    plugins: Arc<[PluginSpec]>,
}

/// One Rolldown run producing a single output file.
#[derive(Debug, Clone)]
pub struct OutputPass {
    pub descriptor: OutputDescriptor,
}

impl BuildPlan {
    /// Validate `config` and resolve it against `cwd`.
    ///
    /// Only schema checks run here; a missing entry file surfaces from
    /// Rolldown as an unresolved-entry diagnostic.
    pub fn new(config: BuildConfig, cwd: impl AsRef<Path>) -> Result<Self> {
        kiln_config::validate_schema(&config)?;

        let cwd = absolute(cwd.as_ref())?;
        let entry = cwd.join(&config.entry).clean();

        let passes = config
            .outputs
            .into_iter()
            .map(|descriptor| OutputPass { descriptor })
            .collect();

        Ok(Self {
            cwd,
            entry,
            passes,
            plugins: config.plugins.into(),
        })
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Absolute path of the entry module.
    pub fn entry(&self) -> &Path {
        &self.entry
    }

    pub fn passes(&self) -> &[OutputPass] {
        &self.passes
    }

    pub fn plugins(&self) -> &[PluginSpec] {
        &self.plugins
    }

    pub(crate) fn shared_plugins(&self) -> Arc<[PluginSpec]> {
        Arc::clone(&self.plugins)
    }

    /// Options for Rolldown's own resolver, mirroring the resolve stage so
    /// relative imports see the same extensions and package fields.
    fn rolldown_resolve(&self) -> Option<ResolveOptions> {
        self.plugins.iter().find_map(|spec| match spec {
            PluginSpec::Resolve(options) => Some(ResolveOptions {
                main_fields: Some(options.effective_main_fields()),
                extensions: Some(options.extensions.clone()),
                condition_names: Some(options.condition_names()),
                ..Default::default()
            }),
            _ => None,
        })
    }
}

impl OutputPass {
    pub fn rolldown_options(&self, plan: &BuildPlan) -> BundlerOptions {
        let descriptor = &self.descriptor;

        BundlerOptions {
            input: Some(vec![InputItem {
                name: None,
                import: plan.entry.to_string_lossy().into_owned(),
            }]),
            cwd: Some(plan.cwd.clone()),
            file: Some(descriptor.file.to_string_lossy().into_owned()),
            format: Some(match descriptor.format {
                OutputFormat::Es => RolldownFormat::Esm,
                OutputFormat::Umd => RolldownFormat::Umd,
            }),
            name: descriptor.name.clone(),
            sourcemap: descriptor.sourcemap.then_some(SourceMapType::File),
            platform: Some(Platform::Browser),
            resolve: plan.rolldown_resolve(),
            ..Default::default()
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.clean())
    } else {
        Ok(std::env::current_dir()?.join(path).clean())
    }
}

//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for library use).

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use rustc_hash::FxHashSet;

use crate::config::BuildConfig;
use crate::error::{ConfigError, Result};
use crate::plugin::PluginSpec;

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use kiln_config::{BuildConfig, ConfigValidator, PackageMetadata, SchemaValidator};
///
/// let pkg = PackageMetadata::new("widget")
///     .with_module("dist/index.mjs")
///     .with_main("dist/index.js");
/// let config = BuildConfig::from_package(&pkg).unwrap();
///
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        if config.entry.as_os_str().is_empty() {
            return Err(ConfigError::EmptyEntry);
        }

        if config.outputs.is_empty() {
            return Err(ConfigError::NoOutputs);
        }

        // Output paths are compared after normalization so `dist/./a.js` and
        // `dist/a.js` collide.
        let mut seen = FxHashSet::default();
        for output in &config.outputs {
            let normalized: PathBuf = output.file.clean();
            if !seen.insert(normalized) {
                return Err(ConfigError::DuplicateOutput(output.file.clone()));
            }
        }

        let mut stages = FxHashSet::default();
        for plugin in &config.plugins {
            if !stages.insert(plugin.stage_name()) {
                return Err(ConfigError::DuplicateStage(plugin.stage_name()));
            }

            if let PluginSpec::String(options) = plugin {
                for pattern in options.include.iter().chain(&options.exclude) {
                    glob::Pattern::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                        pattern: pattern.clone(),
                        message: e.msg.to_string(),
                    })?;
                }
            }
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs schema validation, then checks that the entry exists under the root.
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        let entry = self.root.join(&config.entry);
        if !entry.is_file() {
            return Err(ConfigError::EntryNotFound(entry));
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &BuildConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &BuildConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}

//! Build configuration and file-level overrides.
//!
//! [`KilnConfig`] is what a user writes (`kiln.toml` or the `kiln` field of
//! `package.json`); every field is optional. [`BuildConfig`] is the resolved
//! result after package-derived defaults are filled in.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::output::{OutputDescriptor, OutputFormat};
use crate::package::PackageMetadata;
use crate::plugin::PluginSpec;

/// Entry module used when none is configured.
pub const DEFAULT_ENTRY: &str = "src/index.js";

/// A fully specified build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Single source entry point, relative to the project root
    pub entry: PathBuf,

    /// Emitted bundles, in declaration order
    pub outputs: Vec<OutputDescriptor>,

    /// Transform stages, in application order
    pub plugins: Vec<PluginSpec>,
}

impl BuildConfig {
    /// The default build for a package: `src/index.js` bundled to the package's
    /// `module` (ES) and `main` (UMD) paths through the three-stage chain.
    pub fn from_package(package: &PackageMetadata) -> Result<Self> {
        KilnConfig::default().resolve(package)
    }

    /// The global name of the first universal-module output, if any.
    pub fn bundle_name(&self) -> Option<&str> {
        self.outputs
            .iter()
            .find(|o| o.format == OutputFormat::Umd)
            .and_then(|o| o.name.as_deref())
    }
}

/// User-provided overrides; absent fields fall back to package-derived defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KilnConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<PathBuf>,

    #[serde(default, rename = "output", skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<OutputDescriptor>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<PluginSpec>>,
}

impl KilnConfig {
    /// Create from serde_json::Value (the `kiln` field of package.json, or TOML
    /// converted to JSON)
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::KilnConfig;
    /// use serde_json::json;
    /// use std::path::PathBuf;
    ///
    /// let config = KilnConfig::from_value(json!({ "entry": "src/main.js" })).unwrap();
    /// assert_eq!(config.entry, Some(PathBuf::from("src/main.js")));
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Fill in defaults from package metadata.
    ///
    /// The `module`/`main` fields are only required when the outputs are not
    /// given explicitly. Universal-module outputs without a `name` receive the
    /// name derived from the package.
    pub fn resolve(self, package: &PackageMetadata) -> Result<BuildConfig> {
        let entry = self.entry.unwrap_or_else(|| PathBuf::from(DEFAULT_ENTRY));

        let mut outputs = match self.outputs {
            Some(outputs) => outputs,
            None => default_outputs(package)?,
        };

        let bundle_name = package.bundle_name();
        for output in &mut outputs {
            if output.format == OutputFormat::Umd && output.name.is_none() {
                output.name = Some(bundle_name.clone());
            }
        }

        let plugins = self.plugins.unwrap_or_else(PluginSpec::default_chain);

        tracing::debug!(
            entry = %entry.display(),
            outputs = outputs.len(),
            stages = plugins.len(),
            "resolved build configuration"
        );

        Ok(BuildConfig {
            entry,
            outputs,
            plugins,
        })
    }
}

fn default_outputs(package: &PackageMetadata) -> Result<Vec<OutputDescriptor>> {
    let module = package
        .module
        .as_ref()
        .ok_or(ConfigError::MissingPackageField {
            field: "module",
            format: "es",
        })?;
    let main = package
        .main
        .as_ref()
        .ok_or(ConfigError::MissingPackageField {
            field: "main",
            format: "umd",
        })?;

    Ok(vec![
        OutputDescriptor::es(module),
        OutputDescriptor::umd(main, package.bundle_name()),
    ])
}

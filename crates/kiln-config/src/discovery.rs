//! File-based config discovery for CLI use
//!
//! Every build starts from `package.json`. Overrides come from, in order:
//!
//! 1. `kiln.toml` in the project root
//! 2. the `kiln` field of `package.json`
//! 3. nothing: the package-derived defaults are used as-is

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{BuildConfig, KilnConfig};
use crate::error::{ConfigError, Result};
use crate::package::{PackageMetadata, read_package_json};

/// Name of the optional TOML config file.
pub const CONFIG_FILE_NAME: &str = "kiln.toml";

/// Where the overrides of a discovered config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A TOML file (`kiln.toml` or an explicit `--config` path)
    File(PathBuf),
    /// The `kiln` field of `package.json`
    PackageField,
    /// No overrides
    Defaults,
}

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use kiln_config::ConfigDiscovery;
///
/// let (config, _source) = ConfigDiscovery::new(".").load().unwrap();
/// println!("building {}", config.entry.display());
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
    explicit: Option<PathBuf>,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            explicit: None,
        }
    }

    /// Use a specific TOML file instead of searching for `kiln.toml`.
    ///
    /// Relative paths are resolved against the root.
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.explicit = Some(self.root.join(path));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a TOML config file, if any
    pub fn find(&self) -> Option<PathBuf> {
        if let Some(path) = &self.explicit {
            return Some(path.clone());
        }

        let toml_path = self.root.join(CONFIG_FILE_NAME);
        toml_path.exists().then_some(toml_path)
    }

    /// Load package metadata and overrides, then resolve them into a build.
    pub fn load(&self) -> Result<(BuildConfig, ConfigSource)> {
        let package_path = self.root.join("package.json");
        let package_value = read_package_json(&package_path)?;

        let package = PackageMetadata::from_value(package_value.clone()).map_err(|e| {
            ConfigError::InvalidPackage {
                path: package_path.clone(),
                message: e.to_string(),
            }
        })?;

        let (overrides, source) = match self.find() {
            Some(path) => (load_toml(&path)?, ConfigSource::File(path)),
            None => match package_value.get("kiln") {
                Some(field) if !field.is_null() => (
                    KilnConfig::from_value(field.clone())?,
                    ConfigSource::PackageField,
                ),
                _ => (KilnConfig::default(), ConfigSource::Defaults),
            },
        };

        tracing::debug!(root = %self.root.display(), ?source, "loaded kiln config");

        Ok((overrides.resolve(&package)?, source))
    }
}

fn load_toml(path: &Path) -> Result<KilnConfig> {
    let content = fs::read_to_string(path)?;

    let toml_val: toml::Value = toml::from_str(&content)
        .map_err(|e| ConfigError::InvalidValue(format!("Invalid TOML syntax: {}", e)))?;

    let value = serde_json::to_value(toml_val)
        .map_err(|e| ConfigError::InvalidValue(format!("TOML to JSON conversion failed: {}", e)))?;

    KilnConfig::from_value(value)
}

/// Discover and load config from the current directory (convenience function)
pub fn discover() -> Result<(BuildConfig, ConfigSource)> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}

//! Configuration loading for the CLI.
//!
//! Priority: environment (`KILN_*`) > `kiln.toml` or `--config` > the `kiln`
//! field of `package.json` > package-derived defaults. Everything below the
//! environment layer is handled by [`kiln_config::ConfigDiscovery`]; this
//! module layers the environment on top with figment.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Serialized};
use kiln_config::{BuildConfig, ConfigDiscovery, ConfigSource};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings that may be overridden from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvOverrides {
    /// `KILN_ENTRY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<PathBuf>,
}

impl EnvOverrides {
    /// Read overrides from `KILN_*` variables.
    pub fn from_env() -> Result<Self> {
        Self::extract(Figment::from(Env::prefixed("KILN_").only(&["entry"])))
    }

    /// Extract overrides from any figment, with empty defaults underneath.
    pub fn extract(figment: Figment) -> Result<Self> {
        let merged = Figment::from(Serialized::defaults(Self::default())).merge(figment);
        Ok(merged.extract()?)
    }

    pub fn apply(&self, config: &mut BuildConfig) {
        if let Some(entry) = &self.entry {
            tracing::debug!(entry = %entry.display(), "entry overridden from environment");
            config.entry = entry.clone();
        }
    }
}

/// A loaded configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: BuildConfig,
    pub source: ConfigSource,
}

/// Discover the build configuration for `cwd` and apply environment overrides.
pub fn load(cwd: &Path, config_file: Option<&Path>) -> Result<LoadedConfig> {
    load_with(cwd, config_file, &EnvOverrides::from_env()?)
}

pub fn load_with(
    cwd: &Path,
    config_file: Option<&Path>,
    overrides: &EnvOverrides,
) -> Result<LoadedConfig> {
    let mut discovery = ConfigDiscovery::new(cwd);
    if let Some(path) = config_file {
        discovery = discovery.with_config_file(path);
    }

    let (mut config, source) = discovery.load()?;
    overrides.apply(&mut config);

    Ok(LoadedConfig { config, source })
}

/// Human-readable description of a config source.
pub fn describe_source(source: &ConfigSource, cwd: &Path) -> String {
    match source {
        ConfigSource::File(path) => path
            .strip_prefix(cwd)
            .unwrap_or(path)
            .display()
            .to_string(),
        ConfigSource::PackageField => "package.json (\"kiln\" field)".to_string(),
        ConfigSource::Defaults => "package.json defaults".to_string(),
    }
}

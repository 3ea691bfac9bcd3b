//! `package.json` metadata consumed by the build.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::name::derive_bundle_name;

/// The subset of `package.json` the build reads.
///
/// Read-only input: nothing in Kiln writes package metadata back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Package name, possibly scoped (`@scope/name`)
    pub name: String,

    /// Path of the ES-module bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Path of the universal-module bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
}

impl PackageMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: None,
            main: None,
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_main(mut self, main: impl Into<String>) -> Self {
        self.main = Some(main.into());
        self
    }

    /// Read `package.json` from a project directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::from_path(dir.as_ref().join("package.json"))
    }

    /// Read a specific `package.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let value = read_package_json(path)?;
        Self::from_value(value).map_err(|e| ConfigError::InvalidPackage {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Build from an already-parsed `package.json` document.
    pub fn from_value(value: Value) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// The global identifier the UMD bundle exposes.
    pub fn bundle_name(&self) -> String {
        derive_bundle_name(&self.name)
    }
}

/// Parse `package.json` into a JSON value, mapping failures onto config errors.
pub(crate) fn read_package_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::PackageNotFound(PathBuf::from(path))
        } else {
            ConfigError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::InvalidPackage {
        path: path.to_path_buf(),
        message: format!("Invalid JSON: {}", e),
    })
}

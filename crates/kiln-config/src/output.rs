//! Output descriptors: where a bundle is written and in which format.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Bundle format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Standard `import`/`export` module
    #[serde(rename = "es", alias = "esm", alias = "module")]
    Es,
    /// Universal module: AMD, CommonJS or a browser global
    #[serde(rename = "umd", alias = "universal")]
    Umd,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Es => "es",
            OutputFormat::Umd => "umd",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "es" | "esm" | "module" => Ok(OutputFormat::Es),
            "umd" | "universal" => Ok(OutputFormat::Umd),
            other => Err(format!("Invalid output format: {}", other)),
        }
    }
}

/// One emitted bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDescriptor {
    /// Destination file, relative to the project root
    pub file: PathBuf,

    pub format: OutputFormat,

    /// Global export identifier (universal-module bundles only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Emit a `.map` file next to the bundle
    #[serde(default)]
    pub sourcemap: bool,
}

impl OutputDescriptor {
    pub fn es(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            format: OutputFormat::Es,
            name: None,
            sourcemap: false,
        }
    }

    pub fn umd(file: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            format: OutputFormat::Umd,
            name: Some(name.into()),
            sourcemap: false,
        }
    }

    pub fn with_sourcemap(mut self, sourcemap: bool) -> Self {
        self.sourcemap = sourcemap;
        self
    }
}

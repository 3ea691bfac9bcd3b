//! # kiln-config
//!
//! Declarative build configuration for Kiln.
//!
//! A build is fully described by a [`BuildConfig`]: one entry module, an ordered
//! list of [`OutputDescriptor`]s and an ordered [`PluginSpec`] chain. The default
//! configuration is derived from the project's `package.json`:
//!
//! ```
//! use kiln_config::{BuildConfig, OutputFormat, PackageMetadata};
//!
//! let pkg = PackageMetadata::new("svelte-my-widget")
//!     .with_module("dist/index.mjs")
//!     .with_main("dist/index.js");
//!
//! let config = BuildConfig::from_package(&pkg).unwrap();
//! assert_eq!(config.outputs.len(), 2);
//! assert_eq!(config.outputs[0].format, OutputFormat::Es);
//! assert_eq!(config.outputs[1].name.as_deref(), Some("MyWidget"));
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod name;
pub mod output;
pub mod package;
pub mod plugin;
pub mod validation;

pub use config::{BuildConfig, DEFAULT_ENTRY, KilnConfig};
pub use discovery::{CONFIG_FILE_NAME, ConfigDiscovery, ConfigSource, discover};
pub use error::{ConfigError, Result};
pub use name::derive_bundle_name;
pub use output::{OutputDescriptor, OutputFormat};
pub use package::PackageMetadata;
pub use plugin::{
    PluginSpec, ResolveOptions, StringOptions, SvelteOptions, WORKER_SCRIPT_PATTERNS,
};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};

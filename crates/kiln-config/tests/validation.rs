//! Tests for configuration validation.

use kiln_config::{
    BuildConfig, ConfigError, ConfigValidator, FsValidator, PackageMetadata, PluginSpec,
    StringOptions, validate_fs, validate_schema,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn widget_config() -> BuildConfig {
    let pkg = PackageMetadata::new("svelte-my-widget")
        .with_module("dist/index.mjs")
        .with_main("dist/index.js");
    BuildConfig::from_package(&pkg).expect("default config")
}

#[test]
fn validate_catches_missing_entry() {
    let dir = TempDir::new().expect("tempdir");
    let mut cfg = widget_config();
    cfg.entry = PathBuf::from("src/nonexistent.js");

    let result = FsValidator::new(dir.path()).validate(&cfg);
    match result.unwrap_err() {
        ConfigError::EntryNotFound(path) => {
            assert!(path.ends_with("src/nonexistent.js"));
        }
        other => panic!("expected EntryNotFound error, got {other:?}"),
    }
}

#[test]
fn validate_succeeds_when_entry_exists() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir(dir.path().join("src")).expect("create src dir");
    fs::write(dir.path().join("src/index.js"), "export {};").expect("write entry");

    assert!(validate_fs(&widget_config(), dir.path()).is_ok());
}

#[test]
fn entry_directory_is_not_an_entry() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("src/index.js")).expect("create dir");

    let err = validate_fs(&widget_config(), dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::EntryNotFound(_)));
}

#[test]
fn fs_validation_runs_schema_checks_first() {
    let dir = TempDir::new().expect("tempdir");
    let mut cfg = widget_config();
    cfg.outputs.clear();

    let err = validate_fs(&cfg, dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::NoOutputs));
}

#[test]
fn duplicate_output_path_is_rejected() {
    let mut cfg = widget_config();
    cfg.outputs[1].file = PathBuf::from("dist/../dist/index.mjs");

    let err = validate_schema(&cfg).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateOutput(_)));
}

#[test]
fn exclude_patterns_are_checked_too() {
    let mut cfg = widget_config();
    cfg.plugins[1] = PluginSpec::String(StringOptions {
        include: vec!["**/*.txt".into()],
        exclude: vec!["***".into()],
    });

    let err = validate_schema(&cfg).unwrap_err();
    match err {
        ConfigError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "***"),
        other => panic!("expected InvalidPattern, got {other:?}"),
    }
}

#[test]
fn empty_plugin_chain_is_valid() {
    let mut cfg = widget_config();
    cfg.plugins.clear();
    assert!(validate_schema(&cfg).is_ok());
}

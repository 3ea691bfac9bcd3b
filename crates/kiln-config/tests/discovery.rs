//! Tests for config discovery: kiln.toml, the `kiln` package field, and defaults.

use kiln_config::{
    ConfigDiscovery, ConfigError, ConfigSource, OutputDescriptor, OutputFormat, PluginSpec,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const WIDGET_PACKAGE: &str = r#"{
  "name": "svelte-my-widget",
  "version": "0.3.1",
  "module": "dist/index.mjs",
  "main": "dist/index.js"
}"#;

fn project(package: &str) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("package.json"), package).expect("write package.json");
    dir
}

#[test]
fn defaults_without_overrides() {
    let dir = project(WIDGET_PACKAGE);

    let (config, source) = ConfigDiscovery::new(dir.path()).load().unwrap();

    assert_eq!(source, ConfigSource::Defaults);
    assert_eq!(config.entry, PathBuf::from("src/index.js"));
    assert_eq!(
        config.outputs,
        vec![
            OutputDescriptor::es("dist/index.mjs"),
            OutputDescriptor::umd("dist/index.js", "MyWidget"),
        ]
    );
    assert_eq!(config.plugins, PluginSpec::default_chain());
}

#[test]
fn discovers_kiln_toml() {
    let dir = project(WIDGET_PACKAGE);
    fs::write(
        dir.path().join("kiln.toml"),
        r#"
entry = "src/main.js"

[[output]]
file = "build/widget.js"
format = "umd"
sourcemap = true
"#,
    )
    .unwrap();

    let discovery = ConfigDiscovery::new(dir.path());
    let found = discovery.find().unwrap();
    assert_eq!(found.file_name().unwrap(), "kiln.toml");

    let (config, source) = discovery.load().unwrap();
    assert_eq!(source, ConfigSource::File(found));
    assert_eq!(config.entry, PathBuf::from("src/main.js"));
    assert_eq!(config.outputs.len(), 1);
    assert_eq!(config.outputs[0].format, OutputFormat::Umd);
    assert_eq!(config.outputs[0].name.as_deref(), Some("MyWidget"));
    assert!(config.outputs[0].sourcemap);
}

#[test]
fn package_field_is_used_when_no_toml() {
    let dir = project(
        r#"{
  "name": "@acme/svelte-date-picker",
  "module": "dist/index.mjs",
  "main": "dist/index.js",
  "kiln": { "entry": "lib/entry.js" }
}"#,
    );

    let (config, source) = ConfigDiscovery::new(dir.path()).load().unwrap();

    assert_eq!(source, ConfigSource::PackageField);
    assert_eq!(config.entry, PathBuf::from("lib/entry.js"));
    assert_eq!(config.bundle_name(), Some("DatePicker"));
}

#[test]
fn toml_takes_precedence_over_package_field() {
    let dir = project(
        r#"{
  "name": "widget",
  "module": "dist/index.mjs",
  "main": "dist/index.js",
  "kiln": { "entry": "from-package.js" }
}"#,
    );
    fs::write(dir.path().join("kiln.toml"), r#"entry = "from-toml.js""#).unwrap();

    let (config, source) = ConfigDiscovery::new(dir.path()).load().unwrap();

    assert!(matches!(source, ConfigSource::File(_)));
    assert_eq!(config.entry, PathBuf::from("from-toml.js"));
}

#[test]
fn explicit_config_file_is_used() {
    let dir = project(WIDGET_PACKAGE);
    fs::create_dir(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join("config/release.toml"),
        r#"
[[plugins]]
name = "resolve"
browser = true
"#,
    )
    .unwrap();

    let (config, source) = ConfigDiscovery::new(dir.path())
        .with_config_file("config/release.toml")
        .load()
        .unwrap();

    assert_eq!(
        source,
        ConfigSource::File(dir.path().join("config/release.toml"))
    );
    assert_eq!(config.plugins.len(), 1);
    assert_eq!(config.plugins[0].stage_name(), "resolve");
}

#[test]
fn missing_explicit_config_file_is_io_error() {
    let dir = project(WIDGET_PACKAGE);

    let err = ConfigDiscovery::new(dir.path())
        .with_config_file("nope.toml")
        .load()
        .unwrap_err();

    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn package_without_main_fails_only_without_explicit_outputs() {
    let dir = project(r#"{ "name": "widget", "module": "dist/index.mjs" }"#);

    let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingPackageField { field: "main", .. }
    ));

    fs::write(
        dir.path().join("kiln.toml"),
        r#"
[[output]]
file = "dist/index.mjs"
format = "es"
"#,
    )
    .unwrap();
    assert!(ConfigDiscovery::new(dir.path()).load().is_ok());
}

#[test]
fn unknown_keys_in_toml_are_rejected() {
    let dir = project(WIDGET_PACKAGE);
    fs::write(dir.path().join("kiln.toml"), "minify = true\n").unwrap();

    let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue(_)));
}

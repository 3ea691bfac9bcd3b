//! Shared fixtures for kiln-bundler integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use kiln_bundler::{BuildPlan, BuildResult, build};
use kiln_config::{BuildConfig, PackageMetadata};
use tempfile::TempDir;

pub const PACKAGE_JSON: &str = r#"{
  "name": "svelte-my-widget",
  "version": "0.1.0",
  "module": "dist/index.mjs",
  "main": "dist/index.js"
}"#;

pub const WIDGET_COMPONENT: &str = r#"<script>
  export let label = 'Widget';
</script>

<button class="widget">{label}</button>

<style>
  .widget { color: tomato; }
</style>
"#;

/// A component library laid out the way `kiln` expects by default.
pub fn widget_project() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "package.json", PACKAGE_JSON);
    write(dir.path(), "src/Widget.svelte", WIDGET_COMPONENT);
    write(
        dir.path(),
        "src/index.js",
        "import Widget from './Widget.svelte';\nexport default Widget;\n",
    );
    dir
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write fixture");
}

/// Install a package into `root/node_modules`.
pub fn install(root: &Path, name: &str, manifest: &str, files: &[(&str, &str)]) {
    let dir = root.join("node_modules").join(name);
    write(&dir, "package.json", manifest);
    for (file, content) in files {
        write(&dir, file, content);
    }
}

pub fn default_config(root: &Path) -> BuildConfig {
    let package = PackageMetadata::from_dir(root).expect("package.json");
    BuildConfig::from_package(&package).expect("default config")
}

pub async fn build_project(root: &Path) -> kiln_bundler::Result<BuildResult> {
    let plan = BuildPlan::new(default_config(root), root)?;
    build(plan).await
}

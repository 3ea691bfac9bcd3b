//! Rolldown plugin for Svelte components
//!
//! Turns a `.svelte` file into a plain JavaScript (or TypeScript) module that
//! Rolldown can parse:
//!
//! ```text
//! .svelte file → load() → parse_component → scripts + template + css → module
//! ```
//!
//! The generated module keeps the component's script code verbatim (module
//! context first, then the instance script) and exposes the markup and styles
//! as string constants on its default export:
//!
//! ```js
//! export const preload = () => {};
//!
//! let count = 0;
//!
//! const __kiln_template = "<button>{count}</button>";
//! const __kiln_css = "button { color: red; }";
//! export default { name: "Counter", template: __kiln_template, css: __kiln_css };
//! ```
//!
//! The plugin also resolves bare imports of packages that ship uncompiled
//! components through a `svelte` field in their `package.json`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use kiln_config::SvelteOptions;
//! use kiln_plugin_svelte::KilnSveltePlugin;
//! use std::sync::Arc;
//!
//! let plugin = Arc::new(KilnSveltePlugin::new(SvelteOptions::default(), "."));
//! // Add to your Rolldown bundler configuration
//! ```

pub mod extractor;

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use kiln_config::SvelteOptions;
use rolldown_common::{ModuleType, ResolvedExternal};
use rolldown_plugin::{
    HookLoadArgs, HookLoadOutput, HookLoadReturn, HookResolveIdArgs, HookResolveIdOutput,
    HookResolveIdReturn, Plugin, PluginContext,
};
use serde_json::Value;

pub use extractor::{
    Component, ExtractedScript, ExtractorError, MAX_FILE_SIZE, MAX_SCRIPT_TAGS, ScriptContext,
    parse_component,
};

/// Rolldown plugin that compiles Svelte components into plain modules
#[derive(Debug, Clone)]
pub struct KilnSveltePlugin {
    options: SvelteOptions,
    /// Directory bare imports from the entry are resolved against
    root: PathBuf,
}

impl KilnSveltePlugin {
    pub fn new(options: SvelteOptions, root: impl Into<PathBuf>) -> Self {
        Self {
            options,
            root: root.into(),
        }
    }

    /// Whether this module id is a component, by configured extension.
    pub fn handles(&self, id: &str) -> bool {
        self.options
            .extensions
            .iter()
            .any(|ext| id.ends_with(ext.as_str()))
    }
}

impl Default for KilnSveltePlugin {
    fn default() -> Self {
        Self::new(SvelteOptions::default(), ".")
    }
}

impl Plugin for KilnSveltePlugin {
    fn name(&self) -> Cow<'static, str> {
        "kiln-svelte".into()
    }

    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        use rolldown_plugin::HookUsage;
        HookUsage::ResolveId | HookUsage::Load
    }

    /// Resolve ID hook - follows the `svelte` field of imported packages
    ///
    /// Only whole-package bare imports (`pkg`, `@scope/pkg`) are considered.
    /// Anything else, or a package without a `svelte` field, is left to the
    /// stages after this one.
    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs<'_>,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let specifier = args.specifier.to_string();
        let importer = args.importer.map(|s| s.to_string());
        let from_dir = importer
            .as_deref()
            .and_then(|importer| Path::new(importer).parent().map(Path::to_path_buf))
            .unwrap_or_else(|| self.root.clone());

        async move {
            if !is_whole_package(&specifier) {
                return Ok(None);
            }

            match resolve_svelte_field(&specifier, &from_dir) {
                Some(path) => {
                    tracing::debug!(
                        specifier = %specifier,
                        resolved = %path.display(),
                        "resolved via package svelte field"
                    );
                    Ok(Some(HookResolveIdOutput {
                        id: path.to_string_lossy().into_owned().into(),
                        external: Some(ResolvedExternal::Bool(false)),
                        ..Default::default()
                    }))
                }
                None => Ok(None),
            }
        }
    }

    /// Load hook - compiles component files
    ///
    /// - `Ok(Some(output))` - the generated module
    /// - `Ok(None)` - not a component, let Rolldown handle it
    /// - `Err(e)` - I/O error or malformed component; the build fails
    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();
        let handles = self.handles(&id);
        let include_css = self.options.css;

        async move {
            if !handles {
                return Ok(None);
            }

            let source = fs::read_to_string(&id)
                .with_context(|| format!("Failed to read Svelte file: {}", id))?;

            let component = parse_component(&source)
                .with_context(|| format!("Failed to parse Svelte file: {}", id))?;

            let (code, module_type) =
                generate_module(&component, &component_name(&id), include_css);

            Ok(Some(HookLoadOutput {
                code: code.into(),
                module_type: Some(module_type),
                ..Default::default()
            }))
        }
    }
}

/// Builds the module text for a parsed component.
pub fn generate_module(
    component: &Component<'_>,
    name: &str,
    include_css: bool,
) -> (String, ModuleType) {
    let (script, module_type) = combine_scripts(&component.scripts);

    let css = if include_css {
        component
            .styles
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        String::new()
    };

    let mut code = String::with_capacity(script.len() + component.markup.len() + css.len() + 128);
    if !script.trim().is_empty() {
        code.push_str(&script);
        code.push_str("\n\n");
    }
    code.push_str(&format!(
        "const __kiln_template = {};\n",
        js_string(component.markup.trim())
    ));
    code.push_str(&format!("const __kiln_css = {};\n", js_string(&css)));
    code.push_str(&format!(
        "export default {{ name: {}, template: __kiln_template, css: __kiln_css }};\n",
        js_string(name)
    ));

    (code, module_type)
}

/// Combines script blocks, module context first, and picks the module type.
///
/// Module type priority: ts > js
fn combine_scripts(scripts: &[ExtractedScript<'_>]) -> (String, ModuleType) {
    let ordered = scripts
        .iter()
        .filter(|s| s.context == ScriptContext::Module)
        .chain(scripts.iter().filter(|s| s.context == ScriptContext::Instance));

    let mut combined = String::new();
    let mut detected_lang = "js";

    for script in ordered {
        if !combined.is_empty() {
            combined.push_str("\n\n");
        }
        combined.push_str(script.source_text.trim_matches('\n'));
        detected_lang = choose_stronger_lang(detected_lang, script.lang);
    }

    (combined, determine_module_type(detected_lang))
}

fn determine_module_type(lang: &str) -> ModuleType {
    match lang {
        "ts" | "typescript" => ModuleType::Ts,
        _ => ModuleType::Js,
    }
}

fn choose_stronger_lang<'a>(lang1: &'a str, lang2: &'a str) -> &'a str {
    let strength = |lang: &str| match lang {
        "ts" | "typescript" => 2,
        _ => 1,
    };

    if strength(lang1) >= strength(lang2) {
        lang1
    } else {
        lang2
    }
}

/// The component's name: its file stem.
fn component_name(id: &str) -> String {
    Path::new(id)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn js_string(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

/// `pkg` or `@scope/pkg` with no sub-path.
fn is_whole_package(specifier: &str) -> bool {
    if specifier.is_empty()
        || specifier.starts_with('.')
        || specifier.starts_with('/')
        || specifier.contains(':')
        || specifier.contains('\\')
    {
        return false;
    }

    match specifier.strip_prefix('@') {
        Some(scoped) => matches!(
            scoped.split_once('/'),
            Some((scope, name)) if !scope.is_empty() && !name.is_empty() && !name.contains('/')
        ),
        None => !specifier.contains('/'),
    }
}

/// Looks for `node_modules/<specifier>/package.json` in `from_dir` and its
/// ancestors and returns the target of its `svelte` field.
fn resolve_svelte_field(specifier: &str, from_dir: &Path) -> Option<PathBuf> {
    for dir in from_dir.ancestors() {
        let package_dir = dir.join("node_modules").join(specifier);
        let manifest = package_dir.join("package.json");
        if !manifest.is_file() {
            continue;
        }

        // The nearest installed copy wins even if it has no svelte field.
        let field = fs::read_to_string(&manifest)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .and_then(|pkg| pkg.get("svelte")?.as_str().map(str::to_string));

        if field.is_none() {
            tracing::trace!(manifest = %manifest.display(), "no usable svelte field");
        }

        return field.map(|entry| package_dir.join(entry));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script<'a>(text: &'a str, context: ScriptContext, lang: &'a str) -> ExtractedScript<'a> {
        ExtractedScript::new(text, 0, context, lang)
    }

    #[test]
    fn test_plugin_name() {
        assert_eq!(KilnSveltePlugin::default().name(), "kiln-svelte");
    }

    #[test]
    fn test_handles_configured_extensions() {
        let plugin = KilnSveltePlugin::new(
            SvelteOptions {
                extensions: vec![".svelte".into(), ".svx".into()],
                css: true,
            },
            ".",
        );
        assert!(plugin.handles("/src/App.svelte"));
        assert!(plugin.handles("/src/Post.svx"));
        assert!(!plugin.handles("/src/index.js"));
    }

    #[test]
    fn test_determine_module_type() {
        assert!(matches!(determine_module_type("js"), ModuleType::Js));
        assert!(matches!(determine_module_type("ts"), ModuleType::Ts));
        assert!(matches!(
            determine_module_type("typescript"),
            ModuleType::Ts
        ));
    }

    #[test]
    fn test_choose_stronger_lang() {
        assert_eq!(choose_stronger_lang("js", "ts"), "ts");
        assert_eq!(choose_stronger_lang("ts", "js"), "ts");
        assert_eq!(choose_stronger_lang("js", "js"), "js");
    }

    #[test]
    fn test_combine_puts_module_context_first() {
        let scripts = vec![
            script("let count: number = 0", ScriptContext::Instance, "ts"),
            script("export const shared = 'data'", ScriptContext::Module, "js"),
        ];
        let (code, module_type) = combine_scripts(&scripts);
        assert_eq!(code, "export const shared = 'data'\n\nlet count: number = 0");
        assert!(matches!(module_type, ModuleType::Ts));
    }

    #[test]
    fn test_generate_module_shape() {
        let component =
            parse_component("<script>\nlet a = 1;\n</script>\n<h1>Hi</h1>\n<style>h1{}</style>")
                .unwrap();
        let (code, _) = generate_module(&component, "Title", true);
        assert_eq!(
            code,
            "let a = 1;\n\n\
             const __kiln_template = \"<h1>Hi</h1>\";\n\
             const __kiln_css = \"h1{}\";\n\
             export default { name: \"Title\", template: __kiln_template, css: __kiln_css };\n"
        );
    }

    #[test]
    fn test_generate_module_without_css() {
        let component = parse_component("<p>x</p><style>p{}</style>").unwrap();
        let (code, module_type) = generate_module(&component, "P", false);
        assert!(code.starts_with("const __kiln_template = \"<p>x</p>\";"));
        assert!(code.contains("const __kiln_css = \"\";"));
        assert!(matches!(module_type, ModuleType::Js));
    }

    #[test]
    fn test_markup_is_escaped() {
        let component = parse_component("<p title=\"a\">line\nbreak \\ done</p>").unwrap();
        let (code, _) = generate_module(&component, "P", true);
        assert!(code.contains(r#""<p title=\"a\">line\nbreak \\ done</p>""#));
    }

    #[test]
    fn test_component_name_is_file_stem() {
        assert_eq!(component_name("/src/lib/DatePicker.svelte"), "DatePicker");
        assert_eq!(component_name("Counter.svelte"), "Counter");
    }

    #[test]
    fn test_is_whole_package() {
        assert!(is_whole_package("svelte-spa-router"));
        assert!(is_whole_package("@acme/ui"));
        assert!(!is_whole_package("@acme/ui/Button.svelte"));
        assert!(!is_whole_package("lodash/merge"));
        assert!(!is_whole_package("./Button.svelte"));
        assert!(!is_whole_package("/abs/path.js"));
        assert!(!is_whole_package("@acme"));
        assert!(!is_whole_package("node:fs"));
        assert!(!is_whole_package(""));
    }

    #[test]
    fn test_svelte_field_found_from_nested_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let pkg = dir.path().join("node_modules/@acme/ui");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(
            pkg.join("package.json"),
            r#"{ "name": "@acme/ui", "main": "dist/index.js", "svelte": "src/index.js" }"#,
        )
        .unwrap();
        let nested = dir.path().join("src/components");
        fs::create_dir_all(&nested).unwrap();

        let resolved = resolve_svelte_field("@acme/ui", &nested).unwrap();
        assert_eq!(resolved, pkg.join("src/index.js"));
    }

    #[test]
    fn test_package_without_svelte_field_is_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        let pkg = dir.path().join("node_modules/plain");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("package.json"), r#"{ "name": "plain", "main": "index.js" }"#).unwrap();

        assert!(resolve_svelte_field("plain", dir.path()).is_none());
        assert!(resolve_svelte_field("absent", dir.path()).is_none());
    }
}

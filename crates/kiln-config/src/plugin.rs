//! Plugin chain configuration.
//!
//! The chain is an ordered list of stages. Each stage's hooks run in the order
//! the stages are declared, so a stage that rewrites a module's text sees it
//! before any later stage tries to resolve or parse it.

use serde::{Deserialize, Serialize};

/// Worker preamble/postamble scripts inlined as text by the default chain.
pub const WORKER_SCRIPT_PATTERNS: [&str; 2] = [
    "src/emscripten-component-base/worker/*.preamble.js",
    "src/emscripten-component-base/worker/*.postamble.js",
];

/// One stage of the plugin chain, tagged by `name`.
///
/// ```toml
/// [[plugins]]
/// name = "string"
/// include = ["src/worker/*.preamble.js"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum PluginSpec {
    /// Component compiler for `.svelte` files
    Svelte(SvelteOptions),
    /// Inline matched files as string-literal modules
    String(StringOptions),
    /// Node-style resolution of bare import specifiers
    Resolve(ResolveOptions),
}

impl PluginSpec {
    pub fn stage_name(&self) -> &'static str {
        match self {
            PluginSpec::Svelte(_) => "svelte",
            PluginSpec::String(_) => "string",
            PluginSpec::Resolve(_) => "resolve",
        }
    }

    /// The three-stage chain: compile components, inline worker scripts, resolve.
    pub fn default_chain() -> Vec<PluginSpec> {
        vec![
            PluginSpec::Svelte(SvelteOptions::default()),
            PluginSpec::String(StringOptions::worker_scripts()),
            PluginSpec::Resolve(ResolveOptions::default()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SvelteOptions {
    /// File extensions treated as components
    pub extensions: Vec<String>,

    /// Include component `<style>` text in the compiled module
    pub css: bool,
}

impl Default for SvelteOptions {
    fn default() -> Self {
        Self {
            extensions: vec![".svelte".to_string()],
            css: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StringOptions {
    /// Glob patterns, relative to the project root. Empty matches everything.
    pub include: Vec<String>,

    /// Glob patterns excluded even when included
    pub exclude: Vec<String>,
}

impl StringOptions {
    pub fn new<I, S>(include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: Vec::new(),
        }
    }

    pub fn worker_scripts() -> Self {
        Self::new(WORKER_SCRIPT_PATTERNS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveOptions {
    /// `package.json` fields consulted for a package's entry, in order
    pub main_fields: Vec<String>,

    /// Extensions tried for extensionless files
    pub extensions: Vec<String>,

    /// Prefer the `browser` field and export condition
    pub browser: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            main_fields: vec!["module".to_string(), "main".to_string()],
            extensions: vec![
                ".mjs".to_string(),
                ".js".to_string(),
                ".json".to_string(),
                ".node".to_string(),
            ],
            browser: false,
        }
    }
}

impl ResolveOptions {
    /// Main fields after applying the `browser` preference.
    pub fn effective_main_fields(&self) -> Vec<String> {
        let mut fields = self.main_fields.clone();
        if self.browser && !fields.iter().any(|f| f == "browser") {
            fields.insert(0, "browser".to_string());
        }
        fields
    }

    /// Export conditions used when a package declares `exports`.
    pub fn condition_names(&self) -> Vec<String> {
        let mut conditions = vec![
            "default".to_string(),
            "module".to_string(),
            "import".to_string(),
        ];
        if self.browser {
            conditions.push("browser".to_string());
        }
        conditions
    }
}

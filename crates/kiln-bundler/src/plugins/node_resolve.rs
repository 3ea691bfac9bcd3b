//! Resolution stage: bare specifiers through `node_modules`.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kiln_config::ResolveOptions;
use oxc_resolver::Resolver;
use rolldown_common::ResolvedExternal;
use rolldown_plugin::{
    HookResolveIdArgs, HookResolveIdOutput, HookResolveIdReturn, Plugin, PluginContext,
};

/// Resolves bare import specifiers (`pkg`, `@scope/pkg/sub`) with Node's
/// lookup rules.
///
/// Relative and absolute specifiers are left to Rolldown. Node built-ins
/// (`fs`, `node:path`) stay external. Any other bare specifier that cannot be
/// resolved fails the build, naming the specifier and the importing module.
#[derive(Clone)]
pub struct NodeResolvePlugin {
    resolver: Arc<Resolver>,
    cwd: PathBuf,
}

impl NodeResolvePlugin {
    pub fn new(options: &ResolveOptions, cwd: impl Into<PathBuf>) -> Self {
        let alias_fields = if options.browser {
            vec![vec!["browser".to_string()]]
        } else {
            Vec::new()
        };

        let resolver = Resolver::new(oxc_resolver::ResolveOptions {
            main_fields: options.effective_main_fields(),
            extensions: options.extensions.clone(),
            condition_names: options.condition_names(),
            alias_fields,
            ..Default::default()
        });

        Self {
            resolver: Arc::new(resolver),
            cwd: cwd.into(),
        }
    }

    /// Resolve a bare specifier from an importer (or the working directory).
    ///
    /// Returns `Ok(None)` for specifiers this stage does not handle.
    pub fn resolve(&self, specifier: &str, importer: Option<&str>) -> anyhow::Result<Option<PathBuf>> {
        if !is_bare(specifier) {
            return Ok(None);
        }

        let from_dir = importer
            .and_then(|i| Path::new(i).parent())
            .unwrap_or(&self.cwd);

        match self.resolver.resolve(from_dir, specifier) {
            Ok(resolution) => Ok(Some(resolution.path().to_path_buf())),
            Err(e) => {
                tracing::debug!(specifier, error = ?e, "bare import resolution failed");
                Err(anyhow::anyhow!(
                    "Could not resolve '{}' from '{}'",
                    specifier,
                    importer.unwrap_or("<entry>")
                ))
            }
        }
    }
}

impl fmt::Debug for NodeResolvePlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeResolvePlugin")
            .field("cwd", &self.cwd)
            .finish_non_exhaustive()
    }
}

const NODE_BUILTINS: &[&str] = &[
    "assert", "async_hooks", "buffer", "child_process", "cluster", "console", "constants",
    "crypto", "dgram", "diagnostics_channel", "dns", "domain", "events", "fs", "http", "http2",
    "https", "inspector", "module", "net", "os", "path", "perf_hooks", "process", "punycode",
    "querystring", "readline", "repl", "stream", "string_decoder", "sys", "timers", "tls",
    "trace_events", "tty", "url", "util", "v8", "vm", "wasi", "worker_threads", "zlib",
];

/// Whether `specifier` names a Node built-in module, including subpaths
/// such as `fs/promises` and the `node:` scheme.
pub fn is_node_builtin(specifier: &str) -> bool {
    if specifier.starts_with("node:") {
        return true;
    }
    let root = specifier.split('/').next().unwrap_or(specifier);
    NODE_BUILTINS.contains(&root)
}

/// Not relative, not absolute, not a virtual id.
fn is_bare(specifier: &str) -> bool {
    !(specifier.is_empty()
        || specifier.starts_with('.')
        || specifier.starts_with('/')
        || specifier.starts_with('\0')
        || Path::new(specifier).is_absolute())
}

impl Plugin for NodeResolvePlugin {
    fn name(&self) -> Cow<'static, str> {
        "kiln-resolve".into()
    }

    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        rolldown_plugin::HookUsage::ResolveId
    }

    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs<'_>,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let specifier = args.specifier.to_string();
        let outcome = if is_node_builtin(&specifier) {
            tracing::debug!(specifier = %specifier, "leaving node built-in external");
            Ok(Some(HookResolveIdOutput {
                id: specifier.into(),
                external: Some(ResolvedExternal::Bool(true)),
                ..Default::default()
            }))
        } else {
            let importer = args.importer.map(|s| s.to_string());
            self.resolve(&specifier, importer.as_deref()).map(|resolved| {
                resolved.map(|path| HookResolveIdOutput {
                    id: path.to_string_lossy().into_owned().into(),
                    external: Some(ResolvedExternal::Bool(false)),
                    ..Default::default()
                })
            })
        };

        async move { outcome }
    }
}

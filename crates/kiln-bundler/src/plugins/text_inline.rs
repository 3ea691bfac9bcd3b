//! Text-inlining stage: matched files become `export default "<contents>";`.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use glob::{MatchOptions, Pattern};
use kiln_config::{ConfigError, StringOptions};
use path_clean::PathClean;
use rolldown_common::ModuleType;
use rolldown_plugin::{HookLoadArgs, HookLoadOutput, HookLoadReturn, Plugin, PluginContext};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Loads files matched by include/exclude globs as string-literal modules.
///
/// Patterns are relative to the working directory and are matched against
/// the absolute, normalized module id. An empty include list matches every
/// module.
#[derive(Debug, Clone)]
pub struct TextInlinePlugin {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl TextInlinePlugin {
    pub fn new(options: &StringOptions, cwd: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            include: compile_patterns(&options.include, cwd)?,
            exclude: compile_patterns(&options.exclude, cwd)?,
        })
    }

    /// Whether the module with this id is inlined.
    pub fn matches(&self, id: &str) -> bool {
        let path: PathBuf = Path::new(id).clean();

        let included = self.include.is_empty()
            || self
                .include
                .iter()
                .any(|p| p.matches_path_with(&path, MATCH_OPTIONS));

        included
            && !self
                .exclude
                .iter()
                .any(|p| p.matches_path_with(&path, MATCH_OPTIONS))
    }
}

fn compile_patterns(patterns: &[String], cwd: &Path) -> Result<Vec<Pattern>, ConfigError> {
    let base = Pattern::escape(&cwd.clean().to_string_lossy());

    patterns
        .iter()
        .map(|pattern| {
            let absolute = if Path::new(pattern).is_absolute() {
                pattern.clone()
            } else {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    pattern.trim_start_matches("./")
                )
            };

            Pattern::new(&absolute).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.msg.to_string(),
            })
        })
        .collect()
}

impl Plugin for TextInlinePlugin {
    fn name(&self) -> Cow<'static, str> {
        "kiln-string".into()
    }

    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        rolldown_plugin::HookUsage::Load
    }

    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();
        let matched = self.matches(&id);

        async move {
            if !matched {
                return Ok(None);
            }

            Ok(Some(HookLoadOutput {
                code: inline_file(&id)?.into(),
                module_type: Some(ModuleType::Js),
                ..Default::default()
            }))
        }
    }
}

/// Reads the module's file from disk and wraps it with [`string_module`].
fn inline_file(id: &str) -> anyhow::Result<String> {
    let text = fs::read_to_string(id)
        .with_context(|| format!("Failed to read inlined file: {}", id))?;

    tracing::debug!(id = %id, bytes = text.len(), "inlining file as string");
    Ok(string_module(&text))
}

/// `export default "<text>";` with the text escaped as a JSON string literal.
pub fn string_module(text: &str) -> String {
    format!(
        "export default {};",
        serde_json::Value::String(text.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plugin(include: &[&str], exclude: &[&str]) -> TextInlinePlugin {
        let options = StringOptions {
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
        };
        TextInlinePlugin::new(&options, Path::new("/project")).unwrap()
    }

    #[test]
    fn worker_patterns_match_only_worker_scripts() {
        let plugin = TextInlinePlugin::new(&StringOptions::worker_scripts(), Path::new("/project"))
            .unwrap();

        assert!(plugin.matches("/project/src/emscripten-component-base/worker/main.preamble.js"));
        assert!(plugin.matches("/project/src/emscripten-component-base/worker/main.postamble.js"));
        assert!(!plugin.matches("/project/src/emscripten-component-base/worker/main.js"));
        assert!(!plugin.matches("/project/src/emscripten-component-base/worker/a/b.preamble.js"));
        assert!(!plugin.matches("/elsewhere/src/emscripten-component-base/worker/x.preamble.js"));
    }

    #[test]
    fn ids_are_normalized_before_matching() {
        let plugin = plugin(&["src/*.txt"], &[]);
        assert!(plugin.matches("/project/src/./notes.txt"));
        assert!(plugin.matches("/project/lib/../src/notes.txt"));
    }

    #[test]
    fn empty_include_matches_everything() {
        let plugin = plugin(&[], &[]);
        assert!(plugin.matches("/anything/at/all.js"));
    }

    #[test]
    fn exclude_wins() {
        let plugin = plugin(&["src/**/*.glsl"], &["src/vendor/**"]);
        assert!(plugin.matches("/project/src/shaders/a.glsl"));
        assert!(!plugin.matches("/project/src/vendor/b.glsl"));
    }

    #[test]
    fn invalid_pattern_is_config_error() {
        let options = StringOptions::new(["src/[.txt"]);
        let err = TextInlinePlugin::new(&options, Path::new("/project")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn glob_characters_in_cwd_are_literal() {
        let options = StringOptions::new(["*.txt"]);
        let plugin = TextInlinePlugin::new(&options, Path::new("/work/[draft]")).unwrap();
        assert!(plugin.matches("/work/[draft]/a.txt"));
        assert!(!plugin.matches("/work/d/a.txt"));
    }

    #[test]
    fn matching_ignores_module_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("src/notes.txt");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "export default \"hi\";").unwrap();

        let options = StringOptions::new(["src/*.txt"]);
        let plugin = TextInlinePlugin::new(&options, dir.path()).unwrap();
        let id = file.to_str().unwrap();
        assert!(plugin.matches(id));

        // Already-inlined text is read back verbatim, so loading twice is stable.
        let first = inline_file(id).unwrap();
        assert_eq!(first, r#"export default "export default \"hi\";";"#);
        assert_eq!(inline_file(id).unwrap(), first);

        let missing = dir.path().join("src/missing.txt");
        assert!(plugin.matches(missing.to_str().unwrap()));
        assert!(inline_file(missing.to_str().unwrap()).is_err());
    }

    #[test]
    fn string_module_escapes_text() {
        assert_eq!(
            string_module("self.onmessage = \"hi\";\n"),
            r#"export default "self.onmessage = \"hi\";\n";"#
        );
    }
}

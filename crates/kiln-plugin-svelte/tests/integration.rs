//! Integration tests for kiln-plugin-svelte
//!
//! These drive the plugin's load hook over component files on disk.

use kiln_config::SvelteOptions;
use kiln_plugin_svelte::KilnSveltePlugin;
use rolldown_common::ModuleType;
use rolldown_plugin::{HookLoadArgs, Plugin, PluginContext};
use std::fs;
use tempfile::TempDir;

/// Helper to create a temporary component file for testing
fn create_svelte_file(dir: &TempDir, name: &str, content: &str) -> String {
    let file_path = dir.path().join(name);
    fs::write(&file_path, content).expect("Failed to write test file");
    file_path.to_str().unwrap().to_string()
}

async fn load(plugin: &KilnSveltePlugin, path: &str) -> anyhow::Result<Option<String>> {
    let ctx = PluginContext::new_napi_context();
    let args = HookLoadArgs { id: path };
    let output = plugin.load(&ctx, &args).await?;
    Ok(output.map(|o| o.code.to_string()))
}

#[tokio::test]
async fn test_counter_component() {
    let dir = TempDir::new().unwrap();
    let file_path = create_svelte_file(
        &dir,
        "Counter.svelte",
        r#"
<script>
let count = 0

function increment() {
    count += 1
}
</script>

<button on:click={increment}>
    Count: {count}
</button>

<style>
button {
    background: blue;
}
</style>
"#,
    );

    let plugin = KilnSveltePlugin::default();
    let ctx = PluginContext::new_napi_context();
    let args = HookLoadArgs { id: &file_path };

    let output = plugin.load(&ctx, &args).await.unwrap().unwrap();
    let code = output.code.to_string();

    assert!(code.starts_with("let count = 0"));
    assert!(code.contains("function increment"));
    assert!(code.contains(
        r#"const __kiln_template = "<button on:click={increment}>\n    Count: {count}\n</button>";"#
    ));
    assert!(code.contains(r#"const __kiln_css = "button {\n    background: blue;\n}";"#));
    assert!(code.contains(r#"export default { name: "Counter", template: __kiln_template, css: __kiln_css };"#));
    assert!(matches!(output.module_type, Some(ModuleType::Js)));
}

#[tokio::test]
async fn test_module_context_comes_first() {
    let dir = TempDir::new().unwrap();
    let file_path = create_svelte_file(
        &dir,
        "DataLoader.svelte",
        r#"
<script>
let items = []
</script>

<script context="module">
export const preload = async () => {
    return { data: [] }
}
</script>

{#each items as item}<p>{item.name}</p>{/each}
"#,
    );

    let code = load(&KilnSveltePlugin::default(), &file_path)
        .await
        .unwrap()
        .unwrap();

    let preload = code.find("export const preload").unwrap();
    let items = code.find("let items = []").unwrap();
    assert!(preload < items, "module context should come first:\n{code}");
}

#[tokio::test]
async fn test_typescript_upgrades_module_type() {
    let dir = TempDir::new().unwrap();
    let file_path = create_svelte_file(
        &dir,
        "Typed.svelte",
        r#"<script lang="ts">
export let label: string = 'x'
</script>
<span>{label}</span>"#,
    );

    let plugin = KilnSveltePlugin::default();
    let ctx = PluginContext::new_napi_context();
    let args = HookLoadArgs { id: &file_path };
    let output = plugin.load(&ctx, &args).await.unwrap().unwrap();

    assert!(matches!(output.module_type, Some(ModuleType::Ts)));
    assert!(output.code.contains("export let label: string"));
}

#[tokio::test]
async fn test_markup_only_component() {
    let dir = TempDir::new().unwrap();
    let file_path = create_svelte_file(&dir, "Static.svelte", "<h1>Hello</h1>\n");

    let code = load(&KilnSveltePlugin::default(), &file_path)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        code,
        "const __kiln_template = \"<h1>Hello</h1>\";\n\
         const __kiln_css = \"\";\n\
         export default { name: \"Static\", template: __kiln_template, css: __kiln_css };\n"
    );
}

#[tokio::test]
async fn test_css_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let file_path = create_svelte_file(&dir, "Styled.svelte", "<p>x</p><style>p { margin: 0 }</style>");

    let plugin = KilnSveltePlugin::new(
        SvelteOptions {
            css: false,
            ..Default::default()
        },
        dir.path(),
    );
    let code = load(&plugin, &file_path).await.unwrap().unwrap();

    assert!(code.contains("const __kiln_css = \"\";"));
    assert!(!code.contains("margin"));
}

#[tokio::test]
async fn test_non_svelte_file() {
    let dir = TempDir::new().unwrap();
    let file_path = create_svelte_file(&dir, "index.js", "export default 1;");

    let result = load(&KilnSveltePlugin::default(), &file_path).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_custom_extension() {
    let dir = TempDir::new().unwrap();
    let file_path = create_svelte_file(&dir, "Post.svx", "<article/>");

    let plugin = KilnSveltePlugin::new(
        SvelteOptions {
            extensions: vec![".svx".into()],
            css: true,
        },
        dir.path(),
    );
    let code = load(&plugin, &file_path).await.unwrap().unwrap();
    assert!(code.contains("name: \"Post\""));

    let other = create_svelte_file(&dir, "Other.svelte", "<p/>");
    assert!(load(&plugin, &other).await.unwrap().is_none());
}

#[tokio::test]
async fn test_malformed_svelte_unclosed_tag() {
    let dir = TempDir::new().unwrap();
    let file_path = create_svelte_file(&dir, "Broken.svelte", "<script>\nlet count = 0\n");

    let err = load(&KilnSveltePlugin::default(), &file_path)
        .await
        .unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("Failed to parse Svelte file"));
    assert!(message.contains("Unclosed <script> tag"));
}

#[tokio::test]
async fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("Gone.svelte");

    let err = load(&KilnSveltePlugin::default(), missing.to_str().unwrap())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read Svelte file"));
}

//! Plugin stages and the ordered chain they run in.
//!
//! - [`KilnSveltePlugin`]: component compiler (from `kiln-plugin-svelte`)
//! - [`TextInlinePlugin`]: files as string-literal modules
//! - [`NodeResolvePlugin`]: bare specifiers through `node_modules`

pub mod chain;
pub mod node_resolve;
pub mod text_inline;

pub use chain::PluginChain;
pub use kiln_plugin_svelte::KilnSveltePlugin;
pub use node_resolve::NodeResolvePlugin;
pub use text_inline::TextInlinePlugin;

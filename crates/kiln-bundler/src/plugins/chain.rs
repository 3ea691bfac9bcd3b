//! The ordered plugin chain.
//!
//! Rolldown runs each hook over the plugins in the order they are given, and
//! for `resolve_id`/`load` the first plugin to return a result wins. The chain
//! therefore keeps stages exactly in declared order.

use std::path::Path;
use std::sync::Arc;

use kiln_config::PluginSpec;
use kiln_plugin_svelte::KilnSveltePlugin;
use rolldown_plugin::__inner::SharedPluginable;

use crate::Result;
use crate::plugins::{NodeResolvePlugin, TextInlinePlugin};

/// Plugin instances in application order, each tagged with its stage name.
pub struct PluginChain {
    plugins: Vec<(&'static str, SharedPluginable)>,
}

impl PluginChain {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Instantiate every stage of a configured chain for one build pass.
    pub fn from_specs(specs: &[PluginSpec], cwd: &Path) -> Result<Self> {
        let mut chain = Self::new();

        for spec in specs {
            let plugin: SharedPluginable = match spec {
                PluginSpec::Svelte(options) => Arc::new(KilnSveltePlugin::new(options.clone(), cwd)),
                PluginSpec::String(options) => Arc::new(TextInlinePlugin::new(options, cwd)?),
                PluginSpec::Resolve(options) => Arc::new(NodeResolvePlugin::new(options, cwd)),
            };
            chain.push(spec.stage_name(), plugin);
        }

        Ok(chain)
    }

    /// Append a stage after all existing ones.
    pub fn push(&mut self, stage: &'static str, plugin: SharedPluginable) {
        self.plugins.push((stage, plugin));
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|(stage, _)| *stage).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn into_rolldown_plugins(self) -> Vec<SharedPluginable> {
        self.plugins.into_iter().map(|(_, plugin)| plugin).collect()
    }
}

impl Default for PluginChain {
    fn default() -> Self {
        Self::new()
    }
}

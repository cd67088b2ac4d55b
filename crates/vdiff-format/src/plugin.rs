use std::fmt;
use std::sync::Arc;

use vdiff_types::Value;

use crate::asymmetric::AsymmetricMatcherPlugin;
use crate::error::SerializeResult;
use crate::printer::Printer;

/// A custom printer for a family of values.
///
/// Plugins are consulted in registration order before the built-in rules,
/// for the top-level value and for every nested value.
pub trait Plugin: fmt::Debug + Send + Sync {
    /// Name used in errors and logs.
    fn name(&self) -> &str;

    /// Returns `true` if this plugin prints `value`.
    fn test(&self, value: &Value) -> bool;

    /// Print `value`. Nested values go back through `printer` so that
    /// depth limits, hooks, and other plugins still apply.
    fn print(
        &self,
        value: &Value,
        printer: &Printer<'_>,
        indentation: &str,
        depth: usize,
    ) -> SerializeResult<String>;
}

/// An ordered, cheaply clonable set of plugins.
#[derive(Clone, Debug, Default)]
pub struct PluginSet {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginSet {
    /// An empty plugin set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The plugins the diff engine registers by default.
    pub fn with_defaults() -> Self {
        Self::new().with(AsymmetricMatcherPlugin)
    }

    /// Register a plugin, builder style.
    pub fn with(mut self, plugin: impl Plugin + 'static) -> Self {
        self.register(plugin);
        self
    }

    pub fn register(&mut self, plugin: impl Plugin + 'static) {
        self.plugins.push(Arc::new(plugin));
    }

    /// The first plugin that claims `value`.
    pub fn find(&self, value: &Value) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.test(value))
            .map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Names of the registered plugins, in order.
    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }
}

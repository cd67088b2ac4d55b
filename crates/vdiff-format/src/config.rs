use crate::plugin::PluginSet;

/// Spaces per nesting level in the default display form.
pub const DEFAULT_INDENT: usize = 2;

/// Depth bound used by the fallback (hook-free) serialization.
pub const FALLBACK_MAX_DEPTH: usize = 10;

/// Settings for a single serialization call.
#[derive(Clone, Debug)]
pub struct SerializeConfig {
    /// Whether custom serialization hooks on objects are invoked.
    pub call_hooks: bool,
    /// Containers nested deeper than this print as `[Name]`. `None` is unbounded.
    pub max_depth: Option<usize>,
    /// Spaces per nesting level. `0` keeps the line structure but drops indentation.
    pub indent: usize,
    /// Plugins consulted before the built-in printing rules.
    pub plugins: PluginSet,
}

impl Default for SerializeConfig {
    fn default() -> Self {
        Self {
            call_hooks: true,
            max_depth: None,
            indent: DEFAULT_INDENT,
            plugins: PluginSet::new(),
        }
    }
}

impl SerializeConfig {
    /// The fallback configuration: hooks disabled, depth bounded.
    ///
    /// Used to expose differences that a custom hook prints identically.
    pub fn fallback() -> Self {
        Self {
            call_hooks: false,
            max_depth: Some(FALLBACK_MAX_DEPTH),
            ..Default::default()
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_plugins(mut self, plugins: PluginSet) -> Self {
        self.plugins = plugins;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// One level of indentation.
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent)
    }
}

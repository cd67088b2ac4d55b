//! Top-level comparison: classify both operands and pick a diff path.

use std::ptr;
use std::sync::Arc;

use tracing::{debug, warn};

use vdiff_format::{PluginSet, PrettyFormat, SerializeConfig, SerializeResult, Serializer};
use vdiff_types::{Category, Classification, Value};

use crate::formatter::Role;
use crate::lines::{diff_lines_display, diff_lines_unified};
use crate::normalize::sort_collection;
use crate::options::{DiffOptions, PartialDiffOptions};
use crate::render::render;

/// Reported when both operands print identically.
pub const NO_DIFF_MESSAGE: &str = "Compared values have no visual difference.";

/// Prefixed to a diff that only shows up without custom serialization hooks.
pub const SIMILAR_MESSAGE: &str = "Compared values serialize to the same structure.\n\
     Printing internal object structure without calling custom serialization hooks instead.";

/// The outcome of comparing two values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// No meaningful diff can be produced.
    Undecidable,
    /// The operands are the same value or print identically.
    Identical,
    /// The operands belong to different categories.
    TypeMismatch {
        expected: Category,
        received: Category,
    },
    /// A rendered diff. `similar_not_equal` is set when the difference only
    /// appeared once custom serialization hooks were turned off.
    Diff {
        similar_not_equal: bool,
        body: String,
    },
}

impl Comparison {
    /// The user-facing text, or `None` for [`Comparison::Undecidable`].
    pub fn render(&self, options: &DiffOptions) -> Option<String> {
        let f = &options.formatter;
        match self {
            Self::Undecidable => None,
            Self::Identical => Some(f.decorate(NO_DIFF_MESSAGE, Role::Neutral)),
            Self::TypeMismatch { expected, received } => Some(format!(
                "  Comparing two different types of values. Expected {} but received {}.",
                f.decorate(expected.as_str(), Role::Removal),
                f.decorate(received.as_str(), Role::Addition)
            )),
            Self::Diff {
                similar_not_equal: true,
                body,
            } => Some(format!(
                "{}\n\n{body}",
                f.decorate(SIMILAR_MESSAGE, Role::Neutral)
            )),
            Self::Diff { body, .. } => Some(body.clone()),
        }
    }

    pub fn is_identical(&self) -> bool {
        matches!(self, Self::Identical)
    }
}

/// Compares values using an injected [`Serializer`].
#[derive(Clone)]
pub struct Comparator {
    serializer: Arc<dyn Serializer>,
    plugins: PluginSet,
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new(Arc::new(PrettyFormat))
    }
}

impl std::fmt::Debug for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Comparator")
            .field("plugins", &self.plugins.names())
            .finish_non_exhaustive()
    }
}

impl Comparator {
    /// A comparator with the default plugins.
    pub fn new(serializer: Arc<dyn Serializer>) -> Self {
        Self {
            serializer,
            plugins: PluginSet::with_defaults(),
        }
    }

    /// Replace the plugins handed to the serializer.
    pub fn with_plugins(mut self, plugins: PluginSet) -> Self {
        self.plugins = plugins;
        self
    }

    /// Compare `a` (expected) with `b` (received) and render the result.
    pub fn compare(
        &self,
        a: &Value,
        b: &Value,
        overrides: Option<&PartialDiffOptions>,
    ) -> Option<String> {
        let options = DiffOptions::normalize(overrides);
        self.evaluate(a, b, &options).render(&options)
    }

    /// Compare `a` with `b` without producing the final message.
    pub fn evaluate(&self, a: &Value, b: &Value, options: &DiffOptions) -> Comparison {
        if ptr::eq(a, b) || a.same_value(b) {
            return Comparison::Identical;
        }

        let (expected, omit_difference) = match a.classify() {
            Classification::Concrete(category) => (category, false),
            Classification::Matcher { expected: None } => {
                debug!("matcher without expected category; nothing to diff");
                return Comparison::Undecidable;
            }
            Classification::Matcher {
                expected: Some(category),
            } => (category, category == Category::String),
        };

        let received = b.category();
        if expected != received {
            debug!(%expected, %received, "type mismatch");
            return Comparison::TypeMismatch { expected, received };
        }
        if omit_difference {
            return Comparison::Undecidable;
        }

        match a.category() {
            Category::String => {
                let (Some(a), Some(b)) = (a.as_str(), b.as_str()) else {
                    return Comparison::Undecidable;
                };
                diff_text(diff_lines_unified(a, b, options))
            }
            Category::Number | Category::Boolean => {
                let config = self.config(SerializeConfig::default());
                match (
                    self.serializer.serialize(a, &config),
                    self.serializer.serialize(b, &config),
                ) {
                    (Ok(a), Ok(b)) if a == b => Comparison::Identical,
                    (Ok(a), Ok(b)) => diff_text(diff_lines_unified(&a, &b, options)),
                    (Err(err), _) | (_, Err(err)) => {
                        warn!(error = %err, "failed to print primitive");
                        Comparison::Undecidable
                    }
                }
            }
            Category::Map | Category::Set => {
                self.compare_objects(&sort_collection(a), &sort_collection(b), options)
            }
            _ => self.compare_objects(a, b, options),
        }
    }

    /// Diff the hook-enabled forms, retrying without hooks when they fail or
    /// print identically.
    fn compare_objects(&self, a: &Value, b: &Value, options: &DiffOptions) -> Comparison {
        let hooked = self.diff_serialized(a, b, &self.config(SerializeConfig::default()), options);
        let failed = match hooked {
            Ok(Some(body)) => {
                return Comparison::Diff {
                    similar_not_equal: false,
                    body,
                }
            }
            Ok(None) => {
                debug!("values print identically with hooks; retrying without hooks");
                false
            }
            Err(err) => {
                warn!(error = %err, "serialization failed; retrying without hooks");
                true
            }
        };

        match self.diff_serialized(a, b, &self.config(SerializeConfig::fallback()), options) {
            Ok(Some(body)) => {
                if !failed {
                    debug!("difference only visible without hooks");
                }
                Comparison::Diff {
                    similar_not_equal: !failed,
                    body,
                }
            }
            Ok(None) => Comparison::Identical,
            Err(err) => {
                warn!(error = %err, "fallback serialization failed");
                Comparison::Undecidable
            }
        }
    }

    /// Serialize both values and diff them, or `None` if they print the same.
    ///
    /// Lines are matched on the unindented forms so that a change in nesting
    /// depth does not mark every line inside it as changed.
    fn diff_serialized(
        &self,
        a: &Value,
        b: &Value,
        config: &SerializeConfig,
        options: &DiffOptions,
    ) -> SerializeResult<Option<String>> {
        let compact = config.clone().with_indent(0);
        let a_compare = self.serializer.serialize(a, &compact)?;
        let b_compare = self.serializer.serialize(b, &compact)?;
        if a_compare == b_compare {
            return Ok(None);
        }

        let a_display = self.serializer.serialize(a, config)?;
        let b_display = self.serializer.serialize(b, config)?;
        let diff = diff_lines_display(&a_display, &b_display, &a_compare, &b_compare, options);
        Ok(Some(render(&diff.script, options)))
    }

    fn config(&self, base: SerializeConfig) -> SerializeConfig {
        base.with_plugins(self.plugins.clone())
    }
}

fn diff_text(body: String) -> Comparison {
    Comparison::Diff {
        similar_not_equal: false,
        body,
    }
}

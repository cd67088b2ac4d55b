//! The default pretty-printer.
//!
//! Output rules, per value:
//!
//! - primitives print as literals (`"text"`, `1.5`, `-0`, `NaN`, `12n`);
//! - containers print as `Array [`, `Map {`, `Set {`, or `Name {`, one item
//!   per line, each followed by a comma;
//! - object keys are sorted;
//! - a container deeper than `max_depth` prints as `[Name]`.
//!
//! The line structure is identical for every `indent`, which lets the diff
//! engine compare the indent-0 form and display the indented one.

use tracing::trace;

use vdiff_types::{Object, Value};

use crate::config::SerializeConfig;
use crate::error::{SerializeError, SerializeResult};
use crate::traits::Serializer;

/// The default [`Serializer`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PrettyFormat;

impl Serializer for PrettyFormat {
    fn serialize(&self, value: &Value, config: &SerializeConfig) -> SerializeResult<String> {
        trace!(
            call_hooks = config.call_hooks,
            indent = config.indent,
            "pretty-printing value"
        );
        Printer::new(config).print(value, "", 0)
    }
}

/// Recursive printing state handed to plugins.
#[derive(Clone, Copy, Debug)]
pub struct Printer<'a> {
    config: &'a SerializeConfig,
}

impl<'a> Printer<'a> {
    pub fn new(config: &'a SerializeConfig) -> Self {
        Self { config }
    }

    /// Print a value nested at `depth` whose first line starts after
    /// `indentation`.
    pub fn print(&self, value: &Value, indentation: &str, depth: usize) -> SerializeResult<String> {
        self.print_value(value, indentation, depth, false)
    }

    /// Returns `true` when a container at `depth` must be elided.
    pub fn hit_max_depth(&self, depth: usize) -> bool {
        self.config.max_depth.is_some_and(|max| depth > max)
    }

    /// Print `[ items ]` for a container already at `depth`.
    pub fn print_list(&self, items: &[Value], indentation: &str, depth: usize) -> SerializeResult<String> {
        let body = self.print_items(items, indentation, |item, next| {
            self.print(item, next, depth)
        })?;
        Ok(format!("[{body}]"))
    }

    /// Print `{ "key": value }` with sorted keys for an object already at `depth`.
    pub fn print_fields(&self, object: &Object, indentation: &str, depth: usize) -> SerializeResult<String> {
        let mut fields: Vec<&(String, Value)> = object.fields.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        let body = self.print_items(&fields, indentation, |(key, value), next| {
            Ok(format!("\"{}\": {}", escape(key), self.print(value, next, depth)?))
        })?;
        Ok(format!("{{{body}}}"))
    }

    fn print_value(
        &self,
        value: &Value,
        indentation: &str,
        depth: usize,
        hook_called: bool,
    ) -> SerializeResult<String> {
        if let Some(plugin) = self.config.plugins.find(value) {
            return plugin.print(value, self, indentation, depth);
        }

        let printed = match value {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::BigInt(n) => format!("{n}n"),
            Value::String(s) => format!("\"{}\"", escape(s)),
            Value::Symbol(description) => format!("Symbol({description})"),
            Value::Function(name) => {
                format!("[Function {}]", name.as_deref().unwrap_or("anonymous"))
            }
            Value::RegExp { source, flags } => format!("/{source}/{flags}"),
            Value::Date(iso) => iso.clone(),
            Value::Array(items) => {
                let depth = depth + 1;
                if self.hit_max_depth(depth) {
                    "[Array]".to_string()
                } else {
                    format!("Array {}", self.print_list(items, indentation, depth)?)
                }
            }
            Value::Map(entries) => {
                let depth = depth + 1;
                if self.hit_max_depth(depth) {
                    "[Map]".to_string()
                } else {
                    let body = self.print_items(entries, indentation, |(k, v), next| {
                        Ok(format!(
                            "{} => {}",
                            self.print(k, next, depth)?,
                            self.print(v, next, depth)?
                        ))
                    })?;
                    format!("Map {{{body}}}")
                }
            }
            Value::Set(items) => {
                let depth = depth + 1;
                if self.hit_max_depth(depth) {
                    "[Set]".to_string()
                } else {
                    let body = self.print_items(items, indentation, |item, next| {
                        self.print(item, next, depth)
                    })?;
                    format!("Set {{{body}}}")
                }
            }
            Value::Object(object) => self.print_object(object, indentation, depth, hook_called)?,
            // Without the matcher plugin a matcher is just an object.
            Value::Matcher(matcher) => {
                let mut object = Object::named(matcher.name());
                if let Some(sample) = matcher.sample() {
                    object.fields.push(("sample".to_string(), sample.clone()));
                }
                self.print_object(&object, indentation, depth, true)?
            }
        };
        Ok(printed)
    }

    fn print_object(
        &self,
        object: &Object,
        indentation: &str,
        depth: usize,
        hook_called: bool,
    ) -> SerializeResult<String> {
        let depth = depth + 1;
        let hit_max_depth = self.hit_max_depth(depth);

        if self.config.call_hooks && !hit_max_depth && !hook_called {
            if let Some(hook) = object.hook() {
                let replacement = hook(object).map_err(|source| SerializeError::HookFailed {
                    constructor: object.constructor_name().to_string(),
                    source,
                })?;
                return self.print_value(&replacement, indentation, depth, true);
            }
        }

        if hit_max_depth {
            return Ok(format!("[{}]", object.constructor_name()));
        }
        Ok(format!(
            "{} {}",
            object.constructor_name(),
            self.print_fields(object, indentation, depth)?
        ))
    }

    /// Items one per line, each followed by a comma, closed at `indentation`.
    fn print_items<T>(
        &self,
        items: &[T],
        indentation: &str,
        mut print_item: impl FnMut(&T, &str) -> SerializeResult<String>,
    ) -> SerializeResult<String> {
        if items.is_empty() {
            return Ok(String::new());
        }
        let next = format!("{indentation}{}", self.config.indent_unit());
        let mut out = String::from("\n");
        for item in items {
            out.push_str(&next);
            out.push_str(&print_item(item, &next)?);
            out.push_str(",\n");
        }
        out.push_str(indentation);
        Ok(out)
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n < 0.0 { "-" } else { "" };
        format!("{sign}Infinity")
    } else if n != 0.0 && (n.abs() >= 1e21 || n.abs() < 1e-6) {
        // Exponent notation with an explicit sign, as in `1e+21`.
        let formatted = format!("{n:e}");
        match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        }
    } else {
        n.to_string()
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

use vdiff_types::Value;

use crate::error::{SerializeError, SerializeResult};
use crate::plugin::Plugin;
use crate::printer::Printer;

/// Prints asymmetric matchers as `Name` or `Name sample`.
///
/// Container samples print without their own constructor prefix:
/// `ArrayContaining [...]`, `ObjectContaining {...}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsymmetricMatcherPlugin;

impl Plugin for AsymmetricMatcherPlugin {
    fn name(&self) -> &str {
        "AsymmetricMatcher"
    }

    fn test(&self, value: &Value) -> bool {
        value.is_matcher()
    }

    fn print(
        &self,
        value: &Value,
        printer: &Printer<'_>,
        indentation: &str,
        depth: usize,
    ) -> SerializeResult<String> {
        let Value::Matcher(matcher) = value else {
            return Err(SerializeError::plugin(self.name(), "not an asymmetric matcher"));
        };
        let name = matcher.name();
        match matcher.sample() {
            None => Ok(name.to_string()),
            Some(Value::Array(items)) => {
                let depth = depth + 1;
                if printer.hit_max_depth(depth) {
                    return Ok(format!("[{name}]"));
                }
                Ok(format!("{name} {}", printer.print_list(items, indentation, depth)?))
            }
            Some(Value::Object(object)) => {
                let depth = depth + 1;
                if printer.hit_max_depth(depth) {
                    return Ok(format!("[{name}]"));
                }
                Ok(format!(
                    "{name} {}",
                    printer.print_fields(object, indentation, depth)?
                ))
            }
            Some(sample) => Ok(format!("{name} {}", printer.print(sample, indentation, depth)?)),
        }
    }
}

use vdiff_types::Value;

use crate::config::SerializeConfig;
use crate::error::SerializeResult;

/// Value-to-text serializer.
///
/// All implementations must satisfy these invariants:
/// - Output is a pure function of `(value, config)`. The diff engine calls
///   the serializer more than once per comparison and diffs the results.
/// - With `config.call_hooks == false` no custom hook is invoked, so the
///   call cannot fail because of one.
/// - Lines are separated by `\n` and the line structure does not depend on
///   `config.indent`, only the leading whitespace does.
pub trait Serializer: Send + Sync {
    /// Render `value` as text under `config`.
    fn serialize(&self, value: &Value, config: &SerializeConfig) -> SerializeResult<String>;
}

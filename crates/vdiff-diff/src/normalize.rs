//! Deterministic ordering for unordered collections.
//!
//! Maps and sets keep insertion order, which is not part of their meaning.
//! Both operands are sorted by [`Value::total_cmp`] before serialization so
//! that ordering never shows up as a difference. Only the top-level
//! collection is sorted; nested maps and sets print as they are.

use vdiff_types::Value;

/// Entries ordered by key, then value.
pub fn sort_map(entries: &[(Value, Value)]) -> Vec<(Value, Value)> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|(ka, va), (kb, vb)| ka.total_cmp(kb).then_with(|| va.total_cmp(vb)));
    sorted
}

/// Elements in ascending order.
pub fn sort_set(items: &[Value]) -> Vec<Value> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// A copy of `value` with a top-level map or set sorted.
pub fn sort_collection(value: &Value) -> Value {
    match value {
        Value::Map(entries) => Value::Map(sort_map(entries)),
        Value::Set(items) => Value::Set(sort_set(items)),
        other => other.clone(),
    }
}

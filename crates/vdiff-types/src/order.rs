//! A total order over values.
//!
//! Ordering: category rank first, then the natural order within the
//! category. Composites compare lexicographically by their elements, so
//! the order is total and independent of insertion order of anything but
//! the compared sequences themselves.

use std::cmp::Ordering;

use crate::value::{Object, Value};

impl Value {
    /// Compare two values under the total order described in this module.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        rank(self).cmp(&rank(other)).then_with(|| match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::BigInt(a), Value::BigInt(b)) => a.cmp(b),
            (Value::String(a), Value::String(b))
            | (Value::Symbol(a), Value::Symbol(b))
            | (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) | (Value::Set(a), Value::Set(b)) => {
                cmp_seq(a, b, |x, y| x.total_cmp(y))
            }
            (Value::Map(a), Value::Map(b)) => cmp_seq(a, b, |(ka, va), (kb, vb)| {
                ka.total_cmp(kb).then_with(|| va.total_cmp(vb))
            }),
            (Value::Object(a), Value::Object(b)) => cmp_objects(a, b),
            (Value::Function(a), Value::Function(b)) => a.cmp(b),
            (
                Value::RegExp { source, flags },
                Value::RegExp {
                    source: other_source,
                    flags: other_flags,
                },
            ) => source.cmp(other_source).then_with(|| flags.cmp(other_flags)),
            (Value::Matcher(a), Value::Matcher(b)) => {
                a.name().cmp(b.name()).then_with(|| match (a.sample(), b.sample()) {
                    (Some(x), Some(y)) => x.total_cmp(y),
                    (x, y) => x.is_some().cmp(&y.is_some()),
                })
            }
            _ => Ordering::Equal,
        })
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Undefined => 0,
        Value::Null => 1,
        Value::Bool(_) => 2,
        Value::Number(_) => 3,
        Value::BigInt(_) => 4,
        Value::String(_) => 5,
        Value::Symbol(_) => 6,
        Value::Date(_) => 7,
        Value::RegExp { .. } => 8,
        Value::Function(_) => 9,
        Value::Array(_) => 10,
        Value::Map(_) => 11,
        Value::Set(_) => 12,
        Value::Object(_) => 13,
        Value::Matcher(_) => 14,
    }
}

fn cmp_seq<T>(a: &[T], b: &[T], mut cmp: impl FnMut(&T, &T) -> Ordering) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match cmp(x, y) {
            Ordering::Equal => continue,
            non_eq => return non_eq,
        }
    }
    a.len().cmp(&b.len())
}

fn cmp_objects(a: &Object, b: &Object) -> Ordering {
    a.constructor_name()
        .cmp(b.constructor_name())
        .then_with(|| {
            cmp_seq(&a.fields, &b.fields, |(ka, va), (kb, vb)| {
                ka.cmp(kb).then_with(|| va.total_cmp(vb))
            })
        })
}

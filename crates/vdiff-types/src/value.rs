use std::fmt;
use std::sync::Arc;

use crate::category::{Category, Classification};
use crate::error::HookError;
use crate::matcher::Matcher;

/// A custom serialization hook attached to an [`Object`].
///
/// When the serializer runs with hooks enabled it prints the value returned
/// by the hook instead of the object's own fields. A hook may fail, in which
/// case callers fall back to hook-free serialization.
pub type SerializeHook = Arc<dyn Fn(&Object) -> Result<Value, HookError> + Send + Sync>;

/// A runtime value.
///
/// `Map` and `Set` keep their entries in insertion order; comparison sorts
/// them first so that ordering never shows up as a difference.
#[derive(Clone, Debug)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    /// A symbol with its description.
    Symbol(String),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Set(Vec<Value>),
    Object(Object),
    /// A function, by name (`None` for anonymous functions).
    Function(Option<String>),
    RegExp {
        source: String,
        flags: String,
    },
    /// A date in its ISO-8601 text form.
    Date(String),
    Matcher(Matcher),
}

impl Value {
    /// Shorthand for a string value.
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// The category of this value. Matchers report `object`, which is what
    /// they are when they appear on the received side of a comparison.
    pub fn category(&self) -> Category {
        match self {
            Self::Undefined => Category::Undefined,
            Self::Null => Category::Null,
            Self::Bool(_) => Category::Boolean,
            Self::Number(_) => Category::Number,
            Self::BigInt(_) => Category::BigInt,
            Self::String(_) => Category::String,
            Self::Symbol(_) => Category::Symbol,
            Self::Array(_) => Category::Array,
            Self::Map(_) => Category::Map,
            Self::Set(_) => Category::Set,
            Self::Object(_) | Self::Matcher(_) => Category::Object,
            Self::Function(_) => Category::Function,
            Self::RegExp { .. } => Category::RegExp,
            Self::Date(_) => Category::Date,
        }
    }

    /// Classify this value for comparison dispatch.
    pub fn classify(&self) -> Classification {
        match self {
            Self::Matcher(m) => Classification::Matcher {
                expected: m.expected_category(),
            },
            other => Classification::Concrete(other.category()),
        }
    }

    /// Same-value equality for primitives.
    ///
    /// `NaN` is the same value as `NaN`, while `0` and `-0` differ.
    /// Composite values are never the same value; callers check reference
    /// identity separately.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            _ => false,
        }
    }

    /// The string slice, for string values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_matcher(&self) -> bool {
        matches!(self, Self::Matcher(_))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<Matcher> for Value {
    fn from(matcher: Matcher) -> Self {
        Self::Matcher(matcher)
    }
}

/// A composite value with named fields.
#[derive(Clone, Default)]
pub struct Object {
    /// Constructor name; `None` prints as `Object`.
    pub constructor: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<(String, Value)>,
    hook: Option<SerializeHook>,
}

impl Object {
    /// Create an empty plain object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty object with a constructor name.
    pub fn named(constructor: impl Into<String>) -> Self {
        Self {
            constructor: Some(constructor.into()),
            ..Self::default()
        }
    }

    /// Add a field, builder style.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Attach a custom serialization hook.
    pub fn with_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Object) -> Result<Value, HookError> + Send + Sync + 'static,
    {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub fn hook(&self) -> Option<&SerializeHook> {
        self.hook.as_ref()
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The name printed before the braces.
    pub fn constructor_name(&self) -> &str {
        self.constructor.as_deref().unwrap_or("Object")
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("constructor", &self.constructor)
            .field("fields", &self.fields)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_same_value_as_nan() {
        assert!(Value::Number(f64::NAN).same_value(&Value::Number(f64::NAN)));
    }

    #[test]
    fn signed_zeros_differ() {
        assert!(!Value::Number(0.0).same_value(&Value::Number(-0.0)));
        assert!(Value::Number(-0.0).same_value(&Value::Number(-0.0)));
    }

    #[test]
    fn composites_are_never_same_value() {
        let a = Value::Array(vec![]);
        assert!(!a.same_value(&a.clone()));
    }

    #[test]
    fn matcher_is_object_on_received_side() {
        let m = Value::Matcher(Matcher::any(Category::Number));
        assert_eq!(m.category(), Category::Object);
        assert_eq!(
            m.classify(),
            Classification::Matcher {
                expected: Some(Category::Number)
            }
        );
    }

    #[test]
    fn object_builder_and_lookup() {
        let obj = Object::named("Point").with_field("x", 1).with_field("y", 2);
        assert_eq!(obj.constructor_name(), "Point");
        assert!(matches!(obj.get("y"), Some(Value::Number(n)) if *n == 2.0));
        assert!(obj.get("z").is_none());
        assert!(obj.hook().is_none());
    }

    #[test]
    fn hook_is_callable() {
        let obj = Object::new()
            .with_field("secret", "x")
            .with_hook(|_| Ok(Value::string("redacted")));
        let hook = obj.hook().cloned().unwrap();
        assert!(matches!(hook(&obj), Ok(Value::String(s)) if s == "redacted"));
        assert!(format!("{obj:?}").contains("hook: true"));
    }
}

use crate::category::Category;
use crate::value::{Object, Value};

/// An asymmetric matcher: a predicate-based expectation rather than a
/// concrete value.
///
/// Matchers are printed as `<name>` or `<name> <sample>`. A matcher that
/// cannot name the category it expects makes a comparison undecidable.
#[derive(Clone, Debug)]
pub struct Matcher {
    name: String,
    sample: Option<Box<Value>>,
    expected: Option<Category>,
}

impl Matcher {
    /// A matcher with no sample and no expected category.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sample: None,
            expected: None,
        }
    }

    pub fn with_sample(mut self, sample: impl Into<Value>) -> Self {
        self.sample = Some(Box::new(sample.into()));
        self
    }

    pub fn with_expected(mut self, category: Category) -> Self {
        self.expected = Some(category);
        self
    }

    /// Matches anything of the given category: `Any<Number>`.
    pub fn any(category: Category) -> Self {
        Self::new(format!("Any<{}>", category.constructor_name())).with_expected(category)
    }

    /// Matches anything except null and undefined. Has no expected category.
    pub fn anything() -> Self {
        Self::new("Anything")
    }

    pub fn string_containing(needle: impl Into<String>) -> Self {
        Self::new("StringContaining")
            .with_sample(Value::String(needle.into()))
            .with_expected(Category::String)
    }

    pub fn string_matching(pattern: impl Into<String>) -> Self {
        Self::new("StringMatching")
            .with_sample(Value::RegExp {
                source: pattern.into(),
                flags: String::new(),
            })
            .with_expected(Category::String)
    }

    pub fn object_containing(subset: Object) -> Self {
        Self::new("ObjectContaining")
            .with_sample(subset)
            .with_expected(Category::Object)
    }

    pub fn array_containing(items: Vec<Value>) -> Self {
        Self::new("ArrayContaining")
            .with_sample(Value::Array(items))
            .with_expected(Category::Array)
    }

    pub fn close_to(target: f64) -> Self {
        Self::new("NumberCloseTo")
            .with_sample(target)
            .with_expected(Category::Number)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sample(&self) -> Option<&Value> {
        self.sample.as_deref()
    }

    /// The category this matcher expects, if derivable.
    pub fn expected_category(&self) -> Option<Category> {
        self.expected
    }
}

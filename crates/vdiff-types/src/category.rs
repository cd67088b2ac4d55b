use std::fmt;

/// The category of a runtime value.
///
/// Categories drive comparison dispatch: two operands are only diffed
/// structurally when their categories agree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Undefined,
    Null,
    Boolean,
    Number,
    BigInt,
    String,
    Symbol,
    Array,
    Map,
    Set,
    Object,
    Function,
    RegExp,
    Date,
}

impl Category {
    /// Lower-case name used in diagnostic messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::BigInt => "bigint",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::Array => "array",
            Self::Map => "map",
            Self::Set => "set",
            Self::Object => "object",
            Self::Function => "function",
            Self::RegExp => "regexp",
            Self::Date => "date",
        }
    }

    /// Constructor-style name, as printed by `Any<...>` matchers.
    pub fn constructor_name(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::BigInt => "BigInt",
            Self::String => "String",
            Self::Symbol => "Symbol",
            Self::Array => "Array",
            Self::Map => "Map",
            Self::Set => "Set",
            Self::Function => "Function",
            Self::RegExp => "RegExp",
            Self::Date => "Date",
            Self::Undefined | Self::Null | Self::Object => "Object",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an operand takes part in a comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// A concrete value of the given category.
    Concrete(Category),
    /// An asymmetric matcher. `expected` is the category it expects to
    /// match, when the matcher can tell.
    Matcher { expected: Option<Category> },
}

impl Classification {
    /// The category used for the type check, if one can be derived.
    pub fn expected_category(&self) -> Option<Category> {
        match self {
            Self::Concrete(category) => Some(*category),
            Self::Matcher { expected } => *expected,
        }
    }

    /// Returns `true` for matcher operands.
    pub fn is_matcher(&self) -> bool {
        matches!(self, Self::Matcher { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_lower_case() {
        assert_eq!(Category::Number.as_str(), "number");
        assert_eq!(Category::RegExp.to_string(), "regexp");
        assert_eq!(Category::BigInt.to_string(), "bigint");
    }

    #[test]
    fn constructor_names() {
        assert_eq!(Category::Number.constructor_name(), "Number");
        assert_eq!(Category::Null.constructor_name(), "Object");
    }

    #[test]
    fn classification_expected_category() {
        let concrete = Classification::Concrete(Category::Set);
        assert_eq!(concrete.expected_category(), Some(Category::Set));
        assert!(!concrete.is_matcher());

        let opaque = Classification::Matcher { expected: None };
        assert_eq!(opaque.expected_category(), None);
        assert!(opaque.is_matcher());
    }
}

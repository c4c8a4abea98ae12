//! Numeric matchers: integers, floats, percentages

use crate::matchers::TypeMatcher;
use crate::semantic::SemanticType;
use once_cell::sync::Lazy;
use regex::Regex;

static INTEGER_RE: Lazy<Regex> = Lazy::new(|| {
    // Plain digits or groups of three behind thousands separators.
    // Matching is lexical: a value too large for i64 still matches here
    // and overflows, cleanly, at coercion time.
    Regex::new(r"^[+-]?(\d+|\d{1,3}(,\d{3})+)$").unwrap()
});

static FLOAT_RE: Lazy<Regex> = Lazy::new(|| {
    // Requires a decimal point or an exponent, so plain integers are left
    // to the integer matcher.
    Regex::new(r"^[+-]?((\d+\.\d*|\.\d+)([eE][+-]?\d+)?|\d+[eE][+-]?\d+)$").unwrap()
});

static PERCENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+) ?%$").unwrap());

/// Matches whole numbers, with optional sign and thousands separators
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerMatcher;

impl TypeMatcher for IntegerMatcher {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Integer
    }

    fn matches(&self, value: &str) -> bool {
        INTEGER_RE.is_match(value)
    }

    fn priority(&self) -> i32 {
        50
    }
}

/// Matches decimal and scientific-notation numbers
///
/// `NaN` and `inf` spellings are deliberately excluded: in the datasets this
/// engine exists for, those are missing-value sentinels, not floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatMatcher;

impl TypeMatcher for FloatMatcher {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Float
    }

    fn matches(&self, value: &str) -> bool {
        FLOAT_RE.is_match(value)
    }

    fn priority(&self) -> i32 {
        45
    }
}

/// Matches a numeric body with a trailing percent sign
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentageMatcher;

impl TypeMatcher for PercentageMatcher {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Percentage
    }

    fn matches(&self, value: &str) -> bool {
        PERCENT_RE.is_match(value)
    }

    fn priority(&self) -> i32 {
        48
    }
}

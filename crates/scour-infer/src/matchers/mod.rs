//! Semantic type matchers
//!
//! A [`TypeMatcher`] decides whether a single textual value reads as its
//! semantic type. Matchers are lexical and cheap; anything requiring real
//! validation (dates) parses rather than pattern-matches. The built-ins are
//! collected in a [`MatcherSet`] ordered by priority, so an ambiguous value
//! like `12345` (ZIP code or integer) is claimed by the higher-priority
//! matcher.

use crate::error::InferError;
use crate::semantic::SemanticType;

mod identifier;
mod numeric;
mod temporal;
mod text;

pub use identifier::{BooleanMatcher, EmailMatcher, UrlMatcher, ZipCodeMatcher};
pub use numeric::{FloatMatcher, IntegerMatcher, PercentageMatcher};
pub use temporal::DateMatcher;
pub use text::SentenceMatcher;

/// Decides whether a value reads as one semantic type
pub trait TypeMatcher: Send + Sync + 'static {
    /// The type this matcher recognizes
    fn semantic_type(&self) -> SemanticType;

    /// Whether the (already trimmed) value reads as this type
    fn matches(&self, value: &str) -> bool;

    /// Matcher priority (higher = consulted first)
    fn priority(&self) -> i32 {
        0
    }
}

/// Ordered collection of matchers
pub struct MatcherSet {
    matchers: Vec<Box<dyn TypeMatcher>>,
}

impl MatcherSet {
    /// Create an empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// Register a matcher, keeping priority order
    pub fn register<M: TypeMatcher>(&mut self, matcher: M) {
        self.matchers.push(Box::new(matcher));
        self.matchers.sort_by_key(|m| std::cmp::Reverse(m.priority()));
    }

    /// Classify a trimmed value: first matching type, `Text` otherwise
    #[must_use]
    pub fn classify(&self, value: &str) -> SemanticType {
        self.matchers
            .iter()
            .find(|m| m.matches(value))
            .map_or(SemanticType::Text, |m| m.semantic_type())
    }

    /// Look up the matcher for a semantic type
    ///
    /// # Errors
    /// Returns [`InferError::NoSuchMatcher`] when no matcher is registered
    /// for the type.
    pub fn by_type(&self, ty: SemanticType) -> Result<&dyn TypeMatcher, InferError> {
        self.matchers
            .iter()
            .find(|m| m.semantic_type() == ty)
            .map(Box::as_ref)
            .ok_or_else(|| InferError::NoSuchMatcher(ty.name().to_string()))
    }

    /// Number of registered matchers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Whether the set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Default for MatcherSet {
    fn default() -> Self {
        default_matchers()
    }
}

impl std::fmt::Debug for MatcherSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let types: Vec<_> = self.matchers.iter().map(|m| m.semantic_type()).collect();
        f.debug_struct("MatcherSet").field("types", &types).finish()
    }
}

/// The built-in matcher set
#[must_use]
pub fn default_matchers() -> MatcherSet {
    let mut set = MatcherSet::new();
    set.register(ZipCodeMatcher);
    set.register(DateMatcher);
    set.register(BooleanMatcher);
    set.register(IntegerMatcher);
    set.register(PercentageMatcher);
    set.register(FloatMatcher);
    set.register(EmailMatcher);
    set.register(UrlMatcher);
    set.register(SentenceMatcher);
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_priority_zip_over_integer() {
        let set = default_matchers();
        assert_eq!(set.classify("12345"), SemanticType::ZipCode);
        assert_eq!(set.classify("1234"), SemanticType::Integer);
    }

    #[test]
    fn classify_fallback_is_text() {
        let set = default_matchers();
        assert_eq!(set.classify("ducati"), SemanticType::Text);
    }

    #[test]
    fn by_type_known_and_unknown() {
        let set = default_matchers();
        assert!(set.by_type(SemanticType::Date).is_ok());
        assert!(matches!(
            set.by_type(SemanticType::Unknown),
            Err(InferError::NoSuchMatcher(_))
        ));
    }

    #[test]
    fn classify_sample_values() {
        let set = default_matchers();
        assert_eq!(set.classify("42"), SemanticType::Integer);
        assert_eq!(set.classify("-3.5"), SemanticType::Float);
        assert_eq!(set.classify("12%"), SemanticType::Percentage);
        assert_eq!(set.classify("true"), SemanticType::Boolean);
        assert_eq!(set.classify("2023-05-17"), SemanticType::Date);
        assert_eq!(set.classify("a@b.io"), SemanticType::Email);
        assert_eq!(set.classify("https://example.com"), SemanticType::Url);
        assert_eq!(
            set.classify("the quick brown fox jumps"),
            SemanticType::Sentence
        );
    }
}

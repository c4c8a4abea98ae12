//! Sentence matcher

use crate::matchers::TypeMatcher;
use crate::semantic::SemanticType;

/// Minimum whitespace-separated words for a value to read as a sentence
const MIN_WORDS: usize = 4;

/// Matches free-text sentences
///
/// Sentence columns are exempt from outlier repair, so this matcher mostly
/// exists to keep prose away from the similarity machinery.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceMatcher;

impl TypeMatcher for SentenceMatcher {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Sentence
    }

    fn matches(&self, value: &str) -> bool {
        value.split_whitespace().count() >= MIN_WORDS
    }

    fn priority(&self) -> i32 {
        10
    }
}

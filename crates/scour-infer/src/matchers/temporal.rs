//! Date matcher
//!
//! Goes through chrono's actual date parsing rather than a regex, so
//! impossible dates like `2023-02-30` do not match.

use crate::matchers::TypeMatcher;
use crate::semantic::SemanticType;
use chrono::NaiveDate;

const FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m-%d-%Y"];

/// Matches calendar dates in common dataset formats
#[derive(Debug, Clone, Copy, Default)]
pub struct DateMatcher;

impl DateMatcher {
    /// Parse a value with the supported formats
    #[must_use]
    pub fn parse(value: &str) -> Option<NaiveDate> {
        FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    }
}

impl TypeMatcher for DateMatcher {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Date
    }

    fn matches(&self, value: &str) -> bool {
        Self::parse(value).is_some()
    }

    fn priority(&self) -> i32 {
        58
    }
}

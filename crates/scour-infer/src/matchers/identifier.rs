//! Identifier-shaped matchers: ZIP codes, booleans, emails, URLs

use crate::matchers::TypeMatcher;
use crate::semantic::SemanticType;
use once_cell::sync::Lazy;
use regex::Regex;

static ZIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").unwrap());

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://\S+$").unwrap());

/// Matches five-digit and five-plus-four US ZIP codes
///
/// Outranks the integer matcher: leading zeros are significant, so ZIP
/// columns must never reach numeric coercion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipCodeMatcher;

impl TypeMatcher for ZipCodeMatcher {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::ZipCode
    }

    fn matches(&self, value: &str) -> bool {
        ZIP_RE.is_match(value)
    }

    fn priority(&self) -> i32 {
        60
    }
}

/// Matches textual booleans
///
/// `0`/`1` is not boolean here: it is ambiguous with integer counts, and
/// guessing boolean corrupts count data while integer coercion stays
/// lossless.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanMatcher;

impl TypeMatcher for BooleanMatcher {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Boolean
    }

    fn matches(&self, value: &str) -> bool {
        matches!(
            value.to_ascii_lowercase().as_str(),
            "true" | "false" | "yes" | "no" | "t" | "f" | "y" | "n"
        )
    }

    fn priority(&self) -> i32 {
        55
    }
}

/// Matches email addresses, pragmatically
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailMatcher;

impl TypeMatcher for EmailMatcher {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Email
    }

    fn matches(&self, value: &str) -> bool {
        EMAIL_RE.is_match(value)
    }

    fn priority(&self) -> i32 {
        40
    }
}

/// Matches http(s) URLs
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlMatcher;

impl TypeMatcher for UrlMatcher {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Url
    }

    fn matches(&self, value: &str) -> bool {
        URL_RE.is_match(value)
    }

    fn priority(&self) -> i32 {
        38
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_forms() {
        let m = ZipCodeMatcher;
        assert!(m.matches("12345"));
        assert!(m.matches("02134"));
        assert!(m.matches("12345-6789"));
        assert!(!m.matches("1234"));
        assert!(!m.matches("123456"));
        assert!(!m.matches("12345-678"));
    }

    #[test]
    fn boolean_forms() {
        let m = BooleanMatcher;
        assert!(m.matches("true"));
        assert!(m.matches("FALSE"));
        assert!(m.matches("Yes"));
        assert!(m.matches("n"));
        assert!(!m.matches("0"));
        assert!(!m.matches("1"));
        assert!(!m.matches("nope"));
    }

    #[test]
    fn email_forms() {
        let m = EmailMatcher;
        assert!(m.matches("a.b@example.co.uk"));
        assert!(!m.matches("not-an-email"));
        assert!(!m.matches("a@b"));
    }

    #[test]
    fn url_forms() {
        let m = UrlMatcher;
        assert!(m.matches("https://example.com/path?q=1"));
        assert!(m.matches("http://x.io"));
        assert!(!m.matches("ftp://x.io"));
        assert!(!m.matches("https:// spaced.com"));
    }
}

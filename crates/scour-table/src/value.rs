//! Cell values
//!
//! Provides [`CellValue`], the value a single table cell holds. Ingestion
//! produces `Text` for everything present in the source; `Int`, `Float` and
//! `Bool` appear only after coercion, and `Missing` after sentinel
//! normalization (or from absent keys in record-style input).

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// Raw or cleaned textual value
    Text(String),

    /// Coerced integer
    Int(i64),

    /// Coerced floating-point value
    Float(f64),

    /// Coerced boolean
    Bool(bool),

    /// Missing value (normalized sentinel or absent field)
    Missing,
}

impl CellValue {
    /// Create a text cell
    #[inline]
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Whether this cell is missing
    #[inline]
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Render the cell as text, `None` for missing cells
    ///
    /// Text cells borrow; coerced cells format into an owned string.
    #[must_use]
    pub fn render(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Self::Int(v) => Some(Cow::Owned(v.to_string())),
            Self::Float(v) => Some(Cow::Owned(v.to_string())),
            Self::Bool(v) => Some(Cow::Owned(v.to_string())),
            Self::Missing => None,
        }
    }

    /// The raw text, if this is a `Text` cell
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.render() {
            Some(s) => write!(f, "{s}"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_text_borrows() {
        let cell = CellValue::text("hello");
        assert_eq!(cell.render().unwrap(), "hello");
    }

    #[test]
    fn render_missing_is_none() {
        assert!(CellValue::Missing.render().is_none());
        assert!(CellValue::Missing.is_missing());
    }

    #[test]
    fn render_coerced_values() {
        assert_eq!(CellValue::Int(-42).render().unwrap(), "-42");
        assert_eq!(CellValue::Bool(true).render().unwrap(), "true");
        assert_eq!(CellValue::Float(1.5).render().unwrap(), "1.5");
    }

    #[test]
    fn display_missing_is_empty() {
        assert_eq!(CellValue::Missing.to_string(), "");
        assert_eq!(CellValue::Int(7).to_string(), "7");
    }

    #[test]
    fn serde_round_trip() {
        let cell = CellValue::text("ny");
        let json = serde_json::to_string(&cell).unwrap();
        let back: CellValue = serde_json::from_str(&json).unwrap();
        assert_eq!(cell, back);
    }
}

//! Semantic column types
//!
//! Provides [`SemanticType`], the vocabulary the inference engine votes
//! over. `Text` is the fallback for anything that reads but fits nothing
//! stronger; `Unknown` only appears when a column offers no evidence at all
//! (empty or all-missing).

use serde::{Deserialize, Serialize};

/// Semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    /// Whole numbers, optional sign and thousands separators
    Integer,

    /// Decimal or scientific-notation numbers
    Float,

    /// Numeric body with a trailing percent sign
    Percentage,

    /// true/false style flags (0/1 deliberately excluded)
    Boolean,

    /// Calendar dates that survive actual date parsing
    Date,

    /// US ZIP codes, five digit or five-plus-four
    ZipCode,

    /// Email addresses
    Email,

    /// URLs
    Url,

    /// Free text of four or more words
    Sentence,

    /// Plain text fallback
    Text,

    /// No evidence (empty or all-missing column)
    Unknown,
}

impl SemanticType {
    /// Whether values of this type have a numeric reading
    #[inline]
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Percentage)
    }

    /// Whether outlier repair may touch columns of this type
    ///
    /// Sentences are exempt (close-match repair on prose is noise) and so
    /// are columns with no evidence.
    #[inline]
    #[must_use]
    pub const fn repairable(&self) -> bool {
        !matches!(self, Self::Sentence | Self::Unknown)
    }

    /// Stable lowercase name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Percentage => "percentage",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::ZipCode => "zip_code",
            Self::Email => "email",
            Self::Url => "url",
            Self::Sentence => "sentence",
            Self::Text => "text",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

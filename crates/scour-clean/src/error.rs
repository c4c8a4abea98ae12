//! Error types for cleaning
//!
//! The variants of [`CleanError`] are the failure taxonomy observed when
//! running profiling pipelines against wild datasets: every way a column
//! used to blow up is a typed, column-attributed error here. The pipeline
//! tallies these per class instead of dying on them.

use serde::{Deserialize, Serialize};

/// Errors during cleaning, attributed to a column
#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    /// A value could not be interpreted at all
    #[error("invalid value '{value}' in column '{column}': {detail}")]
    InvalidValue {
        column: String,
        value: String,
        detail: String,
    },

    /// A cell did not hold what the strategy was promised
    #[error("type mismatch in column '{column}': {detail}")]
    TypeMismatch { column: String, detail: String },

    /// The strategy addressed a column the table does not have
    #[error("unknown column: '{0}'")]
    UnknownColumn(String),

    /// An integer-form value overflowed i64 during coercion
    #[error("numeric overflow in column '{column}': '{value}' does not fit i64")]
    NumericOverflow { column: String, value: String },

    /// A matcher lookup failed
    #[error("matcher lookup failed for column '{column}': {source}")]
    NoSuchMatcher {
        column: String,
        #[source]
        source: scour_infer::InferError,
    },

    /// A strategy was asked for something it cannot do
    #[error("column '{column}' lacks capability: {what}")]
    MissingCapability { column: String, what: String },
}

impl CleanError {
    /// Create invalid-value error
    pub fn invalid_value(
        column: impl Into<String>,
        value: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            column: column.into(),
            value: value.into(),
            detail: detail.into(),
        }
    }

    /// Create type-mismatch error
    pub fn type_mismatch(column: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            detail: detail.into(),
        }
    }

    /// The taxonomy class of this error, for tallying
    #[must_use]
    pub const fn class(&self) -> FailureClass {
        match self {
            Self::InvalidValue { .. } => FailureClass::InvalidValue,
            Self::TypeMismatch { .. } => FailureClass::TypeMismatch,
            Self::UnknownColumn(_) => FailureClass::UnknownColumn,
            Self::NumericOverflow { .. } => FailureClass::NumericOverflow,
            Self::NoSuchMatcher { .. } => FailureClass::LookupFailed,
            Self::MissingCapability { .. } => FailureClass::MissingCapability,
        }
    }

    /// The column this error is attributed to
    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Self::InvalidValue { column, .. }
            | Self::TypeMismatch { column, .. }
            | Self::NumericOverflow { column, .. }
            | Self::NoSuchMatcher { column, .. }
            | Self::MissingCapability { column, .. } => column,
            Self::UnknownColumn(column) => column,
        }
    }
}

impl From<scour_table::TableError> for CleanError {
    fn from(err: scour_table::TableError) -> Self {
        match err {
            scour_table::TableError::UnknownColumn(name) => Self::UnknownColumn(name),
            other => Self::TypeMismatch {
                column: String::new(),
                detail: other.to_string(),
            },
        }
    }
}

/// Failure classes for report tallies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// Uninterpretable value
    InvalidValue,

    /// Wrong cell type for the operation
    TypeMismatch,

    /// Addressed column absent
    UnknownColumn,

    /// i64 overflow during coercion
    NumericOverflow,

    /// Registry or matcher lookup failed
    LookupFailed,

    /// Capability missing for the column
    MissingCapability,
}

impl FailureClass {
    /// All classes, for exhaustive tallies
    pub const ALL: [Self; 6] = [
        Self::InvalidValue,
        Self::TypeMismatch,
        Self::UnknownColumn,
        Self::NumericOverflow,
        Self::LookupFailed,
        Self::MissingCapability,
    ];
}

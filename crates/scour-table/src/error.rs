//! Error types for the table model
//!
//! Covers:
//! - Shape violations at construction and mutation time
//! - Ingestion failures (file -> Table)

use std::path::PathBuf;

/// Errors from building or mutating tables
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Column length differs from the table's row count
    #[error("ragged column '{column}': expected {expected} rows, got {actual}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Column name already present in the table
    #[error("duplicate column name: '{0}'")]
    DuplicateColumn(String),

    /// Lookup of a column that does not exist
    #[error("unknown column: '{0}'")]
    UnknownColumn(String),

    /// Row index out of bounds for a column
    #[error("row {row} out of bounds for column '{column}' with {rows} rows")]
    RowOutOfBounds {
        column: String,
        row: usize,
        rows: usize,
    },
}

/// Errors during file parsing (ingress)
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// No parser registered for file extension
    #[error("no parser registered for extension: '{0}'")]
    NoParserForExtension(String),

    /// Input had no content to parse
    #[error("empty input: {0}")]
    Empty(String),

    /// Malformed record in the input
    #[error("malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// Structurally valid input that violates table shape rules
    #[error("shape error: {0}")]
    Shape(#[from] TableError),

    /// JSON syntax or structure error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Create malformed-record error for a 1-based line number
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: message.into(),
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_error_display() {
        let err = TableError::DuplicateColumn("age".to_string());
        assert_eq!(err.to_string(), "duplicate column name: 'age'");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::malformed(7, "expected 3 fields, got 2");
        assert_eq!(
            err.to_string(),
            "malformed record at line 7: expected 3 fields, got 2"
        );
    }

    #[test]
    fn parse_error_from_table_error() {
        let err: ParseError = TableError::DuplicateColumn("id".to_string()).into();
        assert!(matches!(err, ParseError::Shape(_)));
    }
}

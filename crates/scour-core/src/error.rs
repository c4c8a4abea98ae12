//! Pipeline-level errors.
//!
//! Per-column strategy failures are tallied in the report rather than
//! surfaced here; [`PipelineError`] is reserved for conditions that abort
//! the whole run.

use scour_table::{ParseError, TableError};
use thiserror::Error;

/// Fatal pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Table exceeds the configured cell budget
    #[error("table has {observed} cells, exceeding the budget of {allowed}")]
    BudgetExceeded {
        /// rows * columns observed
        observed: usize,
        /// configured ceiling
        allowed: usize,
    },

    /// Nothing to clean
    #[error("table has no columns")]
    EmptyTable,

    /// Ingestion failed before the pipeline could start
    #[error("ingest failed: {0}")]
    Ingest(#[from] ParseError),

    /// Table shape violated while applying edits
    #[error(transparent)]
    Shape(#[from] TableError),

    /// An applied edit no longer matched the cell it targeted
    #[error("edit conflict in column '{column}' row {row}: cell changed under the strategy")]
    EditConflict {
        /// Column the edit addressed
        column: String,
        /// Row the edit addressed
        row: usize,
    },
}

impl PipelineError {
    /// Create a budget-exceeded error
    pub fn budget_exceeded(observed: usize, allowed: usize) -> Self {
        Self::BudgetExceeded { observed, allowed }
    }
}

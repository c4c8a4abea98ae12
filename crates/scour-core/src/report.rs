//! Run reports.
//!
//! A [`CleaningReport`] is the machine-readable record of one pipeline run:
//! what was edited per column, what failed and how often, and the table
//! fingerprints bracketing the run.

use chrono::{DateTime, Utc};
use scour_clean::{CleanError, EditReason, FailureClass};
use scour_infer::SemanticType;
use scour_table::TableFingerprint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ulid::Ulid;

/// Unique identifier for one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Ulid);

impl RunId {
    /// Generate a fresh run id
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new())
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-class failure counts across a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureTally {
    counts: BTreeMap<FailureClass, usize>,
}

impl FailureTally {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failure
    pub fn record(&mut self, error: &CleanError) {
        *self.counts.entry(error.class()).or_insert(0) += 1;
    }

    /// Count for one class
    #[must_use]
    pub fn count(&self, class: FailureClass) -> usize {
        self.counts.get(&class).copied().unwrap_or(0)
    }

    /// Total failures across all classes
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Whether the run saw no failures
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.counts.is_empty()
    }
}

/// What happened to one column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnReport {
    /// Column name
    pub name: String,

    /// Type inferred before cleaning
    pub inferred: SemanticType,

    /// Retype applied by a strategy, if any
    pub retyped: Option<SemanticType>,

    /// Missing cells before cleaning
    pub missing_before: usize,

    /// Missing cells after cleaning
    pub missing_after: usize,

    /// Edit counts per reason
    pub edits: BTreeMap<EditReason, usize>,

    /// Cells left textual by coercion in a mixed column
    pub residual_mixed: usize,

    /// Strategy error that stopped cleaning of this column, if any
    pub error: Option<String>,
}

impl ColumnReport {
    /// Total edits applied to this column
    #[must_use]
    pub fn edit_count(&self) -> usize {
        self.edits.values().sum()
    }

    /// Whether cleaning changed this column at all
    #[must_use]
    pub fn changed(&self) -> bool {
        self.edit_count() > 0 || self.retyped.is_some()
    }
}

/// The record of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Run identifier
    pub run_id: RunId,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Table fingerprint before cleaning
    pub fingerprint_before: TableFingerprint,

    /// Table fingerprint after cleaning
    pub fingerprint_after: TableFingerprint,

    /// Rows in the table
    pub rows: usize,

    /// Columns in the table
    pub columns: usize,

    /// Per-column outcomes, in table order
    pub column_reports: Vec<ColumnReport>,

    /// Per-class failure counts
    pub failures: FailureTally,

    /// Wall-clock duration in milliseconds
    pub elapsed_ms: u64,
}

impl CleaningReport {
    /// Total edits across all columns
    #[must_use]
    pub fn total_edits(&self) -> usize {
        self.column_reports.iter().map(ColumnReport::edit_count).sum()
    }

    /// Columns cleaning actually changed
    #[must_use]
    pub fn changed_columns(&self) -> usize {
        self.column_reports.iter().filter(|c| c.changed()).count()
    }

    /// Whether the table came out byte-identical
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.fingerprint_before == self.fingerprint_after
    }
}

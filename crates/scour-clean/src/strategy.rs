//! Cleaning strategy trait and outcome types
//!
//! A [`CleanStrategy`] inspects one column (with its profile) and proposes
//! edits; it never mutates the table. The pipeline applies the edits, so an
//! aborted strategy cannot leave a half-edited column behind.

use crate::error::CleanError;
use scour_infer::{ColumnProfile, SemanticType};
use scour_table::{CellValue, Column};
use serde::{Deserialize, Serialize};

/// Tunables shared by the cleaning strategies
///
/// Defaults are the thresholds the repair procedure was tuned with across a
/// few hundred wild datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanConfig {
    /// Frequency share below which a value is an outlier candidate
    pub outlier_share: f64,

    /// Unique ratio above which a column is too diverse to repair
    pub unique_ratio_ceiling: f64,

    /// Minimum trigram Jaccard similarity for a repair pair
    pub similarity_threshold: f64,

    /// Maximum rare/common frequency ratio for a replacement
    pub freq_ratio_threshold: f64,

    /// Ratcliff-Obershelp cutoff for the close-match shortlist
    pub close_match_cutoff: f64,

    /// Maximum close matches considered per candidate
    pub close_match_cap: usize,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            outlier_share: 0.025,
            unique_ratio_ceiling: 0.8,
            similarity_threshold: 0.75,
            freq_ratio_threshold: 0.05,
            close_match_cutoff: 0.6,
            close_match_cap: 3,
        }
    }
}

/// Why a cell was edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditReason {
    /// Rare value replaced by its frequent near-variant
    OutlierReplaced,

    /// Value failing the column's type replaced by a frequent valid value
    TypeOutlierReplaced,

    /// Missing-value sentinel normalized to a missing cell
    SentinelNormalized,

    /// Textual value coerced to a typed cell
    NumericCoerced,
}

/// One proposed cell edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellEdit {
    /// Row index
    pub row: usize,

    /// Cell content the edit expects to find
    pub before: CellValue,

    /// Replacement content
    pub after: CellValue,

    /// Why
    pub reason: EditReason,
}

/// Outcome of one strategy on one column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanOutcome {
    /// Proposed edits, in row order per value
    pub edits: Vec<CellEdit>,

    /// Column retype, when the strategy overrules the profile
    pub retype: Option<SemanticType>,

    /// Cells left textual by coercion in a mixed column
    pub residual_mixed: usize,
}

impl CleanOutcome {
    /// Outcome with no effect
    #[inline]
    #[must_use]
    pub fn noop() -> Self {
        Self::default()
    }

    /// Whether the outcome changes anything
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.edits.is_empty() && self.retype.is_none()
    }

    /// Outcome that only retypes the column
    #[inline]
    #[must_use]
    pub fn retype_to(ty: SemanticType) -> Self {
        Self {
            retype: Some(ty),
            ..Self::default()
        }
    }
}

/// A cleaning strategy
pub trait CleanStrategy: Send + Sync + std::fmt::Debug {
    /// Strategy name (for registry lookup, reports and logs)
    fn name(&self) -> &'static str;

    /// Whether this strategy has anything to offer the column
    fn applies_to(&self, profile: &ColumnProfile) -> bool;

    /// Propose edits for a column
    ///
    /// The column passed in reflects earlier strategies' applied edits; the
    /// profile is the pre-clean profile and is advisory for anything
    /// recomputable from the column itself.
    ///
    /// # Errors
    /// Returns a [`CleanError`] attributed to the column; the pipeline
    /// tallies it and leaves the column untouched.
    fn clean(
        &self,
        column: &Column,
        profile: &ColumnProfile,
        config: &CleanConfig,
    ) -> Result<CleanOutcome, CleanError>;

    /// Run order (higher = earlier)
    fn priority(&self) -> i32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds() {
        let config = CleanConfig::default();
        assert_eq!(config.outlier_share, 0.025);
        assert_eq!(config.unique_ratio_ceiling, 0.8);
        assert_eq!(config.similarity_threshold, 0.75);
        assert_eq!(config.freq_ratio_threshold, 0.05);
        assert_eq!(config.close_match_cap, 3);
    }

    #[test]
    fn outcome_noop() {
        assert!(CleanOutcome::noop().is_noop());
        assert!(!CleanOutcome::retype_to(SemanticType::Text).is_noop());
    }
}

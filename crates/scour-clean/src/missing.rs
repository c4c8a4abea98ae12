//! Sentinel normalization
//!
//! Rewrites missing-value sentinels (`?`, `NA`, contextual `-1`, ...) to
//! proper missing cells. Runs first in the default registry so the repair
//! and coercion strategies never see sentinel text.

use crate::error::CleanError;
use crate::strategy::{CellEdit, CleanConfig, CleanOutcome, CleanStrategy, EditReason};
use scour_infer::{ColumnProfile, SentinelPolicy};
use scour_table::{CellValue, Column};

/// Normalizes sentinel values to missing cells
#[derive(Debug, Default)]
pub struct SentinelScrub {
    policy: SentinelPolicy,
}

impl SentinelScrub {
    /// Scrub with the standard policy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scrub with a custom policy
    #[inline]
    #[must_use]
    pub fn with_policy(policy: SentinelPolicy) -> Self {
        Self { policy }
    }
}

impl CleanStrategy for SentinelScrub {
    fn name(&self) -> &'static str {
        "sentinel-scrub"
    }

    fn applies_to(&self, profile: &ColumnProfile) -> bool {
        profile.rows > 0
    }

    fn clean(
        &self,
        column: &Column,
        _profile: &ColumnProfile,
        _config: &CleanConfig,
    ) -> Result<CleanOutcome, CleanError> {
        let rows = self.policy.sentinel_rows(column);
        let mut edits = Vec::with_capacity(rows.len());
        for row in rows {
            let cell = column.get(row).ok_or_else(|| {
                CleanError::type_mismatch(column.name(), format!("sentinel row {row} vanished"))
            })?;
            edits.push(CellEdit {
                row,
                before: cell.clone(),
                after: CellValue::Missing,
                reason: EditReason::SentinelNormalized,
            });
        }
        if !edits.is_empty() {
            tracing::debug!(
                column = column.name(),
                count = edits.len(),
                "sentinels normalized"
            );
        }
        Ok(CleanOutcome {
            edits,
            retype: None,
            residual_mixed: 0,
        })
    }

    fn priority(&self) -> i32 {
        100
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scour_infer::TypeInference;

    #[test]
    fn sentinels_become_missing() {
        let column = Column::from_texts("c", ["1", "?", "2", "NA", "3"]);
        let prof = TypeInference::new().profile_column(&column);
        let outcome = SentinelScrub::new()
            .clean(&column, &prof, &CleanConfig::default())
            .unwrap();
        assert_eq!(outcome.edits.len(), 2);
        assert!(outcome
            .edits
            .iter()
            .all(|e| e.after == CellValue::Missing
                && e.reason == EditReason::SentinelNormalized));
        assert_eq!(outcome.edits[0].row, 1);
        assert_eq!(outcome.edits[1].row, 3);
    }

    #[test]
    fn contextual_neg_one_scrubbed() {
        let column = Column::from_texts("age", ["34", "27", "-1", "51"]);
        let prof = TypeInference::new().profile_column(&column);
        let outcome = SentinelScrub::new()
            .clean(&column, &prof, &CleanConfig::default())
            .unwrap();
        assert_eq!(outcome.edits.len(), 1);
        assert_eq!(outcome.edits[0].row, 2);
    }

    #[test]
    fn clean_column_is_noop() {
        let column = Column::from_texts("c", ["a", "b", "c"]);
        let prof = TypeInference::new().profile_column(&column);
        let outcome = SentinelScrub::new()
            .clean(&column, &prof, &CleanConfig::default())
            .unwrap();
        assert!(outcome.is_noop());
    }

    #[test]
    fn custom_policy_respected() {
        let column = Column::from_texts("c", ["a", "unk", "b"]);
        let prof = TypeInference::new().profile_column(&column);
        let scrub =
            SentinelScrub::with_policy(SentinelPolicy::standard().with_literal("unk"));
        let outcome = scrub.clean(&column, &prof, &CleanConfig::default()).unwrap();
        assert_eq!(outcome.edits.len(), 1);
        assert_eq!(outcome.edits[0].before, CellValue::text("unk"));
    }
}

//! Missing-value sentinel detection
//!
//! Real-world exports encode "missing" a dozen ways: empty strings, `?`,
//! `NA`, `NaN`, and magic numerics like `-1` or `9999`. [`SentinelPolicy`]
//! decides which strings count as sentinels; the numeric ones are judged in
//! column context, because `-1` in a temperature column is data, not a
//! marker.

use scour_table::Column;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const DEFAULT_LITERALS: &[&str] = &[
    "", "?", "-", "na", "n/a", "nan", "null", "none", "missing",
];

/// Magnitude sentinels judged in column context
const MAGNITUDE_SENTINELS: &[f64] = &[9999.0, -9999.0];

/// Policy for recognizing missing-value sentinels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentinelPolicy {
    /// Case-insensitive literal sentinels (stored lowercased)
    literals: BTreeSet<String>,

    /// Whether numeric sentinels (`-1`, `9999`) are considered at all
    numeric_sentinels: bool,
}

impl SentinelPolicy {
    /// Policy with the standard literals and numeric sentinels enabled
    #[must_use]
    pub fn standard() -> Self {
        Self {
            literals: DEFAULT_LITERALS.iter().map(|s| (*s).to_string()).collect(),
            numeric_sentinels: true,
        }
    }

    /// Policy with no sentinels at all
    #[inline]
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            literals: BTreeSet::new(),
            numeric_sentinels: false,
        }
    }

    /// Add a literal sentinel (matched case-insensitively)
    #[must_use]
    pub fn with_literal(mut self, literal: impl AsRef<str>) -> Self {
        self.literals.insert(literal.as_ref().to_lowercase());
        self
    }

    /// Disable the contextual numeric sentinels
    #[inline]
    #[must_use]
    pub fn without_numeric_sentinels(mut self) -> Self {
        self.numeric_sentinels = false;
        self
    }

    /// Whether a trimmed value is a literal sentinel
    #[must_use]
    pub fn is_literal(&self, value: &str) -> bool {
        self.literals.contains(&value.to_lowercase())
    }

    /// Rows of a column holding sentinel values
    ///
    /// Literal sentinels always count. `-1` counts only when every other
    /// numeric value in the column is non-negative. `9999`/`-9999` count
    /// only when every other numeric value stays at or below half that
    /// magnitude.
    #[must_use]
    pub fn sentinel_rows(&self, column: &Column) -> Vec<usize> {
        let mut rows = Vec::new();
        let mut numeric: Vec<(usize, f64)> = Vec::new();

        for (row, cell) in column.cells().enumerate() {
            let Some(text) = cell.render() else { continue };
            let trimmed = text.trim();
            if self.is_literal(trimmed) {
                rows.push(row);
            } else if self.numeric_sentinels {
                if let Ok(v) = trimmed.parse::<f64>() {
                    numeric.push((row, v));
                }
            }
        }

        if self.numeric_sentinels {
            self.extend_with_numeric(&numeric, &mut rows);
        }
        rows.sort_unstable();
        rows
    }

    fn extend_with_numeric(&self, numeric: &[(usize, f64)], rows: &mut Vec<usize>) {
        let others_min = |excluded: f64| {
            numeric
                .iter()
                .filter(|(_, v)| *v != excluded)
                .map(|(_, v)| *v)
                .fold(f64::INFINITY, f64::min)
        };
        let others_max_abs = |excluded: f64| {
            numeric
                .iter()
                .filter(|(_, v)| v.abs() != excluded.abs())
                .map(|(_, v)| v.abs())
                .fold(0.0_f64, f64::max)
        };

        let has_neg_one = numeric.iter().any(|(_, v)| *v == -1.0);
        if has_neg_one && others_min(-1.0) >= 0.0 {
            rows.extend(
                numeric
                    .iter()
                    .filter(|(_, v)| *v == -1.0)
                    .map(|(row, _)| *row),
            );
        }

        for sentinel in MAGNITUDE_SENTINELS {
            let present = numeric.iter().any(|(_, v)| v == sentinel);
            if present && others_max_abs(*sentinel) <= sentinel.abs() / 2.0 {
                rows.extend(
                    numeric
                        .iter()
                        .filter(|(_, v)| v == sentinel)
                        .map(|(row, _)| *row),
                );
            }
        }
    }
}

impl Default for SentinelPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scour_table::Column;

    fn col(values: &[&str]) -> Column {
        Column::from_texts("c", values.iter().copied())
    }

    #[test]
    fn literal_sentinels() {
        let policy = SentinelPolicy::standard();
        let rows = policy.sentinel_rows(&col(&["x", "?", "NA", "n/a", "", "y"]));
        assert_eq!(rows, vec![1, 2, 3, 4]);
    }

    #[test]
    fn literals_case_insensitive() {
        let policy = SentinelPolicy::standard();
        assert!(policy.is_literal("NULL"));
        assert!(policy.is_literal("NaN"));
        assert!(!policy.is_literal("nilch"));
    }

    #[test]
    fn neg_one_sentinel_in_nonnegative_column() {
        let policy = SentinelPolicy::standard();
        let rows = policy.sentinel_rows(&col(&["12", "0", "-1", "7"]));
        assert_eq!(rows, vec![2]);
    }

    #[test]
    fn neg_one_kept_when_negatives_are_real() {
        let policy = SentinelPolicy::standard();
        let rows = policy.sentinel_rows(&col(&["-4", "-1", "3"]));
        assert!(rows.is_empty());
    }

    #[test]
    fn magnitude_sentinel_when_far_from_data() {
        let policy = SentinelPolicy::standard();
        let rows = policy.sentinel_rows(&col(&["12", "80", "9999", "45"]));
        assert_eq!(rows, vec![2]);
    }

    #[test]
    fn magnitude_sentinel_kept_when_in_range() {
        let policy = SentinelPolicy::standard();
        let rows = policy.sentinel_rows(&col(&["8000", "9999", "9500"]));
        assert!(rows.is_empty());
    }

    #[test]
    fn custom_literal() {
        let policy = SentinelPolicy::standard().with_literal("UNK");
        let rows = policy.sentinel_rows(&col(&["a", "unk", "b"]));
        assert_eq!(rows, vec![1]);
    }

    #[test]
    fn disabled_policy_flags_nothing() {
        let policy = SentinelPolicy::disabled();
        let rows = policy.sentinel_rows(&col(&["?", "NA", "-1"]));
        assert!(rows.is_empty());
    }

    #[test]
    fn numeric_sentinels_can_be_disabled() {
        let policy = SentinelPolicy::standard().without_numeric_sentinels();
        let rows = policy.sentinel_rows(&col(&["12", "-1", "7"]));
        assert!(rows.is_empty());
    }
}

//! String outlier repair
//!
//! The repair procedure:
//! 1. A unique value is a candidate when its frequency share is below the
//!    outlier share and the column is not too diverse, or when it fails the
//!    column's inferred type (a type outlier).
//! 2. If every unique value ends up a candidate, the inference was wrong:
//!    retype the column to plain text and touch nothing.
//! 3. For each candidate, shortlist close matches (Ratcliff-Obershelp),
//!    pick the most similar partner by trigram Jaccard, order the pair by
//!    frequency, and replace the rare value with the common one when the
//!    frequency ratio is low enough. Type outliers are replaced even when
//!    the ratio test fails.
//! 4. A type outlier with no acceptable partner is replaced by the most
//!    frequent non-candidate value; if no such value exists, it stays.
//!
//! Replacement never invents values: every `after` already occurred in the
//! column.

use crate::error::CleanError;
use crate::similarity::{close_matches, trigram_jaccard};
use crate::strategy::{CellEdit, CleanConfig, CleanOutcome, CleanStrategy, EditReason};
use indexmap::IndexMap;
use scour_infer::{ColumnProfile, MatcherSet, SemanticType};
use scour_table::{CellValue, Column};

/// Similarity-based outlier repair for string columns
#[derive(Debug, Default)]
pub struct OutlierRepair {
    matchers: MatcherSet,
}

impl OutlierRepair {
    /// Repair with the default matcher set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repair with a custom matcher set
    #[inline]
    #[must_use]
    pub fn with_matchers(matchers: MatcherSet) -> Self {
        Self { matchers }
    }

    fn is_type_outlier(
        &self,
        value: &str,
        inferred: SemanticType,
        column: &str,
    ) -> Result<bool, CleanError> {
        if matches!(inferred, SemanticType::Text | SemanticType::Unknown) {
            return Ok(false);
        }
        let matcher = self
            .matchers
            .by_type(inferred)
            .map_err(|source| CleanError::NoSuchMatcher {
                column: column.to_string(),
                source,
            })?;
        Ok(!matcher.matches(value.trim()))
    }
}

impl CleanStrategy for OutlierRepair {
    fn name(&self) -> &'static str {
        "outlier-repair"
    }

    fn applies_to(&self, profile: &ColumnProfile) -> bool {
        profile.rows > 0 && profile.inferred.repairable() && !profile.is_low_support()
    }

    fn clean(
        &self,
        column: &Column,
        profile: &ColumnProfile,
        config: &CleanConfig,
    ) -> Result<CleanOutcome, CleanError> {
        let rows = column.len();
        let freqs = column.frequencies();
        if rows == 0 || freqs.is_empty() {
            return Ok(CleanOutcome::noop());
        }

        let unique_ratio = freqs.len() as f64 / rows as f64;
        let too_diverse = unique_ratio >= config.unique_ratio_ceiling;

        // Candidate selection over the original frequencies
        let mut candidates: Vec<(String, bool)> = Vec::new();
        for (value, count) in &freqs {
            let share = *count as f64 / rows as f64;
            let type_out = self.is_type_outlier(value, profile.inferred, column.name())?;
            let low_freq = share < config.outlier_share && !too_diverse;
            if low_freq || type_out {
                candidates.push((value.clone(), type_out));
            }
        }
        if candidates.is_empty() {
            return Ok(CleanOutcome::noop());
        }

        // Everything flagged means the inference was wrong, not the data
        if candidates.len() == freqs.len() {
            tracing::debug!(
                column = column.name(),
                "all values flagged as outliers; retyping to text"
            );
            return Ok(CleanOutcome::retype_to(SemanticType::Text));
        }

        let mut working: IndexMap<String, usize> = freqs;
        let mut replacements: Vec<(String, String, EditReason)> = Vec::new();

        for (candidate, type_out) in &candidates {
            let Some(&cand_freq) = working.get(candidate) else {
                // Already folded into an earlier replacement
                continue;
            };

            let partner = best_partner(candidate, &working, config);
            let replaced = if let Some(partner) = partner {
                let partner_freq = working[&partner];
                // Order by frequency; on ties the candidate is the rare one
                let (rare, common) = if cand_freq <= partner_freq {
                    (candidate.clone(), partner)
                } else {
                    (partner, candidate.clone())
                };
                let (rare_freq, common_freq) = (working[&rare] as f64, working[&common] as f64);
                if rare_freq / common_freq < config.freq_ratio_threshold || *type_out {
                    let reason = if *type_out {
                        EditReason::TypeOutlierReplaced
                    } else {
                        EditReason::OutlierReplaced
                    };
                    fold(&mut working, &rare, &common);
                    replacements.push((rare, common, reason));
                    true
                } else {
                    false
                }
            } else {
                false
            };

            // Fallback for type outliers nothing was similar to
            if !replaced && *type_out {
                if let Some(anchor) = most_frequent_non_candidate(&working, &candidates) {
                    fold(&mut working, candidate, &anchor);
                    replacements.push((
                        candidate.clone(),
                        anchor,
                        EditReason::TypeOutlierReplaced,
                    ));
                }
            }
        }

        // Resolve replacement chains (a -> b, then b -> c)
        let mut edits = Vec::new();
        for (row, cell) in column.cells().enumerate() {
            let Some(text) = cell.render() else { continue };
            let mut current = text.into_owned();
            let mut changed: Option<EditReason> = None;
            loop {
                match replacements.iter().find(|(from, _, _)| *from == current) {
                    Some((_, to, reason)) => {
                        current = to.clone();
                        changed = Some(*reason);
                    }
                    None => break,
                }
            }
            if let Some(reason) = changed {
                tracing::debug!(
                    column = column.name(),
                    row,
                    from = %cell,
                    to = %current,
                    "outlier replaced"
                );
                edits.push(CellEdit {
                    row,
                    before: cell.clone(),
                    after: CellValue::Text(current),
                    reason,
                });
            }
        }

        Ok(CleanOutcome {
            edits,
            retype: None,
            residual_mixed: 0,
        })
    }

    fn priority(&self) -> i32 {
        50
    }
}

/// Most similar partner for a candidate at or above the similarity threshold
fn best_partner(
    candidate: &str,
    working: &IndexMap<String, usize>,
    config: &CleanConfig,
) -> Option<String> {
    let shortlist = close_matches(
        candidate,
        working.keys().map(String::as_str),
        config.close_match_cutoff,
        config.close_match_cap + 1, // the candidate itself is on the list
    );

    let mut best: Option<(f64, String)> = None;
    for other in shortlist {
        if other == candidate {
            continue;
        }
        let sim = trigram_jaccard(candidate, &other);
        if sim >= config.similarity_threshold
            && best.as_ref().map_or(true, |(b, _)| sim > *b)
        {
            best = Some((sim, other));
        }
    }
    best.map(|(_, v)| v)
}

/// Fold the rare value's count into the common one
fn fold(working: &mut IndexMap<String, usize>, rare: &str, common: &str) {
    if let Some(count) = working.shift_remove(rare) {
        if let Some(slot) = working.get_mut(common) {
            *slot += count;
        }
    }
}

fn most_frequent_non_candidate(
    working: &IndexMap<String, usize>,
    candidates: &[(String, bool)],
) -> Option<String> {
    working
        .iter()
        .filter(|(value, _)| !candidates.iter().any(|(c, _)| c == *value))
        .max_by_key(|(_, count)| **count)
        .map(|(value, _)| value.clone())
}

//! Column profiling and type inference
//!
//! [`TypeInference`] walks a column, routes sentinel values to the missing
//! count, votes a [`SemanticType`] per remaining cell, and picks a winner
//! when one type's share clears the dominance threshold. Columns where no
//! type dominates are marked mixed and fall back to `Text`. The mixed flag
//! is what the numeric-coercion strategy keys off.

use crate::matchers::MatcherSet;
use crate::semantic::SemanticType;
use crate::sentinel::SentinelPolicy;
use scour_table::{Column, Table};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Default dominance threshold: a type must claim 90% of evaluated cells
pub const DEFAULT_DOMINANCE: f64 = 0.90;

/// Default support floor: columns with fewer non-missing values are
/// profiled but flagged so downstream repair no-ops
pub const DEFAULT_SUPPORT_FLOOR: usize = 5;

/// Profile of a single column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name
    pub name: String,

    /// Total rows
    pub rows: usize,

    /// Missing cells, including normalized-to-be sentinel hits
    pub missing: usize,

    /// Rows holding sentinel values (still textual in the column)
    pub sentinel_rows: Vec<usize>,

    /// Vote counts per semantic type over evaluated cells
    pub votes: BTreeMap<SemanticType, usize>,

    /// Winning type
    pub inferred: SemanticType,

    /// True when no type reached the dominance threshold
    pub is_mixed: bool,

    /// Distinct non-missing values
    pub unique: usize,

    /// True when evaluated support fell below the floor
    pub low_support: bool,
}

impl ColumnProfile {
    /// Cells that actually received a vote
    #[inline]
    #[must_use]
    pub fn evaluated(&self) -> usize {
        self.votes.values().sum()
    }

    /// Whether repair should leave this column alone for lack of evidence
    #[inline]
    #[must_use]
    pub fn is_low_support(&self) -> bool {
        self.low_support
    }

    /// Share of evaluated cells voting for numeric types
    #[must_use]
    pub fn numeric_share(&self) -> f64 {
        let evaluated = self.evaluated();
        if evaluated == 0 {
            return 0.0;
        }
        let numeric: usize = self
            .votes
            .iter()
            .filter(|(ty, _)| ty.is_numeric())
            .map(|(_, n)| n)
            .sum();
        numeric as f64 / evaluated as f64
    }

    /// Votes for one type
    #[inline]
    #[must_use]
    pub fn votes_for(&self, ty: SemanticType) -> usize {
        self.votes.get(&ty).copied().unwrap_or(0)
    }
}

/// The inference engine
#[derive(Debug)]
pub struct TypeInference {
    matchers: MatcherSet,
    sentinels: SentinelPolicy,
    dominance: f64,
    support_floor: usize,
}

impl TypeInference {
    /// Engine with default matchers, sentinels and thresholds
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            matchers: MatcherSet::default(),
            sentinels: SentinelPolicy::standard(),
            dominance: DEFAULT_DOMINANCE,
            support_floor: DEFAULT_SUPPORT_FLOOR,
        }
    }

    /// Replace the sentinel policy
    #[inline]
    #[must_use]
    pub fn with_sentinels(mut self, sentinels: SentinelPolicy) -> Self {
        self.sentinels = sentinels;
        self
    }

    /// Replace the matcher set
    #[inline]
    #[must_use]
    pub fn with_matchers(mut self, matchers: MatcherSet) -> Self {
        self.matchers = matchers;
        self
    }

    /// Set the dominance threshold (clamped to (0, 1])
    #[inline]
    #[must_use]
    pub fn with_dominance(mut self, dominance: f64) -> Self {
        self.dominance = dominance.clamp(f64::MIN_POSITIVE, 1.0);
        self
    }

    /// Set the support floor
    #[inline]
    #[must_use]
    pub fn with_support_floor(mut self, floor: usize) -> Self {
        self.support_floor = floor;
        self
    }

    /// The sentinel policy in use
    #[inline]
    #[must_use]
    pub fn sentinels(&self) -> &SentinelPolicy {
        &self.sentinels
    }

    /// The matcher set in use
    #[inline]
    #[must_use]
    pub fn matchers(&self) -> &MatcherSet {
        &self.matchers
    }

    /// Profile a single column
    #[must_use]
    pub fn profile_column(&self, column: &Column) -> ColumnProfile {
        let sentinel_rows = self.sentinels.sentinel_rows(column);
        let sentinel_set: HashSet<usize> = sentinel_rows.iter().copied().collect();

        let mut votes: BTreeMap<SemanticType, usize> = BTreeMap::new();
        let mut missing = 0usize;

        for (row, cell) in column.cells().enumerate() {
            let Some(text) = cell.render() else {
                missing += 1;
                continue;
            };
            if sentinel_set.contains(&row) {
                missing += 1;
                continue;
            }
            let ty = self.matchers.classify(text.trim());
            *votes.entry(ty).or_insert(0) += 1;
        }

        let evaluated: usize = votes.values().sum();
        let (inferred, is_mixed) = self.pick_winner(&votes, evaluated);

        let profile = ColumnProfile {
            name: column.name().to_string(),
            rows: column.len(),
            missing,
            sentinel_rows,
            votes,
            inferred,
            is_mixed,
            unique: column.unique_count(),
            low_support: evaluated < self.support_floor,
        };
        tracing::debug!(
            column = profile.name,
            inferred = %profile.inferred,
            mixed = profile.is_mixed,
            missing = profile.missing,
            "profiled column"
        );
        profile
    }

    /// Profile every column of a table, in order
    #[must_use]
    pub fn profile_table(&self, table: &Table) -> Vec<ColumnProfile> {
        table.columns().map(|c| self.profile_column(c)).collect()
    }

    fn pick_winner(
        &self,
        votes: &BTreeMap<SemanticType, usize>,
        evaluated: usize,
    ) -> (SemanticType, bool) {
        if evaluated == 0 {
            return (SemanticType::Unknown, false);
        }

        if let Some((ty, count)) = votes.iter().max_by_key(|(_, n)| **n) {
            if *count as f64 / evaluated as f64 >= self.dominance {
                return (*ty, false);
            }
        }

        // Integers are float-compatible: a column of "1", "2.5", "3" is a
        // float column, not a mixed one.
        let ints = votes.get(&SemanticType::Integer).copied().unwrap_or(0);
        let floats = votes.get(&SemanticType::Float).copied().unwrap_or(0);
        if floats > 0 && (ints + floats) as f64 / evaluated as f64 >= self.dominance {
            return (SemanticType::Float, false);
        }

        (SemanticType::Text, true)
    }
}

impl Default for TypeInference {
    fn default() -> Self {
        Self::new()
    }
}

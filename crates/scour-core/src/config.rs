//! Pipeline configuration.

use scour_clean::CleanConfig;
use scour_infer::{SentinelPolicy, TypeInference, DEFAULT_DOMINANCE, DEFAULT_SUPPORT_FLOOR};

/// Default cell budget: 50 million cells.
pub const DEFAULT_MAX_CELLS: usize = 50_000_000;

/// Configuration for a [`CleaningPipeline`](crate::CleaningPipeline).
///
/// All knobs have working defaults; builders adjust individual values.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Strategy thresholds (outlier share, similarity cutoffs, ...).
    pub clean: CleanConfig,
    /// Dominance share a semantic type needs to win a column.
    pub dominance: f64,
    /// Minimum evaluated cells before repair strategies engage.
    pub support_floor: usize,
    /// Missing-value sentinel detection policy.
    pub sentinels: SentinelPolicy,
    /// Hard ceiling on `rows * columns` before the pipeline refuses to run.
    pub max_cells: usize,
    /// Profile columns in parallel when the table has more than one.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            clean: CleanConfig::default(),
            dominance: DEFAULT_DOMINANCE,
            support_floor: DEFAULT_SUPPORT_FLOOR,
            sentinels: SentinelPolicy::standard(),
            max_cells: DEFAULT_MAX_CELLS,
            parallel: true,
        }
    }
}

impl PipelineConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clean(mut self, clean: CleanConfig) -> Self {
        self.clean = clean;
        self
    }

    #[must_use]
    pub fn with_dominance(mut self, dominance: f64) -> Self {
        self.dominance = dominance;
        self
    }

    #[must_use]
    pub fn with_support_floor(mut self, floor: usize) -> Self {
        self.support_floor = floor;
        self
    }

    #[must_use]
    pub fn with_sentinels(mut self, policy: SentinelPolicy) -> Self {
        self.sentinels = policy;
        self
    }

    #[must_use]
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the type-inference engine this configuration describes.
    #[must_use]
    pub(crate) fn inference(&self) -> TypeInference {
        TypeInference::new()
            .with_dominance(self.dominance)
            .with_support_floor(self.support_floor)
            .with_sentinels(self.sentinels.clone())
    }
}

//! The cleaning pipeline.
//!
//! [`CleaningPipeline`] ties the workspace together: it profiles every
//! column, runs the strategy registry over each one, applies the proposed
//! edits, and emits a [`CleaningReport`]. Profiles are cached by table
//! fingerprint so `profile` followed by `clean` (or repeated cleans of the
//! same table) pays for inference once.
//!
//! Strategy failures are per-column and recoverable: the failing column is
//! left exactly as ingested, the error lands in the report's
//! [`FailureTally`], and the run continues. Only budget violations, shape
//! violations and edit conflicts abort the run.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::report::{CleaningReport, ColumnReport, FailureTally, RunId};
use dashmap::DashMap;
use rayon::prelude::*;
use scour_clean::{default_strategies, EditReason, StrategyRegistry};
use scour_infer::{ColumnProfile, SemanticType, TypeInference};
use scour_table::{CellValue, Column, Table, TableFingerprint};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};

/// The profiling-and-cleaning pipeline
#[derive(Debug)]
pub struct CleaningPipeline {
    config: PipelineConfig,
    inference: TypeInference,
    strategies: StrategyRegistry,
    profile_cache: DashMap<TableFingerprint, Arc<Vec<ColumnProfile>>>,
}

impl CleaningPipeline {
    /// Create a pipeline with the default strategy registry
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        let inference = config.inference();
        let strategies = default_strategies(config.sentinels.clone());
        Self {
            config,
            inference,
            strategies,
            profile_cache: DashMap::new(),
        }
    }

    /// Create a pipeline with a caller-supplied strategy registry
    #[must_use]
    pub fn with_strategies(config: PipelineConfig, strategies: StrategyRegistry) -> Self {
        let inference = config.inference();
        Self {
            config,
            inference,
            strategies,
            profile_cache: DashMap::new(),
        }
    }

    /// The active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Profile every column of a table
    ///
    /// Results are cached by fingerprint; profiling the same table twice
    /// returns the cached profiles.
    ///
    /// # Errors
    /// Returns [`PipelineError::BudgetExceeded`] when the table is over the
    /// cell budget.
    pub fn profile(&self, table: &Table) -> Result<Arc<Vec<ColumnProfile>>, PipelineError> {
        self.check_budget(table)?;
        let fingerprint = TableFingerprint::compute(table);
        if let Some(cached) = self.profile_cache.get(&fingerprint) {
            debug!(fingerprint = %fingerprint.short(), "profile cache hit");
            return Ok(Arc::clone(&cached));
        }
        let profiles = Arc::new(self.compute_profiles(table));
        self.profile_cache
            .insert(fingerprint, Arc::clone(&profiles));
        Ok(profiles)
    }

    /// Clean a table, returning the cleaned table and the run report
    ///
    /// # Errors
    /// Returns [`PipelineError`] on budget violation, on an empty table, or
    /// when an applied edit no longer matches the cell it targeted.
    pub fn clean(&self, mut table: Table) -> Result<(Table, CleaningReport), PipelineError> {
        let run_id = RunId::generate();
        let span = info_span!("clean_run", run_id = %run_id);
        let _guard = span.enter();

        if table.column_count() == 0 {
            return Err(PipelineError::EmptyTable);
        }
        let started = Instant::now();
        let started_at = chrono::Utc::now();
        let fingerprint_before = TableFingerprint::compute(&table);
        let profiles = self.profile(&table)?;

        info!(
            rows = table.row_count(),
            columns = table.column_count(),
            "cleaning table"
        );

        let mut failures = FailureTally::new();
        let mut column_reports = Vec::with_capacity(profiles.len());
        for profile in profiles.iter() {
            let report = self.clean_column(&mut table, profile, &mut failures)?;
            column_reports.push(report);
        }

        let report = CleaningReport {
            run_id,
            started_at,
            fingerprint_before,
            fingerprint_after: TableFingerprint::compute(&table),
            rows: table.row_count(),
            columns: table.column_count(),
            column_reports,
            failures,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            edits = report.total_edits(),
            failures = report.failures.total(),
            elapsed_ms = report.elapsed_ms,
            "run complete"
        );
        Ok((table, report))
    }

    /// Run every applicable strategy over one column and apply the edits
    ///
    /// Edits are staged on a working copy; the table only sees the result
    /// when every strategy either succeeded or declined. A strategy error
    /// therefore leaves the column exactly as ingested.
    fn clean_column(
        &self,
        table: &mut Table,
        profile: &ColumnProfile,
        failures: &mut FailureTally,
    ) -> Result<ColumnReport, PipelineError> {
        let name = profile.name.clone();
        let mut cells: Vec<CellValue> = table.column(&name)?.cells().cloned().collect();
        let mut effective = profile.clone();
        let mut edits: BTreeMap<EditReason, usize> = BTreeMap::new();
        let mut retyped: Option<SemanticType> = None;
        let mut residual_mixed = 0;
        let mut error = None;

        for strategy in self.strategies.strategies() {
            if !strategy.applies_to(&effective) {
                continue;
            }
            let working = Column::new(name.clone(), cells.clone());
            match strategy.clean(&working, &effective, &self.config.clean) {
                Ok(outcome) => {
                    debug!(
                        column = %name,
                        strategy = strategy.name(),
                        edits = outcome.edits.len(),
                        "strategy ran"
                    );
                    for edit in outcome.edits {
                        let slot = cells.get_mut(edit.row).ok_or_else(|| {
                            PipelineError::EditConflict {
                                column: name.clone(),
                                row: edit.row,
                            }
                        })?;
                        if *slot != edit.before {
                            return Err(PipelineError::EditConflict {
                                column: name.clone(),
                                row: edit.row,
                            });
                        }
                        *slot = edit.after;
                        *edits.entry(edit.reason).or_insert(0) += 1;
                    }
                    if let Some(ty) = outcome.retype {
                        retyped = Some(ty);
                        effective.inferred = ty;
                        effective.is_mixed = false;
                    }
                    if outcome.residual_mixed > 0 {
                        residual_mixed = outcome.residual_mixed;
                    }
                }
                Err(err) => {
                    warn!(
                        column = %name,
                        strategy = strategy.name(),
                        error = %err,
                        "strategy failed, column left untouched"
                    );
                    failures.record(&err);
                    error = Some(err.to_string());
                    break;
                }
            }
        }

        let missing_after = if error.is_some() {
            // failed column keeps its ingested content
            edits.clear();
            retyped = None;
            residual_mixed = 0;
            profile.missing
        } else {
            let cleaned = Column::new(name.clone(), cells);
            let missing = cleaned.missing_count();
            table.replace_column(cleaned)?;
            missing
        };

        Ok(ColumnReport {
            name,
            inferred: profile.inferred,
            retyped,
            missing_before: profile.missing,
            missing_after,
            edits,
            residual_mixed,
            error,
        })
    }

    fn check_budget(&self, table: &Table) -> Result<(), PipelineError> {
        let observed = table.cell_count();
        if observed > self.config.max_cells {
            return Err(PipelineError::budget_exceeded(
                observed,
                self.config.max_cells,
            ));
        }
        Ok(())
    }

    fn compute_profiles(&self, table: &Table) -> Vec<ColumnProfile> {
        if self.config.parallel && table.column_count() > 1 {
            let columns: Vec<&Column> = table.columns().collect();
            columns
                .par_iter()
                .map(|column| self.inference.profile_column(column))
                .collect()
        } else {
            self.inference.profile_table(table)
        }
    }
}

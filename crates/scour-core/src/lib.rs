//! scour-core - Pipeline orchestration for the scour workspace
//!
//! Ties the member crates together:
//! - [`PipelineConfig`]: builder-style knobs for inference and cleaning
//! - [`CleaningPipeline`]: profiles columns, runs the strategy registry,
//!   applies edits, caches profiles by table fingerprint
//! - [`CleaningReport`]: the machine-readable record of one run
//!
//! # Example
//!
//! ```rust
//! use scour_core::{CleaningPipeline, PipelineConfig};
//! use scour_table::{Column, Table};
//!
//! let table = Table::from_columns(vec![Column::from_texts(
//!     "score",
//!     ["10", "20", "?", "30", "40", "50"],
//! )])
//! .unwrap();
//!
//! let pipeline = CleaningPipeline::new(PipelineConfig::default());
//! let (cleaned, report) = pipeline.clean(table).unwrap();
//!
//! assert_eq!(cleaned.column("score").unwrap().missing_count(), 1);
//! assert!(report.failures.is_clean());
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::{PipelineConfig, DEFAULT_MAX_CELLS};
pub use error::PipelineError;
pub use pipeline::CleaningPipeline;
pub use report::{CleaningReport, ColumnReport, FailureTally, RunId};

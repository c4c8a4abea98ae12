//! scour-clean - Cleaning strategies for string-typed tabular data
//!
//! Strategies implement [`CleanStrategy`] and propose [`CellEdit`]s rather
//! than mutating tables:
//! - [`SentinelScrub`]: missing-value sentinels become missing cells
//! - [`OutlierRepair`]: rare near-variants fold into their frequent
//!   spelling via trigram similarity
//! - [`NumericCoercion`]: numeric-looking text becomes typed cells, with
//!   overflow as a typed error
//!
//! The [`similarity`] module carries the metrics; [`CleanError`] is the
//! failure taxonomy the pipeline tallies per column.

#![warn(unreachable_pub)]

pub mod coerce;
pub mod error;
pub mod missing;
pub mod outlier;
pub mod registry;
pub mod similarity;
pub mod strategy;

pub use coerce::NumericCoercion;
pub use error::{CleanError, FailureClass};
pub use missing::SentinelScrub;
pub use outlier::OutlierRepair;
pub use registry::{default_strategies, StrategyRegistry};
pub use strategy::{CellEdit, CleanConfig, CleanOutcome, CleanStrategy, EditReason};

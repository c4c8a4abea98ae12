//! scour-infer - Semantic type inference for string-typed columns
//!
//! Decides what a column of raw text actually holds:
//! - [`matchers`]: per-type lexical matchers behind [`TypeMatcher`]
//! - [`SentinelPolicy`]: missing-value sentinel detection, with column
//!   context for the numeric sentinels
//! - [`TypeInference`]: the voting engine producing a [`ColumnProfile`]
//!   per column
//!
//! # Example
//!
//! ```rust
//! use scour_infer::{SemanticType, TypeInference};
//! use scour_table::Column;
//!
//! let column = Column::from_texts("zip", ["10001", "02134", "?", "90210", "60601", "73301"]);
//! let profile = TypeInference::new().profile_column(&column);
//!
//! assert_eq!(profile.inferred, SemanticType::ZipCode);
//! assert_eq!(profile.missing, 1);
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod matchers;
pub mod profile;
pub mod semantic;
pub mod sentinel;

pub use error::InferError;
pub use matchers::{default_matchers, MatcherSet, TypeMatcher};
pub use profile::{ColumnProfile, TypeInference, DEFAULT_DOMINANCE, DEFAULT_SUPPORT_FLOOR};
pub use semantic::SemanticType;
pub use sentinel::SentinelPolicy;

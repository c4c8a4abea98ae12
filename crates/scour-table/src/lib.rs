//! scour-table - Column-oriented table model and ingestion
//!
//! The foundation layer of scour:
//! - [`CellValue`], [`Column`], [`Table`]: the in-memory data model with
//!   shape invariants enforced at construction
//! - [`TableFingerprint`]: Blake3 content fingerprint for cache keys
//! - [`parsers`]: ingestion from DSV and JSON record files
//!
//! # Example
//!
//! ```rust
//! use scour_table::{Column, Table, TableFingerprint};
//!
//! let table = Table::from_columns(vec![
//!     Column::from_texts("city", ["ny", "la"]),
//!     Column::from_texts("zip", ["10001", "90001"]),
//! ]).unwrap();
//!
//! assert_eq!(table.cell_count(), 4);
//! let fp = TableFingerprint::compute(&table);
//! assert_eq!(fp, TableFingerprint::compute(&table));
//! ```

#![warn(unreachable_pub)]

pub mod column;
pub mod error;
pub mod fingerprint;
pub mod parsers;
pub mod table;
pub mod value;

pub use column::Column;
pub use error::{ParseError, TableError};
pub use fingerprint::TableFingerprint;
pub use parsers::{default_parsers, DsvParser, JsonRecordsParser, ParserRegistry, TableParser};
pub use table::Table;
pub use value::CellValue;

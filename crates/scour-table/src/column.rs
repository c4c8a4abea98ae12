//! Columns
//!
//! Provides [`Column`], a named, row-aligned vector of cells, plus the
//! frequency views the profiling and cleaning layers work from.

use crate::value::CellValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named column of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    cells: Vec<CellValue>,
}

impl Column {
    /// Create a column from cells
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Create a column of text cells
    #[must_use]
    pub fn from_texts<I, S>(name: impl Into<String>, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            cells: texts.into_iter().map(|s| CellValue::Text(s.into())).collect(),
        }
    }

    /// Column name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the column has no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at row, if in bounds
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&CellValue> {
        self.cells.get(row)
    }

    /// Iterate over cells
    pub fn cells(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter()
    }

    /// Number of missing cells
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }

    /// Frequency of each rendered non-missing value, in first-seen order
    ///
    /// The counts sum to `len() - missing_count()`.
    #[must_use]
    pub fn frequencies(&self) -> IndexMap<String, usize> {
        let mut freq: IndexMap<String, usize> = IndexMap::new();
        for cell in &self.cells {
            if let Some(text) = cell.render() {
                *freq.entry(text.into_owned()).or_insert(0) += 1;
            }
        }
        freq
    }

    /// Number of distinct rendered non-missing values
    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.frequencies().len()
    }

    pub(crate) fn set(&mut self, row: usize, value: CellValue) -> Option<CellValue> {
        let slot = self.cells.get_mut(row)?;
        Some(std::mem::replace(slot, value))
    }

    pub(crate) fn cells_slice(&self) -> &[CellValue] {
        &self.cells
    }
}

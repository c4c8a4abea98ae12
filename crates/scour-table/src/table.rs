//! Tables
//!
//! Provides [`Table`], an ordered set of equal-length named columns. Shape
//! invariants (equal lengths, unique names) are enforced at construction and
//! on every insertion, so downstream layers never see ragged data.

use crate::column::Column;
use crate::error::TableError;
use crate::value::CellValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered collection of equal-length columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: IndexMap<String, Column>,
}

impl Table {
    /// Create an empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from columns
    ///
    /// # Errors
    /// Returns an error on duplicate names or mismatched lengths.
    pub fn from_columns<I>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = Column>,
    {
        let mut table = Self::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Append a column
    ///
    /// # Errors
    /// Returns an error if the name is taken or the length disagrees with
    /// the existing columns.
    pub fn push_column(&mut self, column: Column) -> Result<(), TableError> {
        if self.columns.contains_key(column.name()) {
            return Err(TableError::DuplicateColumn(column.name().to_string()));
        }
        if let Some(rows) = self.row_count_inner() {
            if column.len() != rows {
                return Err(TableError::RaggedColumn {
                    column: column.name().to_string(),
                    expected: rows,
                    actual: column.len(),
                });
            }
        }
        self.columns.insert(column.name().to_string(), column);
        Ok(())
    }

    /// Number of rows (0 for a table with no columns)
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count_inner().unwrap_or(0)
    }

    /// Number of columns
    #[inline]
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total cell count, for budget checks
    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.column_count()
    }

    /// Column by name
    ///
    /// # Errors
    /// Returns [`TableError::UnknownColumn`] if absent.
    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.columns
            .get(name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    /// Iterate over columns in insertion order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Overwrite a cell, returning the previous value
    ///
    /// # Errors
    /// Returns an error for unknown columns or out-of-bounds rows.
    pub fn set_cell(
        &mut self,
        column: &str,
        row: usize,
        value: CellValue,
    ) -> Result<CellValue, TableError> {
        let col = self
            .columns
            .get_mut(column)
            .ok_or_else(|| TableError::UnknownColumn(column.to_string()))?;
        let rows = col.len();
        col.set(row, value).ok_or_else(|| TableError::RowOutOfBounds {
            column: column.to_string(),
            row,
            rows,
        })
    }

    /// Replace a column wholesale, keeping its position
    ///
    /// # Errors
    /// Returns an error if the column is unknown or the replacement length
    /// disagrees.
    pub fn replace_column(&mut self, column: Column) -> Result<(), TableError> {
        let rows = self.row_count();
        if column.len() != rows {
            return Err(TableError::RaggedColumn {
                column: column.name().to_string(),
                expected: rows,
                actual: column.len(),
            });
        }
        let slot = self
            .columns
            .get_mut(column.name())
            .ok_or_else(|| TableError::UnknownColumn(column.name().to_string()))?;
        *slot = column;
        Ok(())
    }

    /// Render the table as delimiter-separated values with a header row
    ///
    /// Empty fields and fields containing the delimiter, a quote or a
    /// newline are quoted with doubled inner quotes. Missing cells render
    /// as quoted empty fields.
    #[must_use]
    pub fn to_dsv(&self, delimiter: char) -> String {
        let mut out = String::new();
        let header: Vec<String> = self
            .column_names()
            .map(|n| quote_field(n, delimiter))
            .collect();
        out.push_str(&header.join(&delimiter.to_string()));
        out.push('\n');

        for row in 0..self.row_count() {
            let fields: Vec<String> = self
                .columns()
                .map(|col| {
                    let text = col
                        .get(row)
                        .and_then(CellValue::render)
                        .unwrap_or_default();
                    quote_field(&text, delimiter)
                })
                .collect();
            out.push_str(&fields.join(&delimiter.to_string()));
            out.push('\n');
        }
        out
    }

    fn row_count_inner(&self) -> Option<usize> {
        self.columns.values().next().map(Column::len)
    }
}

fn quote_field(field: &str, delimiter: char) -> String {
    // Empty fields are quoted so a single-column row of "" survives the
    // reader's blank-line skipping
    if field.is_empty()
        || field.contains(delimiter)
        || field.contains('"')
        || field.contains('\n')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_column_table() -> Table {
        Table::from_columns(vec![
            Column::from_texts("city", ["ny", "la"]),
            Column::from_texts("zip", ["10001", "90001"]),
        ])
        .unwrap()
    }

    #[test]
    fn shape_counts() {
        let table = two_column_table();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.cell_count(), 4);
    }

    #[test]
    fn rejects_duplicate_column() {
        let mut table = two_column_table();
        let result = table.push_column(Column::from_texts("city", ["x", "y"]));
        assert!(matches!(result, Err(TableError::DuplicateColumn(_))));
    }

    #[test]
    fn rejects_ragged_column() {
        let mut table = two_column_table();
        let result = table.push_column(Column::from_texts("state", ["ny"]));
        assert!(matches!(result, Err(TableError::RaggedColumn { .. })));
    }

    #[test]
    fn unknown_column_lookup() {
        let table = two_column_table();
        assert!(matches!(
            table.column("nope"),
            Err(TableError::UnknownColumn(_))
        ));
    }

    #[test]
    fn set_cell_returns_previous() {
        let mut table = two_column_table();
        let prev = table.set_cell("city", 0, CellValue::Missing).unwrap();
        assert_eq!(prev, CellValue::text("ny"));
        assert!(matches!(
            table.set_cell("city", 9, CellValue::Missing),
            Err(TableError::RowOutOfBounds { .. })
        ));
    }

    #[test]
    fn replace_column_keeps_position() {
        let mut table = two_column_table();
        table
            .replace_column(Column::from_texts("city", ["sf", "la"]))
            .unwrap();
        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["city", "zip"]);
        assert_eq!(table.column("city").unwrap().get(0), Some(&CellValue::text("sf")));
    }

    #[test]
    fn to_dsv_quotes_when_needed() {
        let table = Table::from_columns(vec![
            Column::from_texts("name", ["plain", "has,comma", "has\"quote"]),
            Column::new(
                "n",
                vec![CellValue::Int(1), CellValue::Missing, CellValue::Int(3)],
            ),
        ])
        .unwrap();
        let dsv = table.to_dsv(',');
        let lines: Vec<_> = dsv.lines().collect();
        assert_eq!(lines[0], "name,n");
        assert_eq!(lines[1], "plain,1");
        assert_eq!(lines[2], "\"has,comma\",\"\"");
        assert_eq!(lines[3], "\"has\"\"quote\",3");
    }

    #[test]
    fn header_only_table_has_zero_rows() {
        let table =
            Table::from_columns(vec![Column::from_texts("a", Vec::<String>::new())]).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.cell_count(), 0);
    }
}

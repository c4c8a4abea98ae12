//! JSON record-array parser
//!
//! Parses a JSON array of flat objects into a [`Table`]. The union of keys
//! across records forms the columns, in first-seen order; keys absent from a
//! record become [`CellValue::Missing`]. Nested arrays and objects are
//! rejected; this is tabular ingestion, not document flattening.

use crate::column::Column;
use crate::error::ParseError;
use crate::parsers::TableParser;
use crate::table::Table;
use crate::value::CellValue;
use indexmap::IndexSet;
use serde_json::Value;

/// Parser for JSON arrays of flat records
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRecordsParser;

impl JsonRecordsParser {
    /// Create new parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TableParser for JsonRecordsParser {
    fn parse(&self, content: &str) -> Result<Table, ParseError> {
        let root: Value = serde_json::from_str(content)?;
        let records = match root {
            Value::Array(records) => records,
            other => {
                return Err(ParseError::malformed(
                    1,
                    format!("expected a JSON array of records, got {}", kind(&other)),
                ))
            }
        };

        // First pass: column order is the first-seen key order
        let mut keys: IndexSet<String> = IndexSet::new();
        for (i, record) in records.iter().enumerate() {
            let Value::Object(map) = record else {
                return Err(ParseError::malformed(
                    i + 1,
                    format!("record {} is {}, expected an object", i, kind(record)),
                ));
            };
            for key in map.keys() {
                keys.insert(key.clone());
            }
        }

        // Second pass: fill columns, absent keys become Missing
        let mut columns: Vec<Vec<CellValue>> =
            vec![Vec::with_capacity(records.len()); keys.len()];
        for (i, record) in records.iter().enumerate() {
            let Value::Object(map) = record else {
                unreachable!("record shape checked in first pass");
            };
            for (slot, key) in columns.iter_mut().zip(keys.iter()) {
                let cell = match map.get(key) {
                    None | Some(Value::Null) => CellValue::Missing,
                    Some(value) => scalar_cell(value, i, key)?,
                };
                slot.push(cell);
            }
        }

        let table = Table::from_columns(
            keys.into_iter()
                .zip(columns)
                .map(|(name, cells)| Column::new(name, cells)),
        )?;
        Ok(table)
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }
}

fn scalar_cell(value: &Value, record: usize, key: &str) -> Result<CellValue, ParseError> {
    match value {
        Value::String(s) => Ok(CellValue::Text(s.clone())),
        Value::Bool(b) => Ok(CellValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(CellValue::Int(i))
            } else {
                // u64 beyond i64 range or a float; as_f64 covers both
                Ok(CellValue::Float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        Value::Array(_) | Value::Object(_) => Err(ParseError::malformed(
            record + 1,
            format!("nested value under key '{key}'"),
        )),
        Value::Null => Ok(CellValue::Missing),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

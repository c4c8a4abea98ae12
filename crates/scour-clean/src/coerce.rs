//! Numeric coercion
//!
//! Turns textual numbers into typed cells:
//! - integer columns parse to `Int`, thousands separators stripped, with
//!   i64 overflow surfacing as a clean error instead of a panic
//! - percentage columns strip the `%` and divide by 100
//! - float columns parse to `Float`
//! - mixed columns coerce the cells that parse and count the rest, so the
//!   caller can see residual mixing
//!
//! ZIP code columns never reach this strategy: leading zeros are data.

use crate::error::CleanError;
use crate::strategy::{CellEdit, CleanConfig, CleanOutcome, CleanStrategy, EditReason};
use scour_infer::{ColumnProfile, SemanticType};
use scour_table::{CellValue, Column};

/// Minimum numeric vote share for coercing a mixed column
const MIXED_NUMERIC_SHARE: f64 = 0.5;

/// Coerces numeric-looking text into typed cells
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericCoercion;

impl NumericCoercion {
    /// Create the coercion strategy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CleanStrategy for NumericCoercion {
    fn name(&self) -> &'static str {
        "numeric-coercion"
    }

    fn applies_to(&self, profile: &ColumnProfile) -> bool {
        if profile.rows == 0 || profile.inferred == SemanticType::ZipCode {
            return false;
        }
        profile.inferred.is_numeric()
            || (profile.is_mixed && profile.numeric_share() >= MIXED_NUMERIC_SHARE)
    }

    fn clean(
        &self,
        column: &Column,
        profile: &ColumnProfile,
        _config: &CleanConfig,
    ) -> Result<CleanOutcome, CleanError> {
        let mut edits = Vec::new();
        let mut residual = 0usize;

        for (row, cell) in column.cells().enumerate() {
            // Only textual cells need coercing
            let Some(text) = cell.as_text() else { continue };
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }

            let coerced = match profile.inferred {
                SemanticType::Integer => parse_int(column.name(), trimmed)?.map(CellValue::Int),
                SemanticType::Float => parse_float(trimmed).map(CellValue::Float),
                SemanticType::Percentage => parse_percent(trimmed).map(CellValue::Float),
                // Mixed column: take whatever numeric reading the value has
                _ => try_any_numeric(column.name(), trimmed)?,
            };

            match coerced {
                Some(value) => edits.push(CellEdit {
                    row,
                    before: cell.clone(),
                    after: value,
                    reason: EditReason::NumericCoerced,
                }),
                // Stayed textual: residue, never an edit
                None => residual += 1,
            }
        }

        Ok(CleanOutcome {
            edits,
            retype: None,
            residual_mixed: residual,
        })
    }

    fn priority(&self) -> i32 {
        10
    }
}

/// Parse an integer-form value, reporting overflow as a typed error
///
/// Returns `Ok(None)` for values that do not read as integers; on an
/// integer-dominant column those stay textual and count as residue. `Err`
/// is reserved for values that read as integers but exceed i64.
fn parse_int(column: &str, value: &str) -> Result<Option<i64>, CleanError> {
    if !integer_form(value) {
        return Ok(None);
    }
    let compact: String = value.chars().filter(|c| *c != ',').collect();
    match compact.parse::<i64>() {
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(CleanError::NumericOverflow {
            column: column.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Digits with an optional sign, either ungrouped or in well-formed
/// thousands groups: "5,000" reads as an integer, "1,23" does not
fn integer_form(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    if digits.is_empty() {
        return false;
    }
    match digits.split_once(',') {
        Some((first, rest)) => {
            (1..=3).contains(&first.len())
                && first.chars().all(|c| c.is_ascii_digit())
                && rest
                    .split(',')
                    .all(|group| group.len() == 3 && group.chars().all(|c| c.is_ascii_digit()))
        }
        None => digits.chars().all(|c| c.is_ascii_digit()),
    }
}

fn parse_float(value: &str) -> Option<f64> {
    // Reject the textual specials; those are sentinels, not data
    if value.eq_ignore_ascii_case("nan")
        || value.eq_ignore_ascii_case("inf")
        || value.eq_ignore_ascii_case("-inf")
        || value.eq_ignore_ascii_case("infinity")
    {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_percent(value: &str) -> Option<f64> {
    let body = value.strip_suffix('%')?.trim_end();
    parse_float(body).map(|v| v / 100.0)
}

fn try_any_numeric(column: &str, value: &str) -> Result<Option<CellValue>, CleanError> {
    if let Some(v) = parse_int(column, value)? {
        return Ok(Some(CellValue::Int(v)));
    }
    if let Some(v) = parse_percent(value) {
        return Ok(Some(CellValue::Float(v)));
    }
    if let Some(v) = parse_float(value) {
        return Ok(Some(CellValue::Float(v)));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scour_infer::TypeInference;

    fn profiled(values: &[&str]) -> (Column, ColumnProfile) {
        let column = Column::from_texts("c", values.iter().copied());
        let prof = TypeInference::new().with_support_floor(1).profile_column(&column);
        (column, prof)
    }

    fn applied(values: &[&str]) -> (CleanOutcome, ColumnProfile) {
        let (column, prof) = profiled(values);
        let strategy = NumericCoercion::new();
        assert!(strategy.applies_to(&prof), "strategy should apply");
        let outcome = strategy
            .clean(&column, &prof, &CleanConfig::default())
            .unwrap();
        (outcome, prof)
    }

    #[test]
    fn integer_column_coerced() {
        let (outcome, _) = applied(&["1", "2", "5,000", "-3"]);
        let after: Vec<_> = outcome.edits.iter().map(|e| e.after.clone()).collect();
        assert_eq!(
            after,
            vec![
                CellValue::Int(1),
                CellValue::Int(2),
                CellValue::Int(5000),
                CellValue::Int(-3)
            ]
        );
    }

    #[test]
    fn overflow_is_error_not_panic() {
        let (column, prof) = profiled(&["1", "2", "99999999999999999999"]);
        let result = NumericCoercion::new().clean(&column, &prof, &CleanConfig::default());
        match result {
            Err(CleanError::NumericOverflow { column, .. }) => assert_eq!(column, "c"),
            other => panic!("expected overflow, got {other:?}"),
        }
    }

    #[test]
    fn percentage_column_scaled() {
        let (outcome, _) = applied(&["10%", "25.5 %", "100%"]);
        let after: Vec<_> = outcome.edits.iter().map(|e| e.after.clone()).collect();
        assert_eq!(
            after,
            vec![
                CellValue::Float(0.1),
                CellValue::Float(0.255),
                CellValue::Float(1.0)
            ]
        );
    }

    #[test]
    fn float_column_coerced() {
        let (outcome, _) = applied(&["1.5", "2.25", "-0.5", "3.0"]);
        assert_eq!(outcome.edits.len(), 4);
        assert_eq!(outcome.edits[0].after, CellValue::Float(1.5));
    }

    #[test]
    fn int_and_float_mix_becomes_float_column() {
        // Profile unifies these into Float; ints parse as floats among them
        let (outcome, prof) = applied(&["1", "2.5", "3", "4.5"]);
        assert_eq!(prof.inferred, SemanticType::Float);
        assert_eq!(outcome.edits.len(), 4);
        assert_eq!(outcome.edits[0].after, CellValue::Float(1.0));
    }

    #[test]
    fn mixed_column_counts_residue() {
        let (outcome, prof) = applied(&["1", "2", "three", "4", "5", "6%"]);
        assert!(prof.is_mixed);
        assert_eq!(outcome.residual_mixed, 1);
        // "6%" coerced via its percent reading
        let last = outcome.edits.iter().find(|e| e.row == 5).unwrap();
        assert_eq!(last.after, CellValue::Float(0.06));
    }

    #[test]
    fn padded_text_on_integer_column_is_residue_not_an_edit() {
        let (outcome, prof) = applied(&["1", "2", "3", "4", "5", "6", "7", "8", "9", " abc "]);
        assert_eq!(prof.inferred, SemanticType::Integer);
        assert_eq!(outcome.residual_mixed, 1);
        assert!(outcome.edits.iter().all(|e| e.row != 9));
    }

    #[test]
    fn malformed_thousands_grouping_is_residue() {
        let (outcome, prof) = applied(&["1", "2", "3", "4", "5", "6", "7", "8", "9", "1,23"]);
        assert_eq!(prof.inferred, SemanticType::Integer);
        assert_eq!(outcome.residual_mixed, 1);
        assert!(outcome.edits.iter().all(|e| e.after != CellValue::Int(123)));
    }

    #[test]
    fn well_formed_grouping_accepted() {
        assert!(integer_form("5,000"));
        assert!(integer_form("-1,234,567"));
        assert!(!integer_form("1,23"));
        assert!(!integer_form("12,34,56"));
        assert!(!integer_form(",000"));
    }

    #[test]
    fn zip_codes_never_coerced() {
        let (_, prof) = profiled(&["10001", "02134", "90210"]);
        assert_eq!(prof.inferred, SemanticType::ZipCode);
        assert!(!NumericCoercion::new().applies_to(&prof));
    }

    #[test]
    fn text_column_not_applicable() {
        let (_, prof) = profiled(&["red", "green", "blue"]);
        assert!(!NumericCoercion::new().applies_to(&prof));
    }

    #[test]
    fn missing_cells_skipped() {
        let column = Column::new(
            "c",
            vec![CellValue::text("1"), CellValue::Missing, CellValue::Int(3)],
        );
        let prof = TypeInference::new().with_support_floor(1).profile_column(&column);
        let outcome = NumericCoercion::new()
            .clean(&column, &prof, &CleanConfig::default())
            .unwrap();
        // Only the textual "1" needs coercing
        assert_eq!(outcome.edits.len(), 1);
        assert_eq!(outcome.edits[0].row, 0);
    }
}

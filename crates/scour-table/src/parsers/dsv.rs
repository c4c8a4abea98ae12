//! Delimiter-separated values parser
//!
//! Hand-written reader for comma/tab-separated files with RFC-4180-style
//! quoting: fields may be wrapped in double quotes, inner quotes double up,
//! and quoted fields may contain delimiters and newlines. A header row is
//! required and ragged records are rejected with their line number.

use crate::column::Column;
use crate::error::ParseError;
use crate::parsers::TableParser;
use crate::table::Table;

/// Parser for delimiter-separated values
#[derive(Debug, Clone, Copy)]
pub struct DsvParser {
    delimiter: char,
    extensions: &'static [&'static str],
}

impl DsvParser {
    /// Parser for a custom delimiter, registered under `.dsv`
    #[inline]
    #[must_use]
    pub fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            extensions: &["dsv"],
        }
    }

    /// Comma-separated parser for `.csv`
    #[inline]
    #[must_use]
    pub fn comma() -> Self {
        Self {
            delimiter: ',',
            extensions: &["csv"],
        }
    }

    /// Tab-separated parser for `.tsv`
    #[inline]
    #[must_use]
    pub fn tab() -> Self {
        Self {
            delimiter: '\t',
            extensions: &["tsv"],
        }
    }

    /// The configured delimiter
    #[inline]
    #[must_use]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }
}

impl TableParser for DsvParser {
    fn parse(&self, content: &str) -> Result<Table, ParseError> {
        let records = read_records(content, self.delimiter)?;
        let mut records = records.into_iter();

        let (_, header) = records
            .next()
            .ok_or_else(|| ParseError::Empty("no header row".to_string()))?;
        let width = header.len();

        let mut columns: Vec<Vec<String>> = vec![Vec::new(); width];
        for (line, record) in records {
            if record.len() != width {
                return Err(ParseError::malformed(
                    line,
                    format!("expected {} fields, got {}", width, record.len()),
                ));
            }
            for (slot, field) in columns.iter_mut().zip(record) {
                slot.push(field);
            }
        }

        let table = Table::from_columns(
            header
                .into_iter()
                .zip(columns)
                .map(|(name, cells)| Column::from_texts(name, cells)),
        )?;
        Ok(table)
    }

    fn extensions(&self) -> &[&str] {
        self.extensions
    }
}

/// Split content into records of fields, tracking 1-based starting lines
fn read_records(
    content: &str,
    delimiter: char,
) -> Result<Vec<(usize, Vec<String>)>, ParseError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_quoted = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut saw_any = false;
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        saw_any = true;
        if in_quotes {
            match ch {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' => {
                if !field.is_empty() {
                    return Err(ParseError::malformed(line, "quote inside unquoted field"));
                }
                in_quotes = true;
                field_quoted = true;
            }
            '\r' => {
                // CRLF handled at the matching newline
                if chars.peek() != Some(&'\n') {
                    return Err(ParseError::malformed(line, "bare carriage return"));
                }
            }
            '\n' => {
                let quoted = std::mem::take(&mut field_quoted);
                fields.push(std::mem::take(&mut field));
                // Skip blank lines; a lone quoted "" is a real empty field
                if fields.len() > 1 || !fields[0].is_empty() || quoted {
                    records.push((record_line, std::mem::take(&mut fields)));
                } else {
                    fields.clear();
                }
                line += 1;
                record_line = line;
            }
            c if c == delimiter => {
                field_quoted = false;
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(ParseError::malformed(record_line, "unterminated quoted field"));
    }
    if !field.is_empty() || !fields.is_empty() || field_quoted {
        fields.push(field);
        records.push((record_line, fields));
    }
    if !saw_any {
        return Err(ParseError::Empty("no content".to_string()));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;
    use pretty_assertions::assert_eq;

    fn cell(table: &Table, col: &str, row: usize) -> String {
        table
            .column(col)
            .unwrap()
            .get(row)
            .and_then(CellValue::render)
            .unwrap()
            .into_owned()
    }

    #[test]
    fn parses_plain_csv() {
        let table = DsvParser::comma()
            .parse("city,zip\nny,10001\nla,90001\n")
            .unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(cell(&table, "city", 1), "la");
        assert_eq!(cell(&table, "zip", 0), "10001");
    }

    #[test]
    fn parses_quoted_fields() {
        let table = DsvParser::comma()
            .parse("name,notes\n\"smith, j\",\"said \"\"hi\"\"\"\n")
            .unwrap();
        assert_eq!(cell(&table, "name", 0), "smith, j");
        assert_eq!(cell(&table, "notes", 0), "said \"hi\"");
    }

    #[test]
    fn quoted_field_may_contain_newline() {
        let table = DsvParser::comma()
            .parse("a,b\n\"line1\nline2\",x\n")
            .unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(cell(&table, "a", 0), "line1\nline2");
    }

    #[test]
    fn handles_crlf() {
        let table = DsvParser::comma().parse("a,b\r\n1,2\r\n").unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(cell(&table, "b", 0), "2");
    }

    #[test]
    fn empty_input_is_error() {
        let result = DsvParser::comma().parse("");
        assert!(matches!(result, Err(ParseError::Empty(_))));
    }

    #[test]
    fn header_only_yields_zero_rows() {
        let table = DsvParser::comma().parse("a,b\n").unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn ragged_record_names_line() {
        let result = DsvParser::comma().parse("a,b\n1,2\n3\n");
        match result {
            Err(ParseError::MalformedRecord { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_header_rejected() {
        let result = DsvParser::comma().parse("a,a\n1,2\n");
        assert!(matches!(result, Err(ParseError::Shape(_))));
    }

    #[test]
    fn unterminated_quote_is_error() {
        let result = DsvParser::comma().parse("a,b\n\"open,2\n");
        assert!(matches!(result, Err(ParseError::MalformedRecord { .. })));
    }

    #[test]
    fn tab_delimiter() {
        let table = DsvParser::tab().parse("a\tb\n1\t2\n").unwrap();
        assert_eq!(cell(&table, "a", 0), "1");
    }

    #[test]
    fn empty_fields_preserved() {
        let table = DsvParser::comma().parse("a,b,c\n1,,3\n").unwrap();
        assert_eq!(cell(&table, "b", 0), "");
    }

    #[test]
    fn round_trips_through_to_dsv() {
        let input = "name,n\nplain,1\n\"has,comma\",2\n";
        let table = DsvParser::comma().parse(input).unwrap();
        assert_eq!(table.to_dsv(','), input);
    }

    #[test]
    fn single_column_empty_rows_round_trip() {
        let table = Table::from_columns(vec![Column::from_texts("a", ["x", "", "y", ""])]).unwrap();
        let reparsed = DsvParser::comma().parse(&table.to_dsv(',')).unwrap();
        assert_eq!(reparsed.row_count(), 4);
        assert_eq!(cell(&reparsed, "a", 1), "");
        assert_eq!(cell(&reparsed, "a", 3), "");
    }

    #[test]
    fn blank_lines_still_skipped() {
        let table = DsvParser::comma().parse("a\nx\n\ny\n\n").unwrap();
        assert_eq!(table.row_count(), 2);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Quoting survives a write/parse cycle for awkward field content
            #[test]
            fn quoting_round_trips(
                a in proptest::collection::vec("[a-z]{0,8}", 1..6),
                b in proptest::collection::vec("[a-z,\"\n ]{0,12}", 1..6),
            ) {
                let rows = a.len().min(b.len());
                let table = Table::from_columns(vec![
                    Column::from_texts("a", a[..rows].to_vec()),
                    Column::from_texts("b", b[..rows].to_vec()),
                ])
                .unwrap();

                let reparsed = DsvParser::comma().parse(&table.to_dsv(',')).unwrap();
                prop_assert_eq!(table, reparsed);
            }
        }
    }
}

//! Table fingerprints
//!
//! Provides [`TableFingerprint`], a Blake3 hash over a table's column names
//! and cell contents. Equal tables fingerprint equal regardless of how they
//! were ingested, which makes the fingerprint usable as a profile-cache key.

use crate::table::Table;
use crate::value::CellValue;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A 32-byte Blake3 fingerprint of a table's contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableFingerprint([u8; 32]);

impl TableFingerprint {
    /// Wrap raw bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Compute the fingerprint of a table
    ///
    /// Hashes column names and cells in order with type tags and length
    /// prefixes, so `["ab","c"]` and `["a","bc"]` never collide.
    #[must_use]
    pub fn compute(table: &Table) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(table.column_count() as u64).to_le_bytes());
        hasher.update(&(table.row_count() as u64).to_le_bytes());
        for column in table.columns() {
            hash_str(&mut hasher, column.name());
            for cell in column.cells() {
                match cell {
                    CellValue::Text(s) => {
                        hasher.update(&[0]);
                        hash_str(&mut hasher, s);
                    }
                    CellValue::Int(v) => {
                        hasher.update(&[1]);
                        hasher.update(&v.to_le_bytes());
                    }
                    CellValue::Float(v) => {
                        hasher.update(&[2]);
                        hasher.update(&v.to_le_bytes());
                    }
                    CellValue::Bool(v) => {
                        hasher.update(&[3, u8::from(*v)]);
                    }
                    CellValue::Missing => {
                        hasher.update(&[4]);
                    }
                }
            }
        }
        Self(*hasher.finalize().as_bytes())
    }

    /// Reference to the underlying bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

fn hash_str(hasher: &mut blake3::Hasher, s: &str) {
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

impl Display for TableFingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for TableFingerprint {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

impl serde::Serialize for TableFingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for TableFingerprint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;

    fn table(values: &[&str]) -> Table {
        Table::from_columns(vec![Column::from_texts("v", values.iter().copied())]).unwrap()
    }

    #[test]
    fn deterministic() {
        let t = table(&["a", "b"]);
        assert_eq!(TableFingerprint::compute(&t), TableFingerprint::compute(&t));
    }

    #[test]
    fn sensitive_to_content() {
        assert_ne!(
            TableFingerprint::compute(&table(&["a", "b"])),
            TableFingerprint::compute(&table(&["a", "c"]))
        );
    }

    #[test]
    fn no_concatenation_collisions() {
        assert_ne!(
            TableFingerprint::compute(&table(&["ab", "c"])),
            TableFingerprint::compute(&table(&["a", "bc"]))
        );
    }

    #[test]
    fn text_and_coerced_differ() {
        let text = table(&["1"]);
        let coerced =
            Table::from_columns(vec![Column::new("v", vec![CellValue::Int(1)])]).unwrap();
        assert_ne!(
            TableFingerprint::compute(&text),
            TableFingerprint::compute(&coerced)
        );
    }

    #[test]
    fn display_and_parse_round_trip() {
        let fp = TableFingerprint::compute(&table(&["x"]));
        let parsed: TableFingerprint = fp.to_string().parse().unwrap();
        assert_eq!(fp, parsed);
        assert_eq!(fp.short().len(), 16);
    }

    #[test]
    fn serde_as_hex_string() {
        let fp = TableFingerprint::compute(&table(&["x"]));
        let json = serde_json::to_string(&fp).unwrap();
        assert!(json.starts_with('"'));
        let back: TableFingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(fp, back);
    }
}

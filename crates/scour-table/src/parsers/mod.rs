//! Table ingestion parsers
//!
//! Converts external file formats into [`Table`]s:
//! - Delimiter-separated values (`.csv`, `.tsv`, `.dsv`)
//! - JSON record arrays (`.json`) via serde_json
//!
//! Parsers implement [`TableParser`] and register in a [`ParserRegistry`]
//! that dispatches on file extension.

use crate::error::ParseError;
use crate::table::Table;
use std::path::Path;

mod dsv;
mod json;

pub use dsv::DsvParser;
pub use json::JsonRecordsParser;

/// Parser trait for converting file content into tables
pub trait TableParser: Send + Sync + 'static {
    /// Parse content into a table
    fn parse(&self, content: &str) -> Result<Table, ParseError>;

    /// Supported file extensions (without dot)
    fn extensions(&self) -> &[&str];

    /// Check if this parser can handle the given path
    fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions().contains(&ext.as_str())
            })
            .unwrap_or(false)
    }

    /// Parser priority (higher = tried first when multiple parsers match)
    fn priority(&self) -> i32 {
        0
    }
}

/// Registry of ingestion parsers with extension dispatch
pub struct ParserRegistry {
    parsers: Vec<Box<dyn TableParser>>,
}

impl ParserRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Register a parser
    pub fn register<P: TableParser>(&mut self, parser: P) {
        self.parsers.push(Box::new(parser));
        self.parsers.sort_by_key(|p| std::cmp::Reverse(p.priority()));
    }

    /// Number of registered parsers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Whether the registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// All supported extensions
    #[must_use]
    pub fn all_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self
            .parsers
            .iter()
            .flat_map(|p| p.extensions().iter().copied())
            .collect();
        exts.sort_unstable();
        exts.dedup();
        exts
    }

    /// Find the highest-priority parser for a path
    #[must_use]
    pub fn parser_for(&self, path: &Path) -> Option<&dyn TableParser> {
        self.parsers
            .iter()
            .find(|p| p.can_parse(path))
            .map(Box::as_ref)
    }

    /// Read and parse a file through the matching parser
    ///
    /// # Errors
    /// Returns an error when no parser matches the extension, the file
    /// cannot be read, or parsing fails.
    pub fn parse_path(&self, path: &Path) -> Result<Table, ParseError> {
        let parser = self.parser_for(path).ok_or_else(|| {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string();
            ParseError::NoParserForExtension(ext)
        })?;
        let content =
            std::fs::read_to_string(path).map_err(|e| ParseError::io_error(path, e))?;
        tracing::debug!(path = %path.display(), "parsing table");
        parser.parse(&content)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        default_parsers()
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("parser_count", &self.parsers.len())
            .field("extensions", &self.all_extensions())
            .finish()
    }
}

/// Registry with the built-in parsers
#[must_use]
pub fn default_parsers() -> ParserRegistry {
    let mut registry = ParserRegistry::new();
    registry.register(DsvParser::comma());
    registry.register(DsvParser::tab());
    registry.register(JsonRecordsParser::new());
    registry
}

//! File format dispatch
//!
//! Exactly two formats are supported, picked from the filename extension.

use crate::delimited::{CsvExporter, CsvImporter};
use crate::error::{TabularError, TabularResult};
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::types::{NullPolicy, TabularDocument};
use std::fmt;

pub const SPREADSHEET: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const TEXT_CSV: &str = "text/csv";

/// Supported tabular file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Xlsx,
    Csv,
}

/// Serialized file payload with its MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

impl FileFormat {
    /// Resolve the format of a filename from its trailing extension, case-insensitive
    pub fn resolve(filename: &str) -> TabularResult<Self> {
        let extension = file_type(filename);
        match extension.as_str() {
            "xlsx" => Ok(FileFormat::Xlsx),
            "csv" => Ok(FileFormat::Csv),
            _ => Err(TabularError::Format { extension }),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Xlsx => "xlsx",
            FileFormat::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            FileFormat::Xlsx => SPREADSHEET,
            FileFormat::Csv => TEXT_CSV,
        }
    }

    /// xlsx keeps the legacy literal `null`, csv writes an empty field
    pub fn null_policy(&self) -> NullPolicy {
        match self {
            FileFormat::Xlsx => NullPolicy::Literal,
            FileFormat::Csv => NullPolicy::Empty,
        }
    }

    /// Serialize a document in this format
    pub fn render(&self, doc: &TabularDocument) -> TabularResult<Rendered> {
        let bytes = match self {
            FileFormat::Xlsx => ExcelExporter::new(doc).export()?,
            FileFormat::Csv => CsvExporter::new(doc).export()?,
        };
        Ok(Rendered {
            bytes,
            content_type: self.content_type(),
        })
    }

    /// Parse file content in this format
    pub fn parse(&self, bytes: &[u8]) -> TabularResult<TabularDocument> {
        match self {
            FileFormat::Xlsx => ExcelImporter::new(bytes).import(),
            FileFormat::Csv => CsvImporter::new(bytes).import(),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Trailing `.`-separated token of a filename, lowercased
pub fn file_type(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

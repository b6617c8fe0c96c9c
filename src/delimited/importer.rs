//! CSV importer implementation - .csv → rows

use crate::error::{TabularError, TabularResult};
use crate::header::to_field_name;
use crate::types::{FieldMapping, TabularDocument, Value};
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

/// CSV importer; the first record is the header
pub struct CsvImporter<'a> {
    bytes: &'a [u8],
}

impl<'a> CsvImporter<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Import every record after the header as a text-only mapping
    pub fn import(&self) -> TabularResult<TabularDocument> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(self.bytes);

        let records = reader
            .records()
            .collect::<Result<Vec<StringRecord>, _>>()
            .map_err(|e| TabularError::Decode(format!("Failed to parse CSV: {}", e)))?;

        let Some((header_record, data)) = records.split_first() else {
            return Ok(TabularDocument::new());
        };

        // Blank header fields name no column
        let header: Vec<(usize, String)> = header_record
            .iter()
            .map(to_field_name)
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .collect();
        if header.is_empty() {
            return Ok(TabularDocument::new());
        }

        let doc: TabularDocument = data
            .iter()
            .map(|record| Self::read_record(record, &header))
            .collect::<Vec<_>>()
            .into();

        debug!(rows = doc.len(), columns = header.len(), "Imported CSV");
        Ok(doc)
    }

    /// Positional mapping; short records are padded with empty strings
    fn read_record(record: &StringRecord, header: &[(usize, String)]) -> FieldMapping {
        header
            .iter()
            .map(|(idx, column)| {
                let text = record.get(*idx).unwrap_or_default();
                (column.clone(), Value::Text(text.to_string()))
            })
            .collect()
    }
}

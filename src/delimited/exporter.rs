//! CSV exporter implementation - rows → .csv

use crate::error::{TabularError, TabularResult};
use crate::format::FileFormat;
use crate::header::to_header;
use crate::types::TabularDocument;
use csv::{Terminator, WriterBuilder};

/// CSV exporter for a tabular document
pub struct CsvExporter<'a> {
    doc: &'a TabularDocument,
}

impl<'a> CsvExporter<'a> {
    pub fn new(doc: &'a TabularDocument) -> Self {
        Self { doc }
    }

    /// Serialize the document to CRLF-terminated CSV text
    pub fn export(&self) -> TabularResult<Vec<u8>> {
        let columns = self.doc.layout()?;
        let policy = FileFormat::Csv.null_policy();

        let mut writer = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .from_writer(Vec::new());

        writer
            .write_record(columns.iter().map(|column| to_header(column)))
            .map_err(|e| TabularError::Export(format!("Failed to write header: {}", e)))?;

        for row_idx in 0..self.doc.len() {
            writer
                .write_record(
                    columns
                        .iter()
                        .map(|column| self.doc.cell_text(row_idx, column, policy)),
                )
                .map_err(|e| TabularError::Export(format!("Failed to write row: {}", e)))?;
        }

        writer
            .into_inner()
            .map_err(|e| TabularError::Export(format!("Failed to flush CSV: {}", e)))
    }
}

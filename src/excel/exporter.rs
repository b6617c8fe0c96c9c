//! Excel exporter implementation - rows → .xlsx

use crate::error::{TabularError, TabularResult};
use crate::format::FileFormat;
use crate::header::to_header;
use crate::types::TabularDocument;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

/// Name of the single worksheet written
pub const SHEET_NAME: &str = "Results";

/// Excel exporter for a tabular document
pub struct ExcelExporter<'a> {
    doc: &'a TabularDocument,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(doc: &'a TabularDocument) -> Self {
        Self { doc }
    }

    /// Serialize the document to .xlsx bytes
    pub fn export(&self) -> TabularResult<Vec<u8>> {
        let columns = self.doc.layout()?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| TabularError::Export(format!("Failed to set worksheet name: {}", e)))?;

        Self::write_header(worksheet, &columns)?;
        self.write_rows(worksheet, &columns)?;

        // Autofit only once every row is in place
        worksheet.autofit();

        workbook
            .save_to_buffer()
            .map_err(|e| TabularError::Export(format!("Failed to save Excel file: {}", e)))
    }

    /// Write the bold header row (row 0)
    fn write_header(worksheet: &mut Worksheet, columns: &[&str]) -> TabularResult<()> {
        let bold = Format::new().set_bold();
        for (col_idx, column) in columns.iter().enumerate() {
            worksheet
                .write_string_with_format(0, column_index(col_idx)?, to_header(column), &bold)
                .map_err(|e| TabularError::Export(format!("Failed to write header: {}", e)))?;
        }
        Ok(())
    }

    /// Write one row per record, starting at row 1
    fn write_rows(&self, worksheet: &mut Worksheet, columns: &[&str]) -> TabularResult<()> {
        let policy = FileFormat::Xlsx.null_policy();
        for row_idx in 0..self.doc.len() {
            let excel_row = u32::try_from(row_idx + 1)
                .map_err(|_| TabularError::Export("Too many rows for a worksheet".to_string()))?;

            for (col_idx, column) in columns.iter().enumerate() {
                let text = self.doc.cell_text(row_idx, column, policy);
                worksheet
                    .write_string(excel_row, column_index(col_idx)?, text)
                    .map_err(|e| TabularError::Export(format!("Failed to write cell: {}", e)))?;
            }
        }
        Ok(())
    }
}

fn column_index(idx: usize) -> TabularResult<u16> {
    u16::try_from(idx).map_err(|_| TabularError::Export("Too many columns for a worksheet".to_string()))
}

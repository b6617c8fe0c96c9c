//! Excel (.xlsx) export and import
//!
//! - Export: rows → single-sheet workbook with bold headers
//! - Import: first worksheet → rows, formula cells resolved to their cached results

mod exporter;
mod importer;

pub use exporter::{ExcelExporter, SHEET_NAME};
pub use importer::ExcelImporter;

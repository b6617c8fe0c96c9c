//! Delimited text (.csv) export and import
//!
//! Values travel as plain text: no type inference on import.

mod exporter;
mod importer;

pub use exporter::CsvExporter;
pub use importer::CsvImporter;

//! Tabular - records to xlsx/csv files and back
//!
//! This library turns lists of heterogeneous records into downloadable
//! spreadsheet or CSV files, and parses uploaded files back into ordered
//! field-name → value mappings.
//!
//! # Features
//!
//! - Field names ↔ column headers (`orderId` ↔ `ORDER ID`)
//! - Raw JSON strings, primitives and structured records on the write path
//! - Formula cells read through their cached results
//! - Exactly two formats: `xlsx` and `csv`
//!
//! # Example
//!
//! ```no_run
//! use royalbit_tabular::{generate, read_from_path, MemorySink, Record, RecordSource};
//!
//! let records = vec![Record::from(r#"{"orderId": 1, "total": 9.5}"#)];
//! let mut sink = MemorySink::new();
//! generate(&mut sink, "orders.csv", RecordSource::Sequence(records))?;
//! assert_eq!(sink.content_type.as_deref(), Some("text/csv"));
//!
//! let doc = read_from_path("orders.xlsx")?;
//! println!("Rows: {}", doc.len());
//! # Ok::<(), royalbit_tabular::error::TabularError>(())
//! ```

pub mod api;
pub mod cli;
pub mod delimited;
pub mod error;
pub mod excel;
pub mod format;
pub mod generate;
pub mod header;
pub mod mapper;
pub mod read;
pub mod sink;
pub mod types;

// Re-export commonly used types
pub use error::{TabularError, TabularResult};
pub use format::{FileFormat, Rendered};
pub use generate::generate;
pub use mapper::{map_records, map_to_rows, Record, RecordOutcome, RecordSource, Tabular};
pub use read::{read_from_path, read_from_stream};
pub use sink::{FileSink, MemorySink, ResponseSink};
pub use types::{FieldMapping, NullPolicy, TabularDocument, Value};

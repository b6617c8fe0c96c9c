use thiserror::Error;

pub type TabularResult<T> = Result<T, TabularError>;

#[derive(Error, Debug)]
pub enum TabularError {
    /// Filename extension is neither xlsx nor csv
    #[error("Only xlsx/csv file format is allowed")]
    Format { extension: String },

    /// A structured record declared a field it cannot read
    #[error("Cannot read field '{field}' of record {record}")]
    Access { record: usize, field: String },

    #[error("Decode error: {0}")]
    Decode(String),

    /// Sink failure, already reported to the sink as a 500
    #[error("Unable to generate file Error - {0}")]
    Sink(String),

    #[error("Data cannot be null or empty")]
    EmptyData,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

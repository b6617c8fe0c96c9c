//! Read entrypoints: file → rows

use crate::error::TabularResult;
use crate::format::FileFormat;
use crate::types::TabularDocument;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read an uploaded file. `filename` only selects the format.
pub fn read_from_stream<R: Read>(mut input: R, filename: &str) -> TabularResult<TabularDocument> {
    let format = FileFormat::resolve(filename)?;

    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;

    debug!(filename, format = %format, bytes = bytes.len(), "Reading file");
    format.parse(&bytes)
}

/// Read a file from disk, picking the format from its name
pub fn read_from_path<P: AsRef<Path>>(path: P) -> TabularResult<TabularDocument> {
    let path = path.as_ref();
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let format = FileFormat::resolve(&filename)?;

    let bytes = fs::read(path)?;
    debug!(path = %path.display(), format = %format, bytes = bytes.len(), "Reading file");
    format.parse(&bytes)
}

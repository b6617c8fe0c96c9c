//! Excel importer implementation - .xlsx → rows

use crate::error::{TabularError, TabularResult};
use crate::header::to_field_name;
use crate::types::{format_date, FieldMapping, TabularDocument, Value};
use calamine::{Data, Range, Reader, Xlsx};
use std::io::Cursor;
use tracing::debug;

/// Excel importer reading the first worksheet of a workbook
pub struct ExcelImporter<'a> {
    bytes: &'a [u8],
}

impl<'a> ExcelImporter<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Import the first worksheet. Row 0 is the header, every later row one mapping.
    pub fn import(&self) -> TabularResult<TabularDocument> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(self.bytes))
            .map_err(|e| TabularError::Decode(format!("Failed to open Excel file: {}", e)))?;

        let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
            return Ok(TabularDocument::new());
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| TabularError::Decode(format!("Failed to read worksheet: {}", e)))?;

        // Cells holding a formula; their values in `range` are the cached results
        let formulas = workbook.worksheet_formula(&sheet_name).ok();

        let doc = Self::read_sheet(&range, formulas.as_ref());
        debug!(sheet = %sheet_name, rows = doc.len(), "Imported worksheet");
        Ok(doc)
    }

    fn read_sheet(range: &Range<Data>, formulas: Option<&Range<String>>) -> TabularDocument {
        let Some((last_row, last_col)) = range.end() else {
            return TabularDocument::new();
        };

        let header = Self::read_header(range, last_col);
        if header.is_empty() {
            return TabularDocument::new();
        }

        let mut doc = TabularDocument::new();
        for row in 1..=last_row {
            doc.push(Self::read_row(range, formulas, row, &header));
        }
        doc
    }

    /// Named columns of row 0 as `(column index, field name)`. Blank header cells are skipped.
    fn read_header(range: &Range<Data>, last_col: u32) -> Vec<(u32, String)> {
        (0..=last_col)
            .filter_map(|col| {
                let text = range.get_value((0, col)).map(display_text)?;
                let name = to_field_name(&text);
                (!name.is_empty()).then_some((col, name))
            })
            .collect()
    }

    fn read_row(
        range: &Range<Data>,
        formulas: Option<&Range<String>>,
        row: u32,
        header: &[(u32, String)],
    ) -> FieldMapping {
        let mut mapping = FieldMapping::new();
        for (col, column) in header {
            let pos = (row, *col);
            let is_formula = formulas
                .and_then(|f| f.get_value(pos))
                .is_some_and(|formula| !formula.is_empty());

            let value = match range.get_value(pos) {
                None => Value::Text(String::new()),
                Some(cell) if is_formula => formula_value(cell),
                Some(cell) => Value::Text(display_text(cell)),
            };
            mapping.insert(column.clone(), value);
        }
        mapping
    }
}

/// Text of a cell as a spreadsheet would display it with the General format
fn display_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| format_date(&d))
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// Typed value of a formula cell from its cached result
fn formula_value(cell: &Data) -> Value {
    match cell {
        Data::Float(f) => Value::Float(*f),
        Data::Int(i) => Value::Int(*i),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(Value::Date)
            .unwrap_or(Value::Float(dt.as_f64())),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(e) => Value::Text(e.to_string()),
        Data::Empty => Value::Text(String::new()),
    }
}

use crate::error::{TabularError, TabularResult};
use chrono::{NaiveDateTime, Timelike};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

//==============================================================================
// Cell Values
//==============================================================================

/// A single cell value, on both the write and the read path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`, kept exact
    UInt(u64),
    Float(f64),
    Text(String),
    /// Date cells (xlsx read path only)
    Date(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert a decoded JSON value. Arrays and objects are kept as their compact JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s.clone()),
            nested => Value::Text(nested.to_string()),
        }
    }
}

impl fmt::Display for Value {
    /// Null displays as the empty string; callers pick their own null rendering via `NullPolicy`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::UInt(u) => write!(f, "{}", u),
            Value::Float(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", format_date(d)),
        }
    }
}

/// `YYYY-MM-DD` for whole days, `YYYY-MM-DD HH:MM:SS` otherwise
pub fn format_date(date: &NaiveDateTime) -> String {
    if date.num_seconds_from_midnight() == 0 {
        date.format("%Y-%m-%d").to_string()
    } else {
        date.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or(Value::UInt(u), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(d: NaiveDateTime) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

//==============================================================================
// Rows and Documents
//==============================================================================

/// Ordered field name → value projection of one record or row
pub type FieldMapping = IndexMap<String, Value>;

/// How a null cell is rendered by a writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullPolicy {
    /// Null becomes an empty cell (csv)
    Empty,
    /// Null becomes the literal text `null` (xlsx)
    Literal,
}

impl NullPolicy {
    pub fn render(&self, value: &Value) -> String {
        match (self, value) {
            (NullPolicy::Empty, Value::Null) => String::new(),
            (NullPolicy::Literal, Value::Null) => "null".to_string(),
            (_, other) => other.to_string(),
        }
    }
}

/// Ordered rows sharing the header of the first row
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TabularDocument {
    rows: Vec<FieldMapping>,
}

impl TabularDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<FieldMapping>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, row: FieldMapping) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[FieldMapping] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<FieldMapping> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column keys, taken from the first row
    pub fn columns(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Columns to write, after checking every row fits under the first row's header.
    ///
    /// Rows may omit header keys (written as null) but may not introduce new ones.
    pub fn layout(&self) -> TabularResult<Vec<&str>> {
        if self.rows.is_empty() {
            return Err(TabularError::EmptyData);
        }

        let columns = self.columns();
        if columns.is_empty() {
            return Err(TabularError::Validation(
                "First record has no fields to use as columns".to_string(),
            ));
        }

        for (idx, row) in self.rows.iter().enumerate().skip(1) {
            if let Some(key) = row.keys().find(|key| !columns.contains(&key.as_str())) {
                return Err(TabularError::Validation(format!(
                    "Row {} has field '{}' which is not a column of the first record",
                    idx + 1,
                    key
                )));
            }
        }

        Ok(columns)
    }

    /// Rendered text of one cell; a missing key renders like null
    pub fn cell_text(&self, row: usize, column: &str, policy: NullPolicy) -> String {
        let value = self.rows.get(row).and_then(|r| r.get(column));
        policy.render(value.unwrap_or(&Value::Null))
    }
}

impl From<Vec<FieldMapping>> for TabularDocument {
    fn from(rows: Vec<FieldMapping>) -> Self {
        Self::from_rows(rows)
    }
}

impl IntoIterator for TabularDocument {
    type Item = FieldMapping;
    type IntoIter = std::vec::IntoIter<FieldMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(pairs: &[(&str, Value)]) -> FieldMapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Int(23).to_string(), "23");
        assert_eq!(Value::Float(85.9).to_string(), "85.9");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_date_display() {
        let day = NaiveDate::from_ymd_opt(2023, 3, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(Value::Date(day).to_string(), "2023-03-15");

        let noon = NaiveDate::from_ymd_opt(2023, 3, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        assert_eq!(Value::Date(noon).to_string(), "2023-03-15 12:30:00");
    }

    #[test]
    fn test_value_from_json() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"i":1,"f":1.5,"s":"x","b":false,"n":null,"a":[1,2]}"#)
                .unwrap();
        assert_eq!(Value::from_json(&json["i"]), Value::Int(1));
        assert_eq!(Value::from_json(&json["f"]), Value::Float(1.5));
        assert_eq!(Value::from_json(&json["s"]), Value::Text("x".to_string()));
        assert_eq!(Value::from_json(&json["b"]), Value::Bool(false));
        assert_eq!(Value::from_json(&json["n"]), Value::Null);
        assert_eq!(Value::from_json(&json["a"]), Value::Text("[1,2]".to_string()));
    }

    #[test]
    fn test_value_from_json_large_integers_stay_exact() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"max":18446744073709551615,"edge":9223372036854775807}"#)
                .unwrap();
        assert_eq!(Value::from_json(&json["max"]), Value::UInt(u64::MAX));
        assert_eq!(Value::from_json(&json["edge"]), Value::Int(i64::MAX));
        assert_eq!(
            Value::from_json(&json["max"]).to_string(),
            "18446744073709551615"
        );
        assert_eq!(Value::from(7u64), Value::Int(7));
    }

    #[test]
    fn test_null_policy() {
        assert_eq!(NullPolicy::Empty.render(&Value::Null), "");
        assert_eq!(NullPolicy::Literal.render(&Value::Null), "null");
        assert_eq!(NullPolicy::Literal.render(&Value::Int(7)), "7");
    }

    #[test]
    fn test_option_into_value() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::Text("a".to_string()));
    }

    #[test]
    fn test_columns_follow_first_row() {
        let doc = TabularDocument::from_rows(vec![
            row(&[("b", Value::Int(1)), ("a", Value::Int(2))]),
            row(&[("a", Value::Int(3))]),
        ]);
        assert_eq!(doc.columns(), vec!["b", "a"]);
        assert_eq!(doc.layout().unwrap(), vec!["b", "a"]);
        assert_eq!(doc.cell_text(1, "b", NullPolicy::Literal), "null");
        assert_eq!(doc.cell_text(1, "a", NullPolicy::Empty), "3");
    }

    #[test]
    fn test_layout_rejects_empty() {
        let doc = TabularDocument::new();
        assert!(matches!(doc.layout(), Err(TabularError::EmptyData)));
    }

    #[test]
    fn test_layout_rejects_unknown_column() {
        let doc = TabularDocument::from_rows(vec![
            row(&[("a", Value::Int(1))]),
            row(&[("a", Value::Int(2)), ("z", Value::Int(3))]),
        ]);
        match doc.layout() {
            Err(TabularError::Validation(msg)) => assert!(msg.contains("'z'")),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_layout_rejects_fieldless_header() {
        let doc = TabularDocument::from_rows(vec![FieldMapping::new()]);
        assert!(matches!(doc.layout(), Err(TabularError::Validation(_))));
    }
}

//! Record mapper - records → ordered field mappings
//!
//! Three record shapes are accepted:
//! - raw strings, decoded when they hold a JSON object
//! - primitive scalars, which carry no named fields and map to an empty row
//! - structured objects implementing [`Tabular`]
//!
//! A malformed JSON string degrades its own row to empty and the batch goes on.
//! An unreadable field on a structured object aborts the whole batch.

use crate::error::{TabularError, TabularResult};
use crate::types::{FieldMapping, TabularDocument, Value};
use tracing::error;

/// Field enumeration for structured records
pub trait Tabular {
    /// Declared field names, in declaration order
    fn field_names(&self) -> Vec<String>;

    /// Read one declared field. `None` means the field has no readable value.
    fn field_value(&self, name: &str) -> Option<Value>;
}

impl<T: Tabular + ?Sized> Tabular for &T {
    fn field_names(&self) -> Vec<String> {
        (**self).field_names()
    }

    fn field_value(&self, name: &str) -> Option<Value> {
        (**self).field_value(name)
    }
}

impl Tabular for serde_json::Map<String, serde_json::Value> {
    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn field_value(&self, name: &str) -> Option<Value> {
        self.get(name).map(Value::from_json)
    }
}

/// One input item to be turned into a row
pub enum Record<'a> {
    /// Raw string, opaque or JSON-encoded
    Text(String),
    /// Primitive wrapper. Numbers and characters, plus booleans and null, which
    /// arrive as bare JSON scalars. All of them carry no named fields.
    Scalar(Value),
    /// Structured object with named fields
    Object(Box<dyn Tabular + 'a>),
}

impl<'a> Record<'a> {
    pub fn object<T: Tabular + 'a>(object: T) -> Self {
        Record::Object(Box::new(object))
    }
}

impl From<&str> for Record<'_> {
    fn from(s: &str) -> Self {
        Record::Text(s.to_string())
    }
}

impl From<String> for Record<'_> {
    fn from(s: String) -> Self {
        Record::Text(s)
    }
}

impl std::fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Record::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Record::Object(o) => f.debug_tuple("Object").field(&o.field_names()).finish(),
        }
    }
}

/// Input of the write path, resolved once at the entrypoint
#[derive(Debug)]
pub enum RecordSource<'a> {
    Sequence(Vec<Record<'a>>),
    /// A single raw mapping, written as a one-row document
    Mapping(FieldMapping),
}

impl RecordSource<'static> {
    /// Build a source from a JSON payload: an array is a sequence of records,
    /// an object is a single mapping.
    pub fn from_json(payload: serde_json::Value) -> TabularResult<Self> {
        match payload {
            serde_json::Value::Array(items) => Ok(RecordSource::Sequence(
                items.into_iter().map(record_from_json).collect(),
            )),
            serde_json::Value::Object(map) => Ok(RecordSource::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            )),
            other => Err(TabularError::Validation(format!(
                "Expected a JSON array or object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl<'a> RecordSource<'a> {
    /// Map every record and collect the rows into a document
    pub fn into_document(self) -> TabularResult<TabularDocument> {
        match self {
            RecordSource::Sequence(records) => Ok(TabularDocument::from_rows(map_to_rows(records)?)),
            RecordSource::Mapping(mapping) => Ok(TabularDocument::from_rows(vec![mapping])),
        }
    }
}

impl<'a> From<Vec<Record<'a>>> for RecordSource<'a> {
    fn from(records: Vec<Record<'a>>) -> Self {
        RecordSource::Sequence(records)
    }
}

fn record_from_json(item: serde_json::Value) -> Record<'static> {
    match item {
        serde_json::Value::String(s) => Record::Text(s),
        serde_json::Value::Object(map) => Record::object(map),
        other => Record::Scalar(Value::from_json(&other)),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Result of mapping a single record
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Mapped(FieldMapping),
    /// The record could not be decoded; it contributes an empty row
    Degraded { reason: String },
}

impl RecordOutcome {
    pub fn into_mapping(self) -> FieldMapping {
        match self {
            RecordOutcome::Mapped(mapping) => mapping,
            RecordOutcome::Degraded { .. } => FieldMapping::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, RecordOutcome::Degraded { .. })
    }
}

/// Map each record, keeping per-record JSON defects as `Degraded` outcomes
pub fn map_records<'a, I>(records: I) -> TabularResult<Vec<RecordOutcome>>
where
    I: IntoIterator<Item = Record<'a>>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| map_record(idx, &record))
        .collect()
}

/// Map each record to a row. Degraded records are logged and yield empty rows.
pub fn map_to_rows<'a, I>(records: I) -> TabularResult<Vec<FieldMapping>>
where
    I: IntoIterator<Item = Record<'a>>,
{
    let outcomes = map_records(records)?;
    Ok(outcomes
        .into_iter()
        .enumerate()
        .map(|(idx, outcome)| {
            if let RecordOutcome::Degraded { reason } = &outcome {
                error!(record = idx, "List contains invalid JSON, check for syntax. Error: {}", reason);
            }
            outcome.into_mapping()
        })
        .collect())
}

fn map_record(idx: usize, record: &Record<'_>) -> TabularResult<RecordOutcome> {
    match record {
        Record::Text(text) => Ok(map_json_text(text)),
        Record::Scalar(_) => Ok(RecordOutcome::Mapped(FieldMapping::new())),
        Record::Object(object) => map_object(idx, object.as_ref()).map(RecordOutcome::Mapped),
    }
}

/// Decode a string record. The whole text must parse; anything else degrades.
fn map_json_text(text: &str) -> RecordOutcome {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Object(map)) => RecordOutcome::Mapped(
            map.iter()
                .map(|(k, v)| (k.clone(), Value::from_json(v)))
                .collect(),
        ),
        Ok(other) => RecordOutcome::Degraded {
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        },
        Err(e) => RecordOutcome::Degraded {
            reason: e.to_string(),
        },
    }
}

fn map_object(idx: usize, object: &dyn Tabular) -> TabularResult<FieldMapping> {
    let mut mapping = FieldMapping::new();
    for name in object.field_names() {
        let value = object
            .field_value(&name)
            .ok_or_else(|| TabularError::Access {
                record: idx,
                field: name.clone(),
            })?;
        mapping.insert(name, value);
    }
    Ok(mapping)
}

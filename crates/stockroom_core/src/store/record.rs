//! Explicit per-kind field mapping for snapshot records.
//!
//! # Responsibility
//! - Define the `Record` contract an entity kind implements to be persisted.
//! - Provide typed field readers/writers so every kind encodes values the
//!   same way.
//!
//! # Invariants
//! - Integers are JSON numbers; fractional or out-of-range numbers are rejected.
//! - Timestamps are RFC 3339 strings in UTC with full sub-second precision.
//! - Dates are ISO-8601 `YYYY-MM-DD` strings.

use crate::model::entity::Entity;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// One persisted record: field name to JSON value.
pub type FieldMap = Map<String, Value>;

const EXPECTED_INT: &str = "an integer";
const EXPECTED_STRING: &str = "a string";
const EXPECTED_TIMESTAMP: &str = "an RFC 3339 timestamp";
const EXPECTED_DATE: &str = "a YYYY-MM-DD date";
const DATE_FORMAT: &str = "%Y-%m-%d";
/// RFC 3339 shape with a signed, unbounded year for dates outside 0000..=9999.
const EXTENDED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Field-level decode failure reported by `FieldReader`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub expected: &'static str,
    /// Short description of what was actually there (`missing`, `string "x"`).
    pub found: String,
}

/// Entity kind with a stable, explicit persisted shape.
pub trait Record: Entity + Sized {
    /// Kind name used in diagnostics, e.g. `inventory_item`.
    const KIND: &'static str;

    fn to_fields(&self) -> FieldMap;

    fn from_fields(fields: &FieldReader<'_>) -> Result<Self, FieldError>;
}

/// Builder for a record's field map.
#[derive(Debug, Default)]
pub struct FieldWriter {
    fields: FieldMap,
}

impl FieldWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn int(mut self, field: &str, value: i64) -> Self {
        self.fields.insert(field.to_string(), Value::from(value));
        self
    }

    pub fn string(mut self, field: &str, value: &str) -> Self {
        self.fields
            .insert(field.to_string(), Value::String(value.to_string()));
        self
    }

    pub fn timestamp(mut self, field: &str, value: &DateTime<Utc>) -> Self {
        self.fields.insert(
            field.to_string(),
            Value::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        );
        self
    }

    pub fn date(mut self, field: &str, value: &NaiveDate) -> Self {
        self.fields.insert(
            field.to_string(),
            Value::String(value.format(DATE_FORMAT).to_string()),
        );
        self
    }

    pub fn finish(self) -> FieldMap {
        self.fields
    }
}

/// Typed read access to one record's fields.
pub struct FieldReader<'a> {
    fields: &'a FieldMap,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a FieldMap) -> Self {
        Self { fields }
    }

    pub fn int(&self, field: &str) -> Result<i64, FieldError> {
        let value = self.require(field, EXPECTED_INT)?;
        value
            .as_i64()
            .ok_or_else(|| mismatch(field, EXPECTED_INT, value))
    }

    pub fn string(&self, field: &str) -> Result<String, FieldError> {
        let value = self.require(field, EXPECTED_STRING)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch(field, EXPECTED_STRING, value))
    }

    pub fn timestamp(&self, field: &str) -> Result<DateTime<Utc>, FieldError> {
        let value = self.require(field, EXPECTED_TIMESTAMP)?;
        value
            .as_str()
            .and_then(parse_timestamp)
            .ok_or_else(|| mismatch(field, EXPECTED_TIMESTAMP, value))
    }

    pub fn date(&self, field: &str) -> Result<NaiveDate, FieldError> {
        let value = self.require(field, EXPECTED_DATE)?;
        value
            .as_str()
            .and_then(|text| NaiveDate::parse_from_str(text, DATE_FORMAT).ok())
            .ok_or_else(|| mismatch(field, EXPECTED_DATE, value))
    }

    fn require(&self, field: &str, expected: &'static str) -> Result<&'a Value, FieldError> {
        match self.fields.get(field) {
            Some(Value::Null) | None => Err(FieldError {
                field: field.to_string(),
                expected,
                found: "missing".to_string(),
            }),
            Some(value) => Ok(value),
        }
    }
}

fn mismatch(field: &str, expected: &'static str, value: &Value) -> FieldError {
    FieldError {
        field: field.to_string(),
        expected,
        found: describe_value(value),
    }
}

/// Renders a JSON value for error messages without dumping large payloads.
pub(crate) fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => format!("boolean {flag}"),
        Value::Number(number) => format!("number {number}"),
        Value::String(text) if text.chars().count() > 32 => {
            let head: String = text.chars().take(32).collect();
            format!("string \"{head}...\"")
        }
        Value::String(text) => format!("string \"{text}\""),
        Value::Array(items) => format!("array of {} items", items.len()),
        Value::Object(fields) => format!("object with {} fields", fields.len()),
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    let with_offset = match text.strip_suffix(['Z', 'z']) {
        Some(local) => format!("{local}+00:00"),
        None => text.to_string(),
    };
    DateTime::parse_from_str(&with_offset, EXTENDED_TIMESTAMP_FORMAT)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

//! # Records
//!
//! A [`Record`] is one item of a remote collection: a JSON object whose field
//! set is defined by the backend, not by this crate. Accessors tolerate
//! missing fields (callers render [`PLACEHOLDER`]) and ignore unknown ones.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Stable identifier of a record, in its string form.
///
/// Numeric ids (`42`) and string ids (`"HIS001"`) both map to a `RecordId`.
pub type RecordId = String;

/// Text shown in place of a missing or null field.
pub const PLACEHOLDER: &str = "-";

/// One item of a remote collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Wrap a JSON value. Returns `None` unless the value is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Raw field access. `null` is treated as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    /// Identifier under `field`, if it is a non-empty string or a number.
    pub fn id(&self, field: &str) -> Option<RecordId> {
        match self.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Display text of a field, `None` when missing.
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).map(value_text)
    }

    /// Display text of a field, [`PLACEHOLDER`] when missing.
    pub fn display(&self, field: &str) -> String {
        self.text(field).unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    /// Numeric value of a field. Numeric strings (`"12.5"`) are accepted.
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Timestamp value of a field (see [`parse_timestamp`]).
    pub fn timestamp(&self, field: &str) -> Option<NaiveDateTime> {
        match self.get(field)? {
            Value::String(s) => parse_timestamp(s),
            _ => None,
        }
    }

    /// All fields, ordered by field name.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the record, returning its JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Render a JSON value as a single line of text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => PLACEHOLDER.to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Parse the timestamp shapes the backend emits.
///
/// Accepts RFC 3339 (`2024-02-15T10:30:00Z`, offsets are converted to UTC),
/// naive date-times with `T` or space separators and optional fractional
/// seconds (`2024-11-07T12:41:05.123`), and plain dates (`2024-11-07`,
/// interpreted as midnight).
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Decode a collection response body into records.
///
/// The body must be a JSON array of objects, and every object must carry a
/// usable identifier under `id_field`. Any violation fails the whole batch;
/// no partial collection is returned.
pub fn decode_records(body: Value, id_field: &str) -> Result<Vec<Record>> {
    let Value::Array(items) = body else {
        return Err(Error::malformed(format!(
            "expected a JSON array, got {}",
            json_kind(&body)
        )));
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let kind = json_kind(&item);
        let record = Record::from_value(item).ok_or_else(|| {
            Error::malformed(format!("element {index} is {kind}, expected an object"))
        })?;
        if record.id(id_field).is_none() {
            return Err(Error::missing_record_id(index, id_field));
        }
        records.push(record);
    }
    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_fields_are_ordered_by_name() {
        let record = record(json!({"type": "Phone", "id": 7, "name": "Pixel"}));
        let keys: Vec<&str> = record.fields().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["id", "name", "type"]);
    }

    #[test]
    fn test_from_value_requires_object() {
        assert!(Record::from_value(json!({"id": 1})).is_some());
        assert!(Record::from_value(json!([1, 2])).is_none());
        assert!(Record::from_value(json!("x")).is_none());
    }

    #[test]
    fn test_id_accepts_numbers_and_strings() {
        assert_eq!(record(json!({"id": 7})).id("id").as_deref(), Some("7"));
        assert_eq!(
            record(json!({"id": "HIS001"})).id("id").as_deref(),
            Some("HIS001")
        );
        assert_eq!(record(json!({"id": ""})).id("id"), None);
        assert_eq!(record(json!({"id": null})).id("id"), None);
        assert_eq!(record(json!({"name": "x"})).id("id"), None);
    }

    #[test]
    fn test_display_uses_placeholder_for_missing_fields() {
        let r = record(json!({"id": 1, "endedAt": null, "duration": 1.5}));
        assert_eq!(r.display("endedAt"), PLACEHOLDER);
        assert_eq!(r.display("nope"), PLACEHOLDER);
        assert_eq!(r.display("duration"), "1.5");
    }

    #[test]
    fn test_number_accepts_numeric_strings() {
        let r = record(json!({"a": 3, "b": " 2.25 ", "c": "slow", "d": true}));
        assert_eq!(r.number("a"), Some(3.0));
        assert_eq!(r.number("b"), Some(2.25));
        assert_eq!(r.number("c"), None);
        assert_eq!(r.number("d"), None);
    }

    #[test]
    fn test_parse_timestamp_shapes() {
        let rfc = parse_timestamp("2024-02-15T10:30:00Z").unwrap();
        assert_eq!(rfc.hour(), 10);

        let offset = parse_timestamp("2024-02-15T12:30:00+02:00").unwrap();
        assert_eq!(offset, rfc);

        let naive = parse_timestamp("2024-11-07T12:41:05.250").unwrap();
        assert_eq!(naive.minute(), 41);

        let spaced = parse_timestamp("2024-11-07 12:41:05").unwrap();
        assert_eq!(spaced.second(), 5);

        let date = parse_timestamp("2024-11-07").unwrap();
        assert_eq!(date.hour(), 0);

        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_decode_records_accepts_array_of_objects() {
        let body = json!([{"id": 1, "extra": {"nested": true}}, {"id": "b"}]);
        let records = decode_records(body, "id").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id("id").as_deref(), Some("b"));
    }

    #[test]
    fn test_decode_records_rejects_non_array() {
        let err = decode_records(json!({"id": 1}), "id").unwrap_err();
        assert!(matches!(err, Error::MalformedBody { .. }));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_decode_records_rejects_non_object_element() {
        let err = decode_records(json!([{"id": 1}, 5]), "id").unwrap_err();
        assert!(err.to_string().contains("element 1"));
    }

    #[test]
    fn test_decode_records_requires_id_field() {
        let err = decode_records(json!([{"id": 1}, {"name": "x"}]), "id").unwrap_err();
        assert!(matches!(err, Error::MissingRecordId { index: 1, .. }));
    }

    #[test]
    fn test_value_text_for_nested_values() {
        assert_eq!(value_text(&json!(["a", "b"])), r#"["a","b"]"#);
        assert_eq!(value_text(&json!(false)), "false");
    }
}

//! Serde for Record and the JSON normalization rules.
//!
//! ## Read Format (Deserialization)
//!
//! Any JSON object deserializes into a [`Record`]:
//! - `"id"` becomes the record identity (integer or string) and stays a field
//! - RFC 3339 strings become `Value::DateTime`
//! - naive ISO date-times (`2024-01-15T08:00:00`, as the API emits them) are
//!   read as UTC
//! - `YYYY-MM-DD` strings become `Value::Date`
//! - integers become `Value::Int`, other numbers `Value::Float`
//! - nested objects become nested records, arrays stay raw JSON
//!
//! ## Write Format (Serialization)
//!
//! Fields serialize as a flat map; null fields are kept so that exported rows
//! keep their columns.

use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::RecordId;
use super::Value;

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object representing an API record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();

        while let Some(key) = map.next_key::<String>()? {
            let json: serde_json::Value = map.next_value()?;

            if key == "id" {
                match &json {
                    serde_json::Value::Number(n) => {
                        if let Some(i) = n.as_i64() {
                            record.id = Some(RecordId::Int(i));
                        }
                    }
                    serde_json::Value::String(s) => {
                        record.id = Some(RecordId::Text(s.clone()));
                    }
                    _ => {}
                }
            }

            record.fields.insert(key, json_value_to_value(json));
        }

        Ok(record)
    }
}

/// Converts a serde_json::Value to our Value enum.
pub fn json_value_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Json(serde_json::Value::Number(n))
            }
        }
        serde_json::Value::String(s) => parse_temporal(&s).unwrap_or(Value::String(s)),
        serde_json::Value::Object(obj) => {
            match serde_json::from_value::<Record>(serde_json::Value::Object(obj)) {
                Ok(nested) => Value::Record(Box::new(nested)),
                Err(_) => Value::Null,
            }
        }
        other => Value::Json(other),
    }
}

/// Parses the timestamp shapes the API produces.
///
/// Returns `None` for anything that is not a date or date-time.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    parse_temporal(s).and_then(|value| value.as_datetime())
}

fn parse_temporal(s: &str) -> Option<Value> {
    // Cheap reject before trying the chrono parsers on every string.
    let bytes = s.as_bytes();
    if bytes.len() < 10 || !bytes[0].is_ascii_digit() || bytes.get(4) != Some(&b'-') {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Value::DateTime(dt.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Value::DateTime(naive.and_utc()));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Value::Date(date));
    }
    None
}

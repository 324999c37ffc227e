//! Dynamic record

use std::collections::HashMap;
use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::error::FieldError;

/// Identity of an API entity.
///
/// The Kari API hands out integer ids for some collections and string ids
/// (UUIDs) for others; both are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(v: i64) -> Self {
        RecordId::Int(v)
    }
}

impl From<&str> for RecordId {
    fn from(v: &str) -> Self {
        RecordId::Text(v.to_string())
    }
}

impl From<String> for RecordId {
    fn from(v: String) -> Self {
        RecordId::Text(v)
    }
}

/// Key used to tell rows apart while rendering.
///
/// This is the record id when there is one, otherwise the record's position in
/// the collection being rendered. Row keys are never compared across
/// collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Id(RecordId),
    Position(usize),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Id(id) => write!(f, "{}", id),
            RowKey::Position(n) => write!(f, "#{}", n),
        }
    }
}

/// A dynamic entity record.
///
/// Records hold field values as a `HashMap<String, Value>`, allowing dynamic
/// access to any field. Typed getter methods provide safe access with proper
/// error handling.
///
/// # Example
///
/// ```
/// use kari_admin_lib::model::Record;
///
/// let record = Record::with_id(1)
///     .set("title", "Educação para Todos")
///     .set("votes", 1234i64);
///
/// assert_eq!(record.get_string("title").unwrap(), Some("Educação para Todos"));
/// assert_eq!(record.get_int("votes").unwrap(), Some(1234));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// The unique identifier of the record.
    pub(crate) id: Option<RecordId>,

    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record without identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new record with the given ID.
    ///
    /// The id is also stored as the `id` field so it can be sorted and rendered.
    pub fn with_id(id: impl Into<RecordId>) -> Self {
        let id = id.into();
        let mut fields = HashMap::new();
        fields.insert("id".to_string(), Value::from(id.clone()));
        Self {
            id: Some(id),
            fields,
        }
    }

    /// Returns the record ID, if set.
    pub fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    /// Sets the record ID.
    pub fn set_id(&mut self, id: impl Into<RecordId>) {
        let id = id.into();
        self.fields.insert("id".to_string(), Value::from(id.clone()));
        self.id = Some(id);
    }

    /// Rendering key: the id, or `position` when the record has none.
    pub fn row_key(&self, position: usize) -> RowKey {
        match &self.id {
            Some(id) => RowKey::Id(id.clone()),
            None => RowKey::Position(position),
        }
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets a numeric field value as f64.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| FieldError::type_mismatch(field, "float", value.type_name())),
        }
    }

    /// Gets a Decimal field value.
    pub fn get_decimal(&self, field: &str) -> Result<Option<Decimal>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Decimal(d)) => Ok(Some(*d)),
            Some(Value::Int(n)) => Ok(Some(Decimal::from(*n))),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "decimal",
                other.type_name(),
            )),
        }
    }

    /// Gets a date field value.
    pub fn get_date(&self, field: &str) -> Result<Option<NaiveDate>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Date(d)) => Ok(Some(*d)),
            Some(Value::DateTime(dt)) => Ok(Some(dt.date_naive())),
            Some(other) => Err(FieldError::type_mismatch(field, "date", other.type_name())),
        }
    }

    /// Gets a DateTime field value.
    ///
    /// Plain dates are widened to midnight UTC.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(value) => value.as_datetime().map(Some).ok_or_else(|| {
                FieldError::type_mismatch(field, "datetime", value.type_name())
            }),
        }
    }

    /// Gets a nested Record field value.
    pub fn get_record(&self, field: &str) -> Result<Option<&Record>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Record(r)) => Ok(Some(r.as_ref())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "record",
                other.type_name(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_id_stores_id_field() {
        let record = Record::with_id(7);
        assert_eq!(record.id(), Some(&RecordId::Int(7)));
        assert_eq!(record.get_int("id").unwrap(), Some(7));
    }

    #[test]
    fn test_row_key_falls_back_to_position() {
        assert_eq!(Record::new().row_key(3), RowKey::Position(3));
        assert_eq!(
            Record::with_id("abc").row_key(3),
            RowKey::Id(RecordId::Text("abc".into()))
        );
    }

    #[test]
    fn test_getter_errors() {
        let record = Record::new().set("votes", Value::Null).set("title", "x");
        assert_eq!(record.get_int("votes").unwrap(), None);
        assert_eq!(
            record.get_int("missing").unwrap_err(),
            FieldError::missing("missing")
        );
        assert!(matches!(
            record.get_int("title"),
            Err(FieldError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_decimal_widens_int() {
        let record = Record::new().set("goal", 5000i64);
        assert_eq!(record.get_decimal("goal").unwrap(), Some(Decimal::from(5000)));
    }
}

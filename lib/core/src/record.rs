use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use crate::error::{Error, Result};

/// Ordered rows as returned by a single fetch; order is whatever the backend sent.
pub type RecordSet = Vec<Record>;

/// One row from a remote collection.
///
/// No schema is enforced. Every accessor returns `Option` so that an absent
/// field reads as "missing" rather than failing; operations that cannot work
/// without a field go through [`Record::require_str`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    #[inline]
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a record from a JSON value; anything other than an object is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Raw value of a field. `null` is reported as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    /// String value of a field, borrowed when the backend sent a string.
    /// Numbers and booleans are rendered as text; arrays and objects are not
    /// treated as text.
    pub fn get_text(&self, field: &str) -> Option<Cow<'_, str>> {
        match self.get(field)? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Like [`Record::get_text`] but for fields the caller cannot do without.
    pub fn require_str(&self, field: &str) -> Result<Cow<'_, str>> {
        self.get_text(field)
            .ok_or_else(|| Error::MissingField(field.to_string()))
    }

    /// Embedded row from a related collection (a foreign-key join expanded inline).
    ///
    /// The backend embeds a to-one relation as an object and a to-many relation
    /// as an array; for the latter the first element is returned.
    pub fn related(&self, collection: &str) -> Option<Record> {
        match self.get(collection)? {
            Value::Object(fields) => Some(Record::new(fields.clone())),
            Value::Array(items) => items.first().cloned().and_then(Record::from_value),
            _ => None,
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Record::new(fields)
    }
}

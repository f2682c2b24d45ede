//! Patch - a partial record expressed as a JSON object.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("patch must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("patch serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Field-level changes to apply to a record.
///
/// Field names are the persisted (camelCase) names. Build one field by field,
/// or from any serializable partial type whose absent fields are skipped.
///
/// ```ignore
/// let patch = Patch::new().set("featured", true).set("rating", 5);
/// reviews.update("review-1", &patch);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    fields: Map<String, Value>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one field.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Build a patch from a serializable value that must serialize to an object.
    pub fn from_serialize<S: Serialize>(value: &S) -> Result<Self, PatchError> {
        Self::try_from(serde_json::to_value(value)?)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Shallow-merge this patch over `base` and decode the result as `T`.
    pub(crate) fn merge_into<T: Serialize + DeserializeOwned>(&self, base: &T) -> Result<T, String> {
        let mut fields = match serde_json::to_value(base).map_err(|e| e.to_string())? {
            Value::Object(fields) => fields,
            other => return Err(format!("record is {}, not an object", kind(&other))),
        };
        shallow_merge(&mut fields, &self.fields);
        serde_json::from_value(Value::Object(fields)).map_err(|e| e.to_string())
    }

    /// Decode this patch as a complete record.
    pub(crate) fn to_record<T: DeserializeOwned>(&self) -> Result<T, String> {
        serde_json::from_value(Value::Object(self.fields.clone())).map_err(|e| e.to_string())
    }
}

impl TryFrom<Value> for Patch {
    type Error = PatchError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(PatchError::NotAnObject(kind(&other))),
        }
    }
}

impl From<Map<String, Value>> for Patch {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Overwrite `base`'s fields with `overlay`'s, without recursing into
/// nested values.
pub fn shallow_merge(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (field, value) in overlay {
        base.insert(field.clone(), value.clone());
    }
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

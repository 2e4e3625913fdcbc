//! The ordered field-name to JSON-value mapping behind every model.
//!
//! The bag is the only state a model holds. Typed accessors deserialize from
//! it on every call and setters write straight back into it, so keys the
//! current schema does not know about survive a decode/encode cycle in their
//! original position.

use std::any::type_name;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag(Map<String, Value>);

impl PropertyBag {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap an already-parsed JSON object without looking at its fields.
    pub fn from_raw_unchecked(raw: Map<String, Value>) -> Self {
        Self(raw)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Store `value` under `name`. An existing entry keeps its position.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.0.insert(name.to_string(), value.into());
    }

    /// Store `value`, or drop the key entirely when it is `None`. Unset
    /// optional fields are never written as `null`.
    pub fn set_optional<T: Into<Value>>(&mut self, name: &str, value: Option<T>) {
        match value {
            Some(value) => self.set(name, value),
            None => {
                self.remove(name);
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.shift_remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Read a required field as `T`.
    pub fn required<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        self.required_with(name, |value| deserialize_field(name, value))
    }

    /// Read an optional field as `T`. Both an absent key and an explicit
    /// `null` read as `None`.
    pub fn optional<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        self.optional_with(name, |value| deserialize_field(name, value))
    }

    /// Like [`required`](Self::required) but with a caller-supplied parser,
    /// so union-typed fields keep their structured resolution errors.
    pub fn required_with<T, F>(&self, name: &str, parse: F) -> Result<T>
    where
        F: FnOnce(&Value) -> Result<T>,
    {
        match self.0.get(name) {
            None => Err(Error::missing(name)),
            Some(Value::Null) => Err(Error::null(name)),
            Some(value) => parse(value),
        }
    }

    pub fn optional_with<T, F>(&self, name: &str, parse: F) -> Result<Option<T>>
    where
        F: FnOnce(&Value) -> Result<T>,
    {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => parse(value).map(Some),
        }
    }
}

impl From<Map<String, Value>> for PropertyBag {
    fn from(raw: Map<String, Value>) -> Self {
        Self::from_raw_unchecked(raw)
    }
}

impl From<PropertyBag> for Value {
    fn from(bag: PropertyBag) -> Self {
        Value::Object(bag.0)
    }
}

fn deserialize_field<T: DeserializeOwned>(name: &str, value: &Value) -> Result<T> {
    T::deserialize(value).map_err(|err| Error::mismatch(name, type_name::<T>(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use serde_json::json;

    fn bag(value: Value) -> PropertyBag {
        match value {
            Value::Object(map) => PropertyBag::from_raw_unchecked(map),
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn test_required_field_errors() {
        let empty = PropertyBag::new();
        let err = empty.required::<String>("x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredField);

        let nulled = bag(json!({"x": null}));
        let err = nulled.required::<String>("x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequiredFieldIsNull);

        let wrong = bag(json!({"x": 5}));
        let err = wrong.required::<String>("x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(err.to_string().contains("`x`"));
    }

    #[test]
    fn test_optional_collapses_null_and_absent() {
        let fields = bag(json!({"a": null}));
        assert_eq!(fields.optional::<i64>("a").unwrap(), None);
        assert_eq!(fields.optional::<i64>("b").unwrap(), None);
        // the mapping itself still tells them apart
        assert_eq!(fields.get("a"), Some(&Value::Null));
        assert_eq!(fields.get("b"), None);
    }

    #[test]
    fn test_integral_fields_reject_fractions() {
        let fields = bag(json!({"n": 1.5}));
        let err = fields.required::<i64>("n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut fields = bag(json!({"a": 1, "b": 2, "c": 3}));
        fields.set("b", "two");
        let keys: Vec<&str> = fields.keys().collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(fields.required::<String>("b").unwrap(), "two");
    }

    #[test]
    fn test_set_optional_none_removes_key() {
        let mut fields = bag(json!({"a": 1, "b": 2, "c": 3}));
        fields.set_optional::<i64>("b", None);
        assert_eq!(Value::from(fields), json!({"a": 1, "c": 3}));
    }

    #[test]
    fn test_serializes_transparently() {
        let fields = bag(json!({"type": "text", "extra": [1, 2]}));
        assert_eq!(
            serde_json::to_string(&fields).unwrap(),
            r#"{"type":"text","extra":[1,2]}"#
        );
    }
}

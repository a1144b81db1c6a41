//! JSON Merge Patch (RFC 7396) support.
//!
//! Patch structs hold every mutable field as an `Option`, skipped when `None`,
//! so serializing one yields an object containing only the fields the caller
//! set. Fields the service allows clearing use `Option<Nullable<T>>`: `None`
//! leaves the field untouched, `Some(Nullable::Null)` sends an explicit `null`.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A merge patch body: a JSON object of changed fields.
pub type MergePatch = Map<String, Value>;

/// Conversion of a sparse patch struct into a merge patch body.
pub trait AsPatch: Serialize {
    fn as_patch(&self) -> Result<MergePatch, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(Map::new()),
            other => Err(serde::ser::Error::custom(format!(
                "a patch must serialize to a JSON object, got {}",
                other
            ))),
        }
    }
}

/// A patch value that may be explicitly cleared.
#[derive(Debug, Clone, PartialEq)]
pub enum Nullable<T> {
    Null,
    Value(T),
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Nullable::Value(value)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nullable::Null => serializer.serialize_none(),
            Nullable::Value(value) => value.serialize(serializer),
        }
    }
}

/// Apply `patch` to `target` in place, per RFC 7396.
pub fn apply(target: &mut Value, patch: &Value) {
    let Value::Object(patch_fields) = patch else {
        *target = patch.clone();
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(target_fields) = target else {
        return;
    };

    for (key, value) in patch_fields {
        if value.is_null() {
            target_fields.remove(key);
        } else {
            let entry = target_fields.entry(key.clone()).or_insert(Value::Null);
            apply(entry, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Serialize, Default)]
    struct ExamplePatch {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        enabled: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<Nullable<i64>>,
    }

    impl AsPatch for ExamplePatch {}

    #[test]
    fn empty_patch_is_empty_object() {
        let patch = ExamplePatch::default().as_patch().unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn zero_values_are_kept_distinct_from_unset() {
        let patch = ExamplePatch {
            name: Some(String::new()),
            enabled: Some(false),
            limit: None,
        }
        .as_patch()
        .unwrap();

        assert_eq!(Value::Object(patch), json!({"name": "", "enabled": false}));
    }

    #[test]
    fn nullable_serializes_explicit_null() {
        let patch = ExamplePatch {
            limit: Some(Nullable::Null),
            ..Default::default()
        }
        .as_patch()
        .unwrap();

        assert_eq!(Value::Object(patch), json!({"limit": null}));
    }

    #[test]
    fn apply_follows_rfc_7396_example() {
        let mut target = json!({
            "title": "Goodbye!",
            "author": {"givenName": "John", "familyName": "Doe"},
            "tags": ["example", "sample"],
            "content": "This will be unchanged"
        });
        let patch = json!({
            "title": "Hello!",
            "phoneNumber": "+01-123-456-7890",
            "author": {"familyName": null},
            "tags": ["example"]
        });

        apply(&mut target, &patch);

        assert_eq!(
            target,
            json!({
                "title": "Hello!",
                "author": {"givenName": "John"},
                "tags": ["example"],
                "content": "This will be unchanged",
                "phoneNumber": "+01-123-456-7890"
            })
        );
    }
}

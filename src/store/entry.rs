//! Configuration entry model shared by every store implementation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved name of the template entry that seeds new-entry defaults.
pub const DEFAULT_ENTRY_NAME: &str = "default";

/// Form-encoded properties sent on create/update, keyed by field name.
pub type Properties = BTreeMap<String, String>;

/// A scalar value stored in an entry's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl FieldValue {
    /// Text representation used when the value is loaded into a form.
    pub fn to_form_string(&self) -> String {
        match self {
            FieldValue::Bool(value) => value.to_string(),
            FieldValue::Int(value) => value.to_string(),
            FieldValue::Str(value) => value.clone(),
        }
    }

    /// Loose truthiness: non-empty strings, non-zero numbers and `true`.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(value) => *value,
            FieldValue::Int(value) => *value != 0,
            FieldValue::Str(value) => !value.is_empty(),
        }
    }

    /// Convert a JSON value from a store response.
    ///
    /// Objects, arrays and nulls (ACL metadata and the like) have no form
    /// representation and yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(value) => Some(FieldValue::Bool(*value)),
            Value::Number(number) => Some(match number.as_i64() {
                Some(value) => FieldValue::Int(value),
                None => FieldValue::Str(number.to_string()),
            }),
            Value::String(value) => Some(FieldValue::Str(value.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_form_string())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

/// A named configuration record (one stanza).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    #[serde(default)]
    pub content: BTreeMap<String, FieldValue>,
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: BTreeMap::new(),
        }
    }

    /// Builder-style helper for setting one content value.
    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.content.insert(field.to_string(), value.into());
        self
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_ENTRY_NAME
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.content.get(field)
    }

    /// Build an entry from a store response item (`{"name": .., "content": {..}}`).
    pub fn from_json(value: &Value) -> Option<Self> {
        let name = value.get("name")?.as_str()?.to_string();
        let content = value
            .get("content")
            .and_then(Value::as_object)
            .map(|content| {
                content
                    .iter()
                    .filter_map(|(key, value)| {
                        FieldValue::from_json(value).map(|value| (key.clone(), value))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Some(Self { name, content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_keeps_scalars_only() {
        let entry = Entry::from_json(&json!({
            "name": "prod",
            "content": {
                "url": "https://a",
                "max_batch_size": 500,
                "verify": true,
                "eai:acl": {"app": "TA-quolab"},
                "eai:attributes": ["x"],
                "ratio": 0.5,
                "nothing": null
            }
        }))
        .unwrap();

        assert_eq!(entry.name, "prod");
        assert_eq!(entry.get("url"), Some(&FieldValue::from("https://a")));
        assert_eq!(entry.get("max_batch_size"), Some(&FieldValue::Int(500)));
        assert_eq!(entry.get("verify"), Some(&FieldValue::Bool(true)));
        assert_eq!(entry.get("ratio"), Some(&FieldValue::from("0.5")));
        assert!(entry.get("eai:acl").is_none());
        assert!(entry.get("eai:attributes").is_none());
        assert!(entry.get("nothing").is_none());
    }

    #[test]
    fn from_json_requires_name() {
        assert!(Entry::from_json(&json!({"content": {}})).is_none());
    }

    #[test]
    fn truthiness_follows_loose_rules() {
        assert!(FieldValue::from("maybe").is_truthy());
        assert!(!FieldValue::from("").is_truthy());
        assert!(FieldValue::Int(7).is_truthy());
        assert!(!FieldValue::Int(0).is_truthy());
        assert!(!FieldValue::Bool(false).is_truthy());
    }

    #[test]
    fn untagged_deserialization_picks_native_types() {
        let value: FieldValue = serde_json::from_str("300").unwrap();
        assert_eq!(value, FieldValue::Int(300));
        let value: FieldValue = serde_json::from_str("\"300\"").unwrap();
        assert_eq!(value, FieldValue::from("300"));
    }
}

//! Declarative widget attributes.
//!
//! Widgets can be configured at construction time from a flat key-value
//! attribute set, typically parsed from a TOML snippet. This mirrors how
//! a host application inflates a scene description: parse once, then
//! hand each widget its attributes.
//!
//! ```ignore
//! use trellis::widget::AttributeSet;
//!
//! let attrs = AttributeSet::from_toml_str(r#"
//!     text = "Select all"
//!     enabled = true
//!     state_multiple = true
//! "#)?;
//!
//! let checkbox = TriStateCheckBox::from_attributes(&attrs)?;
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single attribute value.
///
/// Only scalar values are representable; nested tables and arrays are
/// rejected at parse time. Complex configuration belongs in typed setters,
/// not in attribute sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating point number.
    Float(f64),
    /// A string value.
    String(String),
}

impl AttributeValue {
    /// Returns this value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns this value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns this value as a float. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(v) => Some(*v),
            AttributeValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Returns this value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns a short name for the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Integer(_) => "integer",
            AttributeValue::Float(_) => "float",
            AttributeValue::String(_) => "string",
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Integer(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::String(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::String(v)
    }
}

/// Conversion from an [`AttributeValue`] to a typed Rust value.
///
/// Implemented for the scalar types and for the widget enums that can
/// appear in attribute sets.
pub trait FromAttributeValue: Sized {
    /// Attempt the conversion; `None` means a type mismatch (the caller
    /// supplies the key for the error).
    fn from_attribute_value(value: &AttributeValue) -> Option<Self>;
}

impl FromAttributeValue for bool {
    fn from_attribute_value(value: &AttributeValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromAttributeValue for i64 {
    fn from_attribute_value(value: &AttributeValue) -> Option<Self> {
        value.as_integer()
    }
}

impl FromAttributeValue for f64 {
    fn from_attribute_value(value: &AttributeValue) -> Option<Self> {
        value.as_float()
    }
}

impl FromAttributeValue for String {
    fn from_attribute_value(value: &AttributeValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

/// A flat set of named attribute values.
///
/// Keys are sorted for deterministic iteration, which keeps inflation
/// logs and test output stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    values: BTreeMap<String, AttributeValue>,
}

impl AttributeSet {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an attribute set from a TOML string.
    ///
    /// The document must be a flat table of scalar values; nested tables
    /// and arrays produce an [`AttributeErrorKind::UnsupportedValue`]
    /// error.
    pub fn from_toml_str(input: &str) -> Result<Self, AttributeError> {
        let table: toml::Table = input
            .parse()
            .map_err(|e: toml::de::Error| AttributeError::parse(e.to_string()))?;

        let mut values = BTreeMap::new();
        for (key, value) in table {
            let value = match value {
                toml::Value::Boolean(v) => AttributeValue::Bool(v),
                toml::Value::Integer(v) => AttributeValue::Integer(v),
                toml::Value::Float(v) => AttributeValue::Float(v),
                toml::Value::String(v) => AttributeValue::String(v),
                other => {
                    return Err(AttributeError::unsupported(&key, other.type_str()));
                }
            };
            values.insert(key, value);
        }
        Ok(Self { values })
    }

    /// Insert or replace an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style insert, for constructing sets in code.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Look up a raw attribute value.
    pub fn get_raw(&self, key: &str) -> Option<&AttributeValue> {
        self.values.get(key)
    }

    /// Look up an attribute and convert it to `T`.
    ///
    /// Returns `Ok(None)` when the key is absent and an error when the
    /// key is present with an incompatible type.
    pub fn get<T: FromAttributeValue>(&self, key: &str) -> Result<Option<T>, AttributeError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => T::from_attribute_value(value)
                .map(Some)
                .ok_or_else(|| AttributeError::type_mismatch(key, value.type_name())),
        }
    }

    /// Look up an attribute, falling back to a default when absent.
    pub fn get_or<T: FromAttributeValue>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T, AttributeError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Whether the set contains the given key.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of attributes in the set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over key-value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Error type for attribute parsing and lookup.
#[derive(Debug)]
pub struct AttributeError {
    kind: AttributeErrorKind,
    key: Option<String>,
    detail: Option<String>,
}

/// The kind of attribute error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeErrorKind {
    /// The source document failed to parse.
    Parse,
    /// A value's type did not match what the caller asked for.
    TypeMismatch,
    /// The document contained a value shape attributes cannot hold
    /// (a nested table or an array).
    UnsupportedValue,
    /// A string value was not a recognized variant of an enum attribute.
    InvalidVariant,
}

impl AttributeError {
    fn parse(detail: String) -> Self {
        Self {
            kind: AttributeErrorKind::Parse,
            key: None,
            detail: Some(detail),
        }
    }

    fn unsupported(key: &str, type_str: &str) -> Self {
        Self {
            kind: AttributeErrorKind::UnsupportedValue,
            key: Some(key.to_string()),
            detail: Some(type_str.to_string()),
        }
    }

    pub(crate) fn type_mismatch(key: &str, found: &str) -> Self {
        Self {
            kind: AttributeErrorKind::TypeMismatch,
            key: Some(key.to_string()),
            detail: Some(found.to_string()),
        }
    }

    pub(crate) fn invalid_variant(key: &str, value: &str) -> Self {
        Self {
            kind: AttributeErrorKind::InvalidVariant,
            key: Some(key.to_string()),
            detail: Some(value.to_string()),
        }
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> AttributeErrorKind {
        self.kind
    }

    /// Returns the attribute key involved, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.key, &self.detail) {
            (AttributeErrorKind::Parse, _, Some(detail)) => {
                write!(f, "failed to parse attributes: {detail}")
            }
            (AttributeErrorKind::Parse, _, None) => write!(f, "failed to parse attributes"),
            (AttributeErrorKind::TypeMismatch, Some(key), Some(found)) => {
                write!(f, "attribute `{key}` has unexpected type {found}")
            }
            (AttributeErrorKind::UnsupportedValue, Some(key), Some(found)) => {
                write!(f, "attribute `{key}` holds unsupported value type {found}")
            }
            (AttributeErrorKind::InvalidVariant, Some(key), Some(value)) => {
                write!(f, "attribute `{key}` has unrecognized value `{value}`")
            }
            _ => write!(f, "attribute error"),
        }
    }
}

impl std::error::Error for AttributeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_table() {
        let attrs = AttributeSet::from_toml_str(
            r#"
            text = "Select all"
            enabled = true
            spacing = 4.5
            count = 3
            "#,
        )
        .unwrap();

        assert_eq!(attrs.len(), 4);
        assert_eq!(
            attrs.get::<String>("text").unwrap(),
            Some("Select all".to_string())
        );
        assert_eq!(attrs.get::<bool>("enabled").unwrap(), Some(true));
        assert_eq!(attrs.get::<f64>("spacing").unwrap(), Some(4.5));
        assert_eq!(attrs.get::<i64>("count").unwrap(), Some(3));
    }

    #[test]
    fn test_missing_key_is_none() {
        let attrs = AttributeSet::new();
        assert_eq!(attrs.get::<bool>("enabled").unwrap(), None);
        assert!(attrs.get_or("enabled", true).unwrap());
    }

    #[test]
    fn test_type_mismatch_errors() {
        let attrs = AttributeSet::new().with("enabled", "yes");
        let err = attrs.get::<bool>("enabled").unwrap_err();
        assert_eq!(err.kind(), AttributeErrorKind::TypeMismatch);
        assert_eq!(err.key(), Some("enabled"));
    }

    #[test]
    fn test_integer_widens_to_float() {
        let attrs = AttributeSet::new().with("spacing", 4i64);
        assert_eq!(attrs.get::<f64>("spacing").unwrap(), Some(4.0));
    }

    #[test]
    fn test_nested_table_rejected() {
        let err = AttributeSet::from_toml_str("[nested]\nkey = 1").unwrap_err();
        assert_eq!(err.kind(), AttributeErrorKind::UnsupportedValue);
    }

    #[test]
    fn test_array_rejected() {
        let err = AttributeSet::from_toml_str("items = [1, 2]").unwrap_err();
        assert_eq!(err.kind(), AttributeErrorKind::UnsupportedValue);
    }

    #[test]
    fn test_invalid_toml() {
        let err = AttributeSet::from_toml_str("not valid = = toml").unwrap_err();
        assert_eq!(err.kind(), AttributeErrorKind::Parse);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let attrs = AttributeSet::new()
            .with("zeta", 1i64)
            .with("alpha", 2i64)
            .with("mid", 3i64);
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }
}

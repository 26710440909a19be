// Values under validation

use crate::errors::{ConfigResult, ConfigurationError};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// The value of one input attribute.
///
/// An attribute missing from [`Attributes`] is "absent", which is not the
/// same as being present with [`AttributeValue::Null`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    /// Any signed or unsigned 64-bit integer
    Integer(i128),
    Float(f64),
    Text(String),
    /// Arrays and objects; carries the JSON kind for diagnostics.
    Unsupported(&'static str),
}

/// How a value is described in size-related messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticType {
    Numeric,
    Text,
}

impl AttributeValue {
    /// Numeric magnitude for numbers, character count for text.
    ///
    /// Any other value has no size.
    pub fn size(&self) -> Option<f64> {
        match self {
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Text(s) => Some(s.chars().count() as f64),
            AttributeValue::Null | AttributeValue::Bool(_) | AttributeValue::Unsupported(_) => None,
        }
    }

    /// Numbers are numeric; everything else is described as text.
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            AttributeValue::Integer(_) | AttributeValue::Float(_) => SemanticType::Numeric,
            _ => SemanticType::Text,
        }
    }

    /// The form compared against `in` parameters.
    ///
    /// Floats use their shortest representation, so `1.0` becomes `"1"`.
    pub fn as_param_string(&self) -> Option<String> {
        match self {
            AttributeValue::Integer(i) => Some(i.to_string()),
            AttributeValue::Float(f) => Some(f.to_string()),
            AttributeValue::Text(s) => Some(s.clone()),
            AttributeValue::Null | AttributeValue::Bool(_) | AttributeValue::Unsupported(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Display form recorded on a [`ValidationError`](crate::ValidationError).
    pub fn display_value(&self) -> Option<String> {
        match self {
            AttributeValue::Bool(b) => Some(b.to_string()),
            AttributeValue::Null | AttributeValue::Unsupported(_) => None,
            other => other.as_param_string(),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => f.write_str("null"),
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Float(x) => write!(f, "{}", x),
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Unsupported(kind) => write!(f, "<{}>", kind),
        }
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AttributeValue {
                fn from(value: $t) -> Self {
                    AttributeValue::Integer(i128::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<usize> for AttributeValue {
    fn from(value: usize) -> Self {
        AttributeValue::Integer(value as i128)
    }
}

impl From<isize> for AttributeValue {
    fn from(value: isize) -> Self {
        AttributeValue::Integer(value as i128)
    }
}

impl From<f32> for AttributeValue {
    fn from(value: f32) -> Self {
        AttributeValue::Float(f64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttributeValue::Null, Into::into)
    }
}

impl From<&Value> for AttributeValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => AttributeValue::Null,
            Value::Bool(b) => AttributeValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AttributeValue::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    AttributeValue::Integer(i128::from(u))
                } else {
                    AttributeValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => AttributeValue::Text(s.clone()),
            Value::Array(_) => AttributeValue::Unsupported("array"),
            Value::Object(_) => AttributeValue::Unsupported("object"),
        }
    }
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => AttributeValue::Text(s),
            other => AttributeValue::from(&other),
        }
    }
}

/// The input mapping: attribute name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: HashMap<String, AttributeValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object.
    pub fn from_json(document: &Value) -> ConfigResult<Self> {
        match document {
            Value::Object(map) => Ok(map
                .iter()
                .map(|(k, v)| (k.clone(), AttributeValue::from(v)))
                .collect()),
            other => Err(ConfigurationError::InvalidInput(format!(
                "attributes must be a JSON object, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Add or replace an attribute
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style [`Attributes::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// `None` means the attribute is absent.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_size_by_kind() {
        assert_eq!(AttributeValue::from(3).size(), Some(3.0));
        assert_eq!(AttributeValue::from(-2.5).size(), Some(-2.5));
        assert_eq!(AttributeValue::from("aPz").size(), Some(3.0));
        assert_eq!(AttributeValue::from(true).size(), None);
        assert_eq!(AttributeValue::Null.size(), None);
    }

    #[test]
    fn test_size_counts_characters_not_bytes() {
        assert_eq!(AttributeValue::from("héllo").size(), Some(5.0));
        assert_eq!(AttributeValue::from("日本").size(), Some(2.0));
    }

    #[test]
    fn test_semantic_type() {
        assert_eq!(AttributeValue::from(1).semantic_type(), SemanticType::Numeric);
        assert_eq!(AttributeValue::from(1.5).semantic_type(), SemanticType::Numeric);
        assert_eq!(AttributeValue::from("1").semantic_type(), SemanticType::Text);
        assert_eq!(AttributeValue::from(false).semantic_type(), SemanticType::Text);
    }

    #[test]
    fn test_param_string_drops_trailing_zero() {
        assert_eq!(AttributeValue::from(1.0).as_param_string().as_deref(), Some("1"));
        assert_eq!(AttributeValue::from(3.1).as_param_string().as_deref(), Some("3.1"));
        assert_eq!(AttributeValue::from(42).as_param_string().as_deref(), Some("42"));
        assert_eq!(AttributeValue::from(true).as_param_string(), None);
    }

    #[test]
    fn test_from_json_numbers_keep_their_representation() {
        assert_eq!(AttributeValue::from(json!(1)), AttributeValue::Integer(1));
        assert_eq!(AttributeValue::from(json!(1.0)), AttributeValue::Float(1.0));
        assert_eq!(
            AttributeValue::from(json!(u64::MAX)),
            AttributeValue::Integer(i128::from(u64::MAX))
        );
        assert_eq!(
            AttributeValue::from(json!(i64::MIN)),
            AttributeValue::Integer(i128::from(i64::MIN))
        );
        assert_eq!(AttributeValue::from(json!([1])), AttributeValue::Unsupported("array"));
        assert_eq!(AttributeValue::from(json!(null)), AttributeValue::Null);
    }

    #[test]
    fn test_unsigned_integers_stay_integers() {
        let value = AttributeValue::from(u64::MAX);
        assert_eq!(value.semantic_type(), SemanticType::Numeric);
        assert_eq!(value.as_param_string().as_deref(), Some("18446744073709551615"));
        assert_eq!(value.size(), Some(u64::MAX as f64));
        assert_eq!(AttributeValue::from(7usize), AttributeValue::Integer(7));
    }

    #[test]
    fn test_option_maps_none_to_null() {
        assert_eq!(AttributeValue::from(None::<i32>), AttributeValue::Null);
        assert_eq!(AttributeValue::from(Some("x")), AttributeValue::Text("x".into()));
    }

    #[test]
    fn test_attributes_from_json() {
        let attrs = Attributes::from_json(&json!({"foo": "bar", "n": 2, "z": null})).unwrap();
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.get("n"), Some(&AttributeValue::Integer(2)));
        assert_eq!(attrs.get("z"), Some(&AttributeValue::Null));
        assert_eq!(attrs.get("missing"), None);
    }

    #[test]
    fn test_attributes_from_non_object() {
        let err = Attributes::from_json(&json!(["foo"])).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidInput(_)));
    }

    #[test]
    fn test_attributes_builder() {
        let attrs = Attributes::new().with("a", 1).with("b", "two");
        assert!(attrs.contains("a"));
        assert!(!attrs.is_empty());
        assert_eq!(attrs.get("b").and_then(AttributeValue::as_text), Some("two"));
    }
}

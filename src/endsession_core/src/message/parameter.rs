use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Loosely-typed value stored in a [`ParameterBag`](super::ParameterBag).
///
/// Protocol messages arrive as flat strings (query strings, form bodies) but may be
/// enriched by provider code with richer JSON-like values, so the bag keeps the shape
/// of whatever was stored and leaves coercion to the typed accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<ParameterValue>),
    Object(IndexMap<String, ParameterValue>),
}

impl ParameterValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ParameterValue::Null)
    }

    /// Borrow the value as a string slice, only if it is stored as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// String form of a scalar value.
    ///
    /// Returns `None` for `Null`, arrays and objects: they have no single
    /// string representation and cannot be carried in a URL query string.
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            ParameterValue::String(value) => Some(value.clone()),
            ParameterValue::Bool(value) => Some(value.to_string()),
            ParameterValue::Integer(value) => Some(value.to_string()),
            ParameterValue::Float(value) => Some(value.to_string()),
            ParameterValue::Null | ParameterValue::Array(_) | ParameterValue::Object(_) => None,
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(values: Vec<String>) -> Self {
        ParameterValue::Array(values.into_iter().map(ParameterValue::String).collect())
    }
}

/// Errors raised by the typed parameter accessors.
#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("Parameter '{name}' cannot be read as {expected}")]
    TypeMismatch { name: String, expected: &'static str },
}

/// Conversion from a stored [`ParameterValue`] into a concrete Rust type.
///
/// Implementations coerce between scalar shapes where the conversion is lossless
/// (`"42"` reads as `42`, `true` reads as `"true"`) and refuse everything else.
pub trait FromParameter: Sized {
    /// Human-readable name of the target shape, used in error messages.
    const EXPECTED: &'static str;

    fn from_parameter(value: &ParameterValue) -> Option<Self>;
}

impl FromParameter for String {
    const EXPECTED: &'static str = "a string";

    fn from_parameter(value: &ParameterValue) -> Option<Self> {
        value.to_scalar_string()
    }
}

impl FromParameter for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_parameter(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::Bool(value) => Some(*value),
            ParameterValue::String(value) if value.eq_ignore_ascii_case("true") => Some(true),
            ParameterValue::String(value) if value.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

impl FromParameter for i64 {
    const EXPECTED: &'static str = "an integer";

    fn from_parameter(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::Integer(value) => Some(*value),
            ParameterValue::String(value) => value.parse().ok(),
            _ => None,
        }
    }
}

impl FromParameter for Vec<String> {
    const EXPECTED: &'static str = "a list of strings";

    fn from_parameter(value: &ParameterValue) -> Option<Self> {
        match value {
            ParameterValue::Array(values) => values.iter().map(String::from_parameter).collect(),
            ParameterValue::String(value) => Some(vec![value.clone()]),
            _ => None,
        }
    }
}

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

use super::parameter::{FromParameter, ParameterError, ParameterValue};

/// Order-preserving, order-insensitive bag of protocol parameters.
///
/// Insertion order is kept so that rendered responses and redirect query strings
/// are stable, but two bags holding the same entries compare equal regardless of
/// order.
///
/// Three states are distinguishable for every name: absent (`get` returns `None`),
/// present with [`ParameterValue::Null`], and present with an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterBag {
    parameters: IndexMap<String, ParameterValue>,
}

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bag from decoded `name=value` pairs.
    ///
    /// A name that occurs more than once is stored as an array of its values,
    /// in arrival order.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut parameters: IndexMap<String, ParameterValue> = IndexMap::new();

        for (name, value) in pairs {
            match parameters.entry(name) {
                Entry::Vacant(entry) => {
                    entry.insert(ParameterValue::String(value));
                }
                Entry::Occupied(mut entry) => {
                    let existing = entry.get_mut();
                    match existing {
                        ParameterValue::Array(values) => values.push(ParameterValue::String(value)),
                        _ => {
                            let first = std::mem::replace(existing, ParameterValue::Null);
                            *existing =
                                ParameterValue::Array(vec![first, ParameterValue::String(value)]);
                        }
                    }
                }
            }
        }

        Self { parameters }
    }

    /// Decode an `application/x-www-form-urlencoded` payload (query string or form body).
    pub fn from_urlencoded(input: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(input)?;
        Ok(Self::from_pairs(pairs))
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.parameters.get(name)
    }

    /// Borrow a parameter stored as a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParameterValue::as_str)
    }

    /// Read a parameter as `T`, coercing scalar shapes where possible.
    ///
    /// Absent and `Null` parameters read as `Ok(None)`.
    pub fn get_as<T: FromParameter>(&self, name: &str) -> Result<Option<T>, ParameterError> {
        match self.get(name) {
            None | Some(ParameterValue::Null) => Ok(None),
            Some(value) => T::from_parameter(value)
                .map(Some)
                .ok_or_else(|| ParameterError::TypeMismatch {
                    name: name.to_string(),
                    expected: T::EXPECTED,
                }),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParameterValue>) {
        self.parameters.insert(name.into(), value.into());
    }

    /// Store a string parameter, or remove the entry when `value` is `None`.
    pub fn set_str(&mut self, name: &str, value: Option<String>) {
        match value {
            Some(value) => self.set(name, value),
            None => {
                self.remove(name);
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<ParameterValue> {
        self.parameters.shift_remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.parameters
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Parameters that can travel in a URL query string.
    ///
    /// Only scalar values with a non-empty string form are kept; nulls, arrays and
    /// objects are dropped.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.parameters
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_scalar_string()
                    .filter(|value| !value.is_empty())
                    .map(|value| (name.clone(), value))
            })
            .collect()
    }
}

impl FromIterator<(String, ParameterValue)> for ParameterBag {
    fn from_iter<I: IntoIterator<Item = (String, ParameterValue)>>(iter: I) -> Self {
        Self {
            parameters: iter.into_iter().collect(),
        }
    }
}

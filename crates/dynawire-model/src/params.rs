//! Expression attribute parameters.
//!
//! Expression strings refer to bound values with `:placeholder` and to
//! attribute names with `#alias`. [`ExpressionAttributes`] carries both maps.
//! It is immutable: binding parameters returns a new instance and leaves the
//! original untouched, so one set of bindings can be used as a template and
//! extended independently from several threads.

use std::collections::HashMap;
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::document::Document;
use crate::error::ParamError;
use crate::value::Value;

const VALUES_FIELD: &str = "ExpressionAttributeValues";
const NAMES_FIELD: &str = "ExpressionAttributeNames";

/// A single `(key, value)` binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// `:value` or `#name`.
    pub key: String,
    /// The bound value. Must be a string for `#name` keys.
    pub value: Value,
}

impl Param {
    /// Create a binding.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// `true` if this binds a `#name` alias.
    #[must_use]
    pub fn is_name(&self) -> bool {
        self.key.starts_with('#')
    }
}

/// Anything that can be turned into a list of bindings.
pub trait IntoParams {
    /// Produce the bindings.
    fn into_params(self) -> Vec<Param>;
}

impl IntoParams for () {
    fn into_params(self) -> Vec<Param> {
        Vec::new()
    }
}

impl IntoParams for Param {
    fn into_params(self) -> Vec<Param> {
        vec![self]
    }
}

impl IntoParams for Vec<Param> {
    fn into_params(self) -> Vec<Param> {
        self
    }
}

impl<const N: usize> IntoParams for [Param; N] {
    fn into_params(self) -> Vec<Param> {
        self.into()
    }
}

impl IntoParams for Document {
    fn into_params(self) -> Vec<Param> {
        self.into_iter()
            .map(|(key, value)| Param { key, value })
            .collect()
    }
}

impl<K: Into<String>, V: Into<Value>> IntoParams for (K, V) {
    fn into_params(self) -> Vec<Param> {
        vec![Param::new(self.0, self.1)]
    }
}

/// Value placeholders and name aliases for an expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionAttributes {
    values: Arc<Document>,
    names: Arc<HashMap<String, String>>,
}

impl ExpressionAttributes {
    /// No bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound `:value` placeholders.
    #[must_use]
    pub fn values(&self) -> &Document {
        &self.values
    }

    /// Bound `#name` aliases.
    #[must_use]
    pub fn names(&self) -> &HashMap<String, String> {
        &self.names
    }

    /// `true` when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.names.is_empty()
    }

    /// Bind a single parameter. See [`add_params`](Self::add_params).
    pub fn add_param(
        &self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, ParamError> {
        self.add_params(Param::new(key, value))
    }

    /// Bind parameters, returning a new set.
    ///
    /// Keys starting with `#` become name aliases and must carry a string;
    /// every other key becomes a value placeholder. Only the maps that
    /// receive entries are copied. The rest stay shared with `self`, and
    /// binding nothing shares both.
    pub fn add_params(&self, params: impl IntoParams) -> Result<Self, ParamError> {
        let params = params.into_params();
        if params.is_empty() {
            return Ok(self.clone());
        }

        let mut new_names = Vec::new();
        let mut new_values = Vec::new();
        for param in params {
            if param.is_name() {
                match param.value {
                    Value::String(name) => new_names.push((param.key, name)),
                    other => {
                        return Err(ParamError::NameNotString {
                            key: param.key,
                            found: other.type_name(),
                        });
                    }
                }
            } else {
                new_values.push((param.key, param.value));
            }
        }

        let names = if new_names.is_empty() {
            Arc::clone(&self.names)
        } else {
            let mut map = HashMap::with_capacity(self.names.len() + new_names.len());
            map.extend(self.names.iter().map(|(k, v)| (k.clone(), v.clone())));
            map.extend(new_names);
            Arc::new(map)
        };

        let values = if new_values.is_empty() {
            Arc::clone(&self.values)
        } else {
            let mut doc = Document::with_capacity(self.values.len() + new_values.len());
            doc.extend(self.values.iter().map(|(k, v)| (k.clone(), v.clone())));
            doc.extend(new_values);
            Arc::new(doc)
        };

        Ok(Self { values, names })
    }

    /// `true` if both sets share the same value map allocation.
    #[must_use]
    pub fn shares_values_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }

    /// `true` if both sets share the same name map allocation.
    #[must_use]
    pub fn shares_names_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.names, &other.names)
    }
}

// Serializes as the two request fields, each omitted when empty, so request
// structs can `#[serde(flatten)]` it.
impl Serialize for ExpressionAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = usize::from(!self.values.is_empty()) + usize::from(!self.names.is_empty());
        let mut map = serializer.serialize_map(Some(len))?;
        if !self.values.is_empty() {
            map.serialize_entry(VALUES_FIELD, self.values.as_ref())?;
        }
        if !self.names.is_empty() {
            map.serialize_entry(NAMES_FIELD, self.names.as_ref())?;
        }
        map.end()
    }
}

//! Documents: string-keyed maps of values.
//!
//! Items, keys and ad-hoc parameter collections are all documents. The typed
//! getters never panic: a missing attribute is `Ok(None)` and an attribute of
//! the wrong type is a [`DocumentError`].

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::DocumentError;
use crate::number::Number;
use crate::value::{TIME_FORMAT, Value};

/// A string-keyed mapping of attribute names to values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document(HashMap<String, Value>);

impl Document {
    /// An empty document.
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// An empty document with room for `capacity` attributes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity(capacity))
    }

    /// A key document with a single hash key.
    #[must_use]
    pub fn hash_key(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut doc = Self::with_capacity(1);
        doc.insert(name.into(), value.into());
        doc
    }

    /// A key document with a hash key and a range key.
    #[must_use]
    pub fn hash_range_key(
        hash_name: impl Into<String>,
        hash_value: impl Into<Value>,
        range_name: impl Into<String>,
        range_value: impl Into<Value>,
    ) -> Self {
        let mut doc = Self::with_capacity(2);
        doc.insert(hash_name.into(), hash_value.into());
        doc.insert(range_name.into(), range_value.into());
        doc
    }

    /// Chaining insert, handy for literals.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Unwrap into the underlying map.
    #[must_use]
    pub fn into_inner(self) -> HashMap<String, Value> {
        self.0
    }

    /// A string attribute.
    pub fn get_string(&self, key: &str) -> Result<Option<&str>, DocumentError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(wrong_type(key, "string", other)),
        }
    }

    /// A number attribute.
    pub fn get_number(&self, key: &str) -> Result<Option<&Number>, DocumentError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(Some(n)),
            Some(other) => Err(wrong_type(key, "number", other)),
        }
    }

    /// A list attribute.
    pub fn get_list(&self, key: &str) -> Result<Option<&[Value]>, DocumentError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::List(l)) => Ok(Some(l)),
            Some(other) => Err(wrong_type(key, "list", other)),
        }
    }

    /// A string set attribute.
    pub fn get_string_set(&self, key: &str) -> Result<Option<&[String]>, DocumentError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::StringSet(s)) => Ok(Some(s)),
            Some(other) => Err(wrong_type(key, "string set", other)),
        }
    }

    /// A nested document attribute.
    pub fn get_document(&self, key: &str) -> Result<Option<&Document>, DocumentError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Document(d)) => Ok(Some(d)),
            Some(other) => Err(wrong_type(key, "document", other)),
        }
    }

    /// A boolean attribute.
    ///
    /// Missing and null read as `false`. Numbers are accepted for stores that
    /// encode flags as `0`/`1`: any value other than zero is `true`.
    pub fn get_bool(&self, key: &str) -> Result<bool, DocumentError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::Number(n)) => Ok(n.to_f64().map_or(true, |f| f != 0.0)),
            Some(other) => Err(wrong_type(key, "bool", other)),
        }
    }

    /// A timestamp stored as a `YYYY-MM-DDTHH:MM:SSZ` string.
    pub fn get_time(&self, key: &str) -> Result<Option<DateTime<Utc>>, DocumentError> {
        let Some(s) = self.get_string(key)? else {
            return Ok(None);
        };
        NaiveDateTime::parse_from_str(s, TIME_FORMAT)
            .map(|t| Some(t.and_utc()))
            .map_err(|_| DocumentError::InvalidTime {
                key: key.to_owned(),
                value: s.to_owned(),
            })
    }
}

/// Interpret every element of a list as a document.
pub fn list_as_documents(list: &[Value]) -> Result<Vec<&Document>, DocumentError> {
    list.iter()
        .enumerate()
        .map(|(i, v)| match v {
            Value::Document(d) => Ok(d),
            other => Err(wrong_type(&i.to_string(), "document", other)),
        })
        .collect()
}

fn wrong_type(key: &str, expected: &'static str, found: &Value) -> DocumentError {
    DocumentError::WrongType {
        key: key.to_owned(),
        expected,
        found: found.type_name(),
    }
}

impl Deref for Document {
    type Target = HashMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<HashMap<String, Value>> for Document {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = std::collections::hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample() -> Document {
        Document::new()
            .with("name", "Bob")
            .with("age", 31)
            .with("active", true)
            .with("flag", 0)
            .with("tags", Value::StringSet(vec!["a".to_owned(), "b".to_owned()]))
            .with("items", vec![Value::from(1), Value::from("x")])
            .with("created", "2015-03-04T05:06:07Z")
            .with("nothing", Value::Null)
    }

    #[test]
    fn test_should_read_typed_attributes() {
        let doc = sample();
        assert_eq!(doc.get_string("name").unwrap(), Some("Bob"));
        assert_eq!(doc.get_number("age").unwrap().unwrap().to_i64().unwrap(), 31);
        assert_eq!(doc.get_string_set("tags").unwrap().unwrap().len(), 2);
        assert_eq!(doc.get_list("items").unwrap().unwrap().len(), 2);
        assert!(doc.get_bool("active").unwrap());
        assert!(!doc.get_bool("flag").unwrap());
        assert!(!doc.get_bool("missing").unwrap());
    }

    #[test]
    fn test_should_treat_missing_and_null_as_absent() {
        let doc = sample();
        assert_eq!(doc.get_string("missing").unwrap(), None);
        assert_eq!(doc.get_string("nothing").unwrap(), None);
        assert_eq!(doc.get_number("nothing").unwrap(), None);
    }

    #[test]
    fn test_should_report_wrong_type_instead_of_panicking() {
        let doc = sample();
        let err = doc.get_string("age").unwrap_err();
        assert_eq!(
            err,
            DocumentError::WrongType {
                key: "age".to_owned(),
                expected: "string",
                found: "number",
            }
        );
        assert!(doc.get_bool("name").is_err());
    }

    #[test]
    fn test_should_parse_time_attribute() {
        let doc = sample();
        assert_eq!(
            doc.get_time("created").unwrap(),
            Some(Utc.with_ymd_and_hms(2015, 3, 4, 5, 6, 7).unwrap())
        );
        assert!(matches!(
            doc.get_time("name"),
            Err(DocumentError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_should_build_keys() {
        let key = Document::hash_range_key("Id", 1, "Sort", "a");
        assert_eq!(key.len(), 2);
        assert_eq!(Document::hash_key("Id", 1).get("Id"), Some(&Value::from(1)));
    }

    #[test]
    fn test_should_read_list_of_documents() {
        let list = vec![
            Value::Document(Document::hash_key("a", 1)),
            Value::Document(Document::hash_key("b", 2)),
        ];
        assert_eq!(list_as_documents(&list).unwrap().len(), 2);

        let mixed = vec![Value::Document(Document::new()), Value::from(1)];
        assert!(matches!(
            list_as_documents(&mixed),
            Err(DocumentError::WrongType { ref key, .. }) if key == "1"
        ));
    }
}

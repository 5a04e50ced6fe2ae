//! The dynamic value model.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::document::Document;
use crate::error::EncodeError;
use crate::number::Number;

/// Timestamp layout used when a `DateTime<Utc>` is stored as a string.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A wire-representable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 string.
    String(String),
    /// Decimal number, kept as text.
    Number(Number),
    /// Byte blob.
    Binary(Bytes),
    /// Boolean.
    Bool(bool),
    /// Null.
    Null,
    /// Set of strings.
    StringSet(Vec<String>),
    /// Set of numbers.
    NumberSet(Vec<Number>),
    /// Set of byte blobs.
    BinarySet(Vec<Bytes>),
    /// Ordered, heterogeneous list.
    List(Vec<Value>),
    /// Nested document.
    Document(Document),
}

impl Value {
    /// Name of the variant, as used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Binary(_) => "binary",
            Self::Bool(_) => "bool",
            Self::Null => "null",
            Self::StringSet(_) => "string set",
            Self::NumberSet(_) => "number set",
            Self::BinarySet(_) => "binary set",
            Self::List(_) => "list",
            Self::Document(_) => "document",
        }
    }

    /// `true` for a list or set with no elements. Empty strings, binaries and
    /// documents do not count.
    #[must_use]
    pub fn is_empty_collection(&self) -> bool {
        match self {
            Self::StringSet(v) => v.is_empty(),
            Self::NumberSet(v) => v.is_empty(),
            Self::BinarySet(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
            _ => false,
        }
    }

    /// Returns `true` if this is [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string if this is a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a [`Value::Number`].
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the bytes if this is a [`Value::Binary`].
    #[must_use]
    pub fn as_binary(&self) -> Option<&Bytes> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the boolean if this is a [`Value::Bool`].
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Value::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the document if this is a [`Value::Document`].
    #[must_use]
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(d) => Some(d),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Self::Binary(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Binary(Bytes::from(value))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::Binary(Bytes::copy_from_slice(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Self::Document(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::String(value.format(TIME_FORMAT).to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

macro_rules! value_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

value_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl TryFrom<f64> for Value {
    type Error = EncodeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Ok(Self::Number(Number::try_from(value)?))
    }
}

impl TryFrom<f32> for Value {
    type Error = EncodeError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Ok(Self::Number(Number::try_from(value)?))
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = EncodeError;

    /// Plain JSON maps onto the value model directly: numbers keep their
    /// textual form, arrays become lists and objects become documents.
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Ok(match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(Number::new(n.to_string())?),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::List(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(map) => {
                let mut doc = Document::with_capacity(map.len());
                for (k, v) in map {
                    doc.insert(k, Self::try_from(v)?);
                }
                Self::Document(doc)
            }
        })
    }
}

/// Build a document from any serializable record.
///
/// The record must serialize to a JSON object; anything else has no
/// document form.
pub fn to_document<T: serde::Serialize + ?Sized>(value: &T) -> Result<Document, EncodeError> {
    let json =
        serde_json::to_value(value).map_err(|e| EncodeError::Unsupported(e.to_string()))?;
    match Value::try_from(json)? {
        Value::Document(doc) => Ok(doc),
        other => Err(EncodeError::Unsupported(format!(
            "expected a record, got {}",
            other.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::Serialize;

    use super::*;

    #[test]
    fn test_should_convert_natives() {
        assert_eq!(Value::from("a"), Value::String("a".to_owned()));
        assert_eq!(Value::from(7_u8), Value::Number(Number::from(7)));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".to_owned()));
        assert_eq!(
            Value::from(vec![1_u8, 2, 3]),
            Value::Binary(Bytes::from_static(&[1, 2, 3]))
        );
    }

    #[test]
    fn test_should_format_time_as_compact_iso8601() {
        let t = Utc.with_ymd_and_hms(2015, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(Value::from(t), Value::String("2015-03-04T05:06:07Z".to_owned()));
    }

    #[test]
    fn test_should_reject_non_finite_float() {
        assert!(matches!(
            Value::try_from(f64::NAN),
            Err(EncodeError::Number(_))
        ));
        assert_eq!(
            Value::try_from(2.5_f64).unwrap(),
            Value::Number(Number::new("2.5").unwrap())
        );
    }

    #[test]
    fn test_should_detect_empty_collections_only() {
        assert!(Value::List(vec![]).is_empty_collection());
        assert!(Value::StringSet(vec![]).is_empty_collection());
        assert!(!Value::String(String::new()).is_empty_collection());
        assert!(!Value::Document(Document::new()).is_empty_collection());
        assert!(!Value::List(vec![Value::Null]).is_empty_collection());
    }

    #[test]
    fn test_should_convert_serializable_record_to_document() {
        #[derive(Serialize)]
        struct User {
            id: u32,
            name: &'static str,
            tags: Vec<&'static str>,
            score: f64,
        }
        let doc = to_document(&User {
            id: 1,
            name: "Bob",
            tags: vec!["a"],
            score: 1.5,
        })
        .unwrap();
        assert_eq!(doc.get("id"), Some(&Value::from(1)));
        assert_eq!(doc.get("name"), Some(&Value::from("Bob")));
        assert_eq!(doc.get("tags"), Some(&Value::List(vec![Value::from("a")])));
        assert_eq!(doc.get("score").and_then(Value::as_number).unwrap().as_str(), "1.5");
    }

    #[test]
    fn test_should_reject_non_record_in_to_document() {
        assert!(matches!(
            to_document(&vec![1, 2]),
            Err(EncodeError::Unsupported(_))
        ));
    }
}

//! Conversion between [`Value`] and [`WireValue`].
//!
//! Empty lists and sets are never sent. Document attributes holding one are
//! dropped at every nesting level; anywhere else (a list element, a bare
//! value) they are an [`EncodeError::EmptyCollection`].

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::document::Document;
use crate::error::{DecodeError, EncodeError};
use crate::number::Number;
use crate::value::Value;
use crate::wire::WireValue;

/// Encode one value.
pub fn encode(value: &Value) -> Result<WireValue, EncodeError> {
    if value.is_empty_collection() {
        return Err(EncodeError::EmptyCollection(value.type_name()));
    }
    Ok(match value {
        Value::String(s) => WireValue::S(s.clone()),
        Value::Number(n) => WireValue::N(n.as_str().to_owned()),
        Value::Binary(b) => WireValue::B(b.clone()),
        Value::Bool(b) => WireValue::Bool(*b),
        Value::Null => WireValue::Null,
        Value::StringSet(v) => WireValue::Ss(v.clone()),
        Value::NumberSet(v) => WireValue::Ns(v.iter().map(|n| n.as_str().to_owned()).collect()),
        Value::BinarySet(v) => WireValue::Bs(v.clone()),
        Value::List(items) => WireValue::L(items.iter().map(encode).collect::<Result<_, _>>()?),
        Value::Document(doc) => WireValue::M(encode_document(doc)?),
    })
}

/// Encode every attribute of a document, dropping empty lists and sets.
pub fn encode_document(doc: &Document) -> Result<HashMap<String, WireValue>, EncodeError> {
    let mut out = HashMap::with_capacity(doc.len());
    for (key, value) in doc {
        if value.is_empty_collection() {
            continue;
        }
        out.insert(key.clone(), encode(value)?);
    }
    Ok(out)
}

/// Decode one wire value.
pub fn decode(value: WireValue) -> Result<Value, DecodeError> {
    Ok(match value {
        WireValue::S(s) => Value::String(s),
        WireValue::N(n) => Value::Number(Number::new(n)?),
        WireValue::B(b) => Value::Binary(b),
        WireValue::Bool(b) => Value::Bool(b),
        WireValue::Null => Value::Null,
        WireValue::Ss(v) => Value::StringSet(v),
        WireValue::Ns(v) => Value::NumberSet(
            v.into_iter()
                .map(Number::new)
                .collect::<Result<_, _>>()?,
        ),
        WireValue::Bs(v) => Value::BinarySet(v),
        WireValue::L(items) => {
            Value::List(items.into_iter().map(decode).collect::<Result<_, _>>()?)
        }
        WireValue::M(m) => Value::Document(decode_document(m)?),
    })
}

/// Decode every attribute of a wire map.
pub fn decode_document(map: HashMap<String, WireValue>) -> Result<Document, DecodeError> {
    let mut doc = Document::with_capacity(map.len());
    for (key, value) in map {
        doc.insert(key, decode(value)?);
    }
    Ok(doc)
}

/// Decode a single typed value from JSON bytes, e.g. `{"N":"42"}`.
pub fn decode_json(bytes: &[u8]) -> Result<Value, DecodeError> {
    decode(serde_json::from_slice::<WireValue>(bytes)?)
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_document(self)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = HashMap::<String, WireValue>::deserialize(deserializer)?;
        decode_document(map).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode(self)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        decode(WireValue::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }
}

//! The typed JSON value format used on the wire.
//!
//! Every value is a single-key object whose key is a type tag, e.g.
//! `{"S": "hello"}` or `{"L": [{"N": "1"}]}`. Binary payloads are base64.

use std::collections::HashMap;
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const TAGS: &[&str] = &["S", "N", "B", "SS", "NS", "BS", "BOOL", "NULL", "L", "M"];

/// A wire value. Numbers stay strings here; the codec validates them.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// `S`
    S(String),
    /// `N`
    N(String),
    /// `B`
    B(Bytes),
    /// `SS`
    Ss(Vec<String>),
    /// `NS`
    Ns(Vec<String>),
    /// `BS`
    Bs(Vec<Bytes>),
    /// `BOOL`
    Bool(bool),
    /// `NULL`
    Null,
    /// `L`
    L(Vec<WireValue>),
    /// `M`
    M(HashMap<String, WireValue>),
}

impl WireValue {
    /// The type tag of this value.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::S(_) => "S",
            Self::N(_) => "N",
            Self::B(_) => "B",
            Self::Ss(_) => "SS",
            Self::Ns(_) => "NS",
            Self::Bs(_) => "BS",
            Self::Bool(_) => "BOOL",
            Self::Null => "NULL",
            Self::L(_) => "L",
            Self::M(_) => "M",
        }
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S(s) => write!(f, "{{S: {s}}}"),
            Self::N(n) => write!(f, "{{N: {n}}}"),
            Self::B(b) => write!(f, "{{B: {} bytes}}", b.len()),
            Self::Ss(v) => write!(f, "{{SS: {v:?}}}"),
            Self::Ns(v) => write!(f, "{{NS: {v:?}}}"),
            Self::Bs(v) => write!(f, "{{BS: {} items}}", v.len()),
            Self::Bool(b) => write!(f, "{{BOOL: {b}}}"),
            Self::Null => f.write_str("{NULL: true}"),
            Self::L(v) => write!(f, "{{L: {} items}}", v.len()),
            Self::M(m) => write!(f, "{{M: {} keys}}", m.len()),
        }
    }
}

impl Serialize for WireValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::S(s) => map.serialize_entry("S", s)?,
            Self::N(n) => map.serialize_entry("N", n)?,
            Self::B(b) => map.serialize_entry("B", &STANDARD.encode(b))?,
            Self::Ss(v) => map.serialize_entry("SS", v)?,
            Self::Ns(v) => map.serialize_entry("NS", v)?,
            Self::Bs(v) => {
                let encoded: Vec<String> = v.iter().map(|b| STANDARD.encode(b)).collect();
                map.serialize_entry("BS", &encoded)?;
            }
            Self::Bool(b) => map.serialize_entry("BOOL", b)?,
            Self::Null => map.serialize_entry("NULL", &true)?,
            Self::L(list) => map.serialize_entry("L", list)?,
            Self::M(m) => map.serialize_entry("M", m)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WireValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(WireValueVisitor)
    }
}

struct WireValueVisitor;

impl<'de> Visitor<'de> for WireValueVisitor {
    type Value = WireValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a typed value object with exactly one type key")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let Some(tag) = map.next_key::<String>()? else {
            return Err(de::Error::custom("typed value has no type key"));
        };

        let value = match tag.as_str() {
            "S" => WireValue::S(map.next_value()?),
            "N" => WireValue::N(map.next_value()?),
            "B" => {
                let encoded: String = map.next_value()?;
                WireValue::B(decode_base64(&encoded).map_err(de::Error::custom)?)
            }
            "SS" => WireValue::Ss(map.next_value()?),
            "NS" => WireValue::Ns(map.next_value()?),
            "BS" => {
                let encoded: Vec<String> = map.next_value()?;
                let decoded = encoded
                    .iter()
                    .map(|e| decode_base64(e))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(de::Error::custom)?;
                WireValue::Bs(decoded)
            }
            "BOOL" => WireValue::Bool(map.next_value()?),
            "NULL" => {
                let _: bool = map.next_value()?;
                WireValue::Null
            }
            "L" => WireValue::L(map.next_value()?),
            "M" => WireValue::M(map.next_value()?),
            other => return Err(de::Error::unknown_field(other, TAGS)),
        };

        if map.next_key::<IgnoredAny>()?.is_some() {
            return Err(de::Error::custom("typed value has more than one type key"));
        }

        Ok(value)
    }
}

fn decode_base64(encoded: &str) -> Result<Bytes, base64::DecodeError> {
    STANDARD.decode(encoded).map(Bytes::from)
}

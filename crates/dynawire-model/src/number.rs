//! Arbitrary-precision decimal numbers.
//!
//! DynamoDB numbers travel as strings. [`Number`] keeps the string verbatim so
//! no precision is lost between decode and re-encode, and only converts to a
//! native type when asked.

use std::fmt;
use std::str::FromStr;

use crate::error::NumberError;

/// A decimal number backed by its textual representation.
///
/// The inner string always satisfies
/// `-?(digits[.digits?] | .digits)([eE][+-]?digits)?`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number(String);

impl Number {
    /// Validate and wrap a decimal string.
    pub fn new(value: impl Into<String>) -> Result<Self, NumberError> {
        let value = value.into();
        if is_decimal(&value) {
            Ok(Self(value))
        } else {
            Err(NumberError::Invalid(value))
        }
    }

    /// The verbatim decimal string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the number, returning its decimal string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Parse as a platform-sized signed integer.
    pub fn to_isize(&self) -> Result<isize, NumberError> {
        self.parse_as("isize")
    }

    /// Parse as a 64-bit signed integer.
    pub fn to_i64(&self) -> Result<i64, NumberError> {
        self.parse_as("i64")
    }

    /// Parse as a 64-bit unsigned integer.
    pub fn to_u64(&self) -> Result<u64, NumberError> {
        self.parse_as("u64")
    }

    /// Parse as a 64-bit float. May lose precision for long mantissas.
    pub fn to_f64(&self) -> Result<f64, NumberError> {
        self.parse_as("f64")
    }

    fn parse_as<T: FromStr>(&self, target: &'static str) -> Result<T, NumberError> {
        self.0.parse::<T>().map_err(|_| NumberError::OutOfRange {
            value: self.0.clone(),
            target,
        })
    }
}

fn is_decimal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

impl FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Number {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

macro_rules! number_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

number_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl TryFrom<f64> for Number {
    type Error = NumberError;

    /// Formats with the shortest representation that round-trips, without an
    /// exponent. NaN and infinities have no decimal form.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() {
            Ok(Self(value.to_string()))
        } else {
            Err(NumberError::NonFinite(value.to_string()))
        }
    }
}

impl TryFrom<f32> for Number {
    type Error = NumberError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        if value.is_finite() {
            Ok(Self(value.to_string()))
        } else {
            Err(NumberError::NonFinite(value.to_string()))
        }
    }
}

//! Dynamic value representation for query string data.
//!
//! [`Value`] is the closed set of shapes a query string can describe:
//! scalars, sequences ([`Value::Array`]) and keyed containers
//! ([`Value::Object`]). Both pipelines decide how to treat a value by
//! matching on its variant; there is no duck typing.
//!
//! ## Creating Values
//!
//! ```rust
//! use nested_qs::{qs, Value};
//!
//! let text = Value::from("hello");
//! let number = Value::from(42);
//!
//! let obj = qs!({
//!     "name": "Alice",
//!     "tags": ["a", "b"]
//! });
//! assert!(obj.is_object());
//! ```
//!
//! ## Numbers
//!
//! Parsed values that look like numeric literals become [`Number`]s, the way
//! a browser-side form library would coerce them:
//!
//! ```rust
//! use nested_qs::{parse, Number, Value};
//!
//! let value = parse("a=007&b=1e3&c=0x1F&d=1.5");
//! assert_eq!(value.get("a"), Some(&Value::Number(Number::Integer(7))));
//! assert_eq!(value.get("b"), Some(&Value::Number(Number::Integer(1000))));
//! assert_eq!(value.get("c"), Some(&Value::Number(Number::Integer(31))));
//! assert_eq!(value.get("d"), Some(&Value::Number(Number::Float(1.5))));
//! ```

use crate::QsMap;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Largest integer magnitude an `f64` represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A dynamically-typed query string value.
///
/// `Null` also marks the holes of sparse arrays built from bracketed
/// indices; compaction removes them.
///
/// # Examples
///
/// ```rust
/// use nested_qs::{Value, Number};
///
/// let null = Value::Null;
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Binary payload, written as (lossy) UTF-8 text.
    Bytes(Vec<u8>),
    /// Timestamp, written as an ISO-8601 UTC string.
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    Object(QsMap),
}

/// A numeric value with the semantics of a double-precision float.
///
/// Whole numbers within the exactly-representable range are kept as
/// `Integer`; everything else is a `Float` or one of the special values.
///
/// # Examples
///
/// ```rust
/// use nested_qs::Number;
///
/// assert_eq!(Number::parse_literal("42"), Some(Number::Integer(42)));
/// assert_eq!(Number::parse_literal(" -2.50 "), Some(Number::Float(-2.5)));
/// assert_eq!(Number::parse_literal("-Infinity"), Some(Number::NegativeInfinity));
/// assert_eq!(Number::parse_literal("12px"), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    Infinity,
    NegativeInfinity,
    NaN,
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns `true` if this is a special value (Infinity, -Infinity, or NaN).
    #[inline]
    #[must_use]
    pub const fn is_special(&self) -> bool {
        matches!(
            self,
            Number::Infinity | Number::NegativeInfinity | Number::NaN
        )
    }

    /// Converts this number to an `i64` if it is a whole number in range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nested_qs::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// assert_eq!(Number::Infinity.as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
            Number::Infinity => f64::INFINITY,
            Number::NegativeInfinity => f64::NEG_INFINITY,
            Number::NaN => f64::NAN,
        }
    }

    /// Normalizes an `f64` into the narrowest matching variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nested_qs::Number;
    ///
    /// assert_eq!(Number::from_f64(3.0), Number::Integer(3));
    /// assert_eq!(Number::from_f64(0.25), Number::Float(0.25));
    /// assert_eq!(Number::from_f64(f64::INFINITY), Number::Infinity);
    /// ```
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            Number::NaN
        } else if value == f64::INFINITY {
            Number::Infinity
        } else if value == f64::NEG_INFINITY {
            Number::NegativeInfinity
        } else if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            Number::Integer(value as i64)
        } else {
            Number::Float(value)
        }
    }

    /// Parses a numeric literal the way a form decoder coerces text.
    ///
    /// Accepted forms, after trimming surrounding whitespace:
    /// - decimal with optional sign, fraction and exponent (`-1.5e3`, `.5`, `5.`, `007`)
    /// - `0x`, `0o` and `0b` radix literals without sign
    /// - `Infinity`, `+Infinity`, `-Infinity`
    ///
    /// Empty or whitespace-only text is not a number.
    #[must_use]
    pub fn parse_literal(text: &str) -> Option<Number> {
        let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        if trimmed.is_empty() {
            return None;
        }

        match trimmed {
            "Infinity" | "+Infinity" => return Some(Number::Infinity),
            "-Infinity" => return Some(Number::NegativeInfinity),
            _ => {}
        }

        if let Some(radix_value) = parse_radix_literal(trimmed) {
            return Some(Number::from_f64(radix_value));
        }

        if !is_decimal_literal(trimmed) {
            return None;
        }

        trimmed.parse::<f64>().ok().map(Number::from_f64)
    }
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let mut value = 0f64;
    for ch in text[2..].chars() {
        let digit = ch.to_digit(radix)?;
        value = value * f64::from(radix) + f64::from(digit);
    }
    Some(value)
}

fn is_decimal_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - int_start;

    let mut frac_digits = 0;
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        let frac_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        frac_digits = pos - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        pos += 1;
        if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
            pos += 1;
        }
        let exp_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == exp_start {
            return false;
        }
    }

    pos == bytes.len()
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            // -0 prints as 0, and whole floats print without a fraction
            Number::Float(fl) if *fl == 0.0 => write!(f, "0"),
            Number::Float(fl) => write!(f, "{}", fl),
            Number::Infinity => write!(f, "Infinity"),
            Number::NegativeInfinity => write!(f, "-Infinity"),
            Number::NaN => write!(f, "NaN"),
        }
    }
}

impl From<i8> for Number {
    fn from(value: i8) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i16> for Number {
    fn from(value: i16) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u8> for Number {
    fn from(value: u8) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<u16> for Number {
    fn from(value: u16) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::from_f64(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
    }
}

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` for arrays and objects, the values that nest.
    #[inline]
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nested_qs::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a whole number, returns it as `i64`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a number, returns it as `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&QsMap> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Looks up a key of an object value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nested_qs::parse;
    ///
    /// let value = parse("user[name]=Alice");
    /// let name = value.get("user").and_then(|u| u.get("name"));
    /// assert_eq!(name.and_then(|v| v.as_str()), Some("Alice"));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(obj) => obj.get(key),
            _ => None,
        }
    }

    /// Looks up a position of an array value.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    /// A short name for the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Bytes(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            Value::Date(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
            Value::Object(obj) => {
                write!(
                    f,
                    "{{{}}}",
                    obj.iter()
                        .map(|(k, v)| format!("{}: {}", k, v))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(n) => serializer.serialize_f64(n.as_f64()),
            Value::String(s) => serializer.serialize_str(s),
            Value::Bytes(bytes) => serializer.serialize_bytes(bytes),
            Value::Date(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any query string value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(Value::Number(Number::Integer(value as i64)))
                } else {
                    Ok(Value::Number(Number::Float(value as f64)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::from_f64(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E> {
                Ok(Value::Bytes(value.to_vec()))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Self::Value, E> {
                Ok(Value::Bytes(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = QsMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => n.as_i64().ok_or_else(|| {
                crate::Error::custom(format!("cannot convert number {} to i64", n))
            }),
            _ => Err(crate::Error::type_mismatch("integer", value.kind())),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            _ => Err(crate::Error::type_mismatch("number", value.kind())),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(crate::Error::type_mismatch("boolean", value.kind())),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(crate::Error::type_mismatch("string", value.kind())),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::from_f64(value as f64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::from_f64(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<QsMap> for Value {
    fn from(value: QsMap) -> Self {
        Value::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_parse_literal_decimal() {
        assert_eq!(Number::parse_literal("0"), Some(Number::Integer(0)));
        assert_eq!(Number::parse_literal("007"), Some(Number::Integer(7)));
        assert_eq!(Number::parse_literal("-12"), Some(Number::Integer(-12)));
        assert_eq!(Number::parse_literal("+3"), Some(Number::Integer(3)));
        assert_eq!(Number::parse_literal("1.0"), Some(Number::Integer(1)));
        assert_eq!(Number::parse_literal(".5"), Some(Number::Float(0.5)));
        assert_eq!(Number::parse_literal("5."), Some(Number::Integer(5)));
        assert_eq!(Number::parse_literal("2e3"), Some(Number::Integer(2000)));
        assert_eq!(Number::parse_literal("2.5E-1"), Some(Number::Float(0.25)));
        assert_eq!(Number::parse_literal("  42\n"), Some(Number::Integer(42)));
    }

    #[test]
    fn test_parse_literal_radix_and_special() {
        assert_eq!(Number::parse_literal("0xff"), Some(Number::Integer(255)));
        assert_eq!(Number::parse_literal("0o17"), Some(Number::Integer(15)));
        assert_eq!(Number::parse_literal("0b101"), Some(Number::Integer(5)));
        assert_eq!(Number::parse_literal("Infinity"), Some(Number::Infinity));
        assert_eq!(
            Number::parse_literal("-Infinity"),
            Some(Number::NegativeInfinity)
        );
    }

    #[test]
    fn test_parse_literal_rejects() {
        for text in [
            "", "   ", "abc", "1a", "1e", "e5", ".", "-", "+", "1.2.3", "NaN", "inf", "infinity",
            "-0x10", "0x", "1_000", "0xfg",
        ] {
            assert_eq!(Number::parse_literal(text), None, "{:?}", text);
        }
    }

    #[test]
    fn test_large_values_stay_float() {
        assert_eq!(
            Number::parse_literal("1e300"),
            Some(Number::Float(1e300))
        );
        assert_eq!(
            Number::from_f64(9_007_199_254_740_994.0),
            Number::Float(9_007_199_254_740_994.0)
        );
    }

    #[test]
    fn test_number_display() {
        assert_eq!(Number::Integer(-4).to_string(), "-4");
        assert_eq!(Number::Float(1.5).to_string(), "1.5");
        assert_eq!(Number::Float(-0.0).to_string(), "0");
        assert_eq!(Number::Infinity.to_string(), "Infinity");
        assert_eq!(Number::NaN.to_string(), "NaN");
    }

    #[test]
    fn test_tryfrom() {
        assert_eq!(i64::try_from(Value::from(42)).unwrap(), 42);
        assert_eq!(i64::try_from(Value::from(42.0)).unwrap(), 42);
        assert!(i64::try_from(Value::from("42")).is_err());
        assert_eq!(f64::try_from(Value::from(3)).unwrap(), 3.0);
        assert!(bool::try_from(Value::from(1)).is_err());
        assert_eq!(String::try_from(Value::from("hi")).unwrap(), "hi");
    }

    #[test]
    fn test_accessors() {
        let mut map = QsMap::new();
        map.insert("list".to_string(), Value::Array(vec![Value::from("x")]));
        let value = Value::Object(map);

        assert!(value.is_container());
        assert_eq!(
            value.get("list").and_then(|l| l.get_index(0)),
            Some(&Value::from("x"))
        );
        assert_eq!(value.get("missing"), None);
        assert_eq!(Value::from("x").get("list"), None);
        assert_eq!(value.kind(), "object");
    }

    #[test]
    fn test_display() {
        let date = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(Value::Date(date).to_string(), "2024-01-15T10:30:00.000Z");
        assert_eq!(Value::Bytes(b"raw".to_vec()).to_string(), "raw");
        assert_eq!(Value::Null.to_string(), "");
    }
}

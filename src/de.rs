//! Conversion of parsed [`Value`]s into `Deserialize` types.
//!
//! A query string carries no types: `page=2` decodes to a number, but
//! `debug=true` stays a string and `name=007` becomes the number `7`.
//! [`ValueDeserializer`] therefore coerces where a Rust type asks for it:
//!
//! | requested       | also accepted                                   |
//! |-----------------|-------------------------------------------------|
//! | integer, float  | numeric strings                                 |
//! | `bool`          | `"true"`/`"false"`, `"1"`/`"0"`, `"on"`, `1`/`0` |
//! | string          | numbers, booleans, dates                        |
//! | `Option::None`  | `null` and the empty string                     |
//! | sequence        | objects keyed by index, a single scalar         |
//! | map, struct     | arrays (keyed by index)                         |
//!
//! ```rust
//! use nested_qs::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Search { q: String, page: u32, exact: bool, tags: Vec<String> }
//!
//! let search: Search = from_str("q=42&page=2&exact=on&tags=rust").unwrap();
//! assert_eq!(
//!     search,
//!     Search { q: "42".into(), page: 2, exact: true, tags: vec!["rust".into()] }
//! );
//! ```

use crate::value::Number;
use crate::{Error, QsMap, Result, Value};
use chrono::SecondsFormat;
use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

/// Deserializer reading from an owned [`Value`].
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::type_mismatch(expected, &describe(&self.value))
    }

    fn integer(&self) -> Result<i64> {
        let number = match &self.value {
            Value::Number(n) => Some(*n),
            Value::String(s) => Number::parse_literal(s),
            _ => None,
        };
        number
            .and_then(|n| n.as_i64())
            .ok_or_else(|| self.mismatch("integer"))
    }

    fn float(&self) -> Result<f64> {
        let number = match &self.value {
            Value::Number(n) => Some(*n),
            Value::String(s) => Number::parse_literal(s),
            _ => None,
        };
        number
            .map(|n| n.as_f64())
            .ok_or_else(|| self.mismatch("float"))
    }

    fn boolean(&self) -> Result<bool> {
        match &self.value {
            Value::Bool(b) => Ok(*b),
            Value::Number(Number::Integer(1)) => Ok(true),
            Value::Number(Number::Integer(0)) => Ok(false),
            Value::String(s) => match s.as_str() {
                "true" | "1" | "on" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(self.mismatch("boolean")),
            },
            _ => Err(self.mismatch("boolean")),
        }
    }

    fn into_text(self) -> Result<String> {
        match self.value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Date(dt) => Ok(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Bytes(bytes) => String::from_utf8(bytes)
                .map_err(|e| Error::type_mismatch("string", &format!("bytes ({})", e))),
            other => Err(Error::type_mismatch("string", &describe(&other))),
        }
    }

    fn is_empty_scalar(&self) -> bool {
        match &self.value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// A short description of `value` for error messages.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("string {:?}", s),
        Value::Number(n) => format!("number {}", n),
        Value::Bool(b) => format!("boolean {}", b),
        other => other.kind().to_string(),
    }
}

/// Orders an index-keyed object as a sequence, handing the map back if any
/// key is not an index.
fn indexed_entries(map: QsMap) -> std::result::Result<Vec<Value>, QsMap> {
    let indexed = map
        .keys()
        .all(|k| k.bytes().all(|b| b.is_ascii_digit()) && k.parse::<usize>().is_ok());
    if !indexed {
        return Err(map);
    }
    let mut entries: Vec<(usize, Value)> = map
        .into_iter()
        .filter_map(|(key, value)| key.parse().ok().map(|index| (index, value)))
        .collect();
    entries.sort_by_key(|(index, _)| *index);
    Ok(entries.into_iter().map(|(_, value)| value).collect())
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(n) => visitor.visit_f64(n.as_f64()),
            Value::String(s) => visitor.visit_string(s),
            Value::Bytes(bytes) => visitor.visit_byte_buf(bytes),
            Value::Date(dt) => visitor.visit_string(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_bool(self.boolean()?)
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i64(self.integer()?)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f64(self.float()?)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_f64(self.float()?)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_string(self.into_text()?)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_string(self.into_text()?)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_string(self.into_text()?)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Bytes(bytes) => visitor.visit_byte_buf(bytes),
            Value::String(s) => visitor.visit_byte_buf(s.into_bytes()),
            other => ValueDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.is_empty_scalar() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.is_empty_scalar() {
            visitor.visit_unit()
        } else {
            Err(self.mismatch("unit"))
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Null => visitor.visit_seq(SeqDeserializer::new(Vec::new())),
            Value::Object(obj) => match indexed_entries(obj) {
                Ok(items) => visitor.visit_seq(SeqDeserializer::new(items)),
                Err(obj) => Err(Error::type_mismatch(
                    "sequence",
                    &describe(&Value::Object(obj)),
                )),
            },
            scalar => visitor.visit_seq(SeqDeserializer::new(vec![scalar])),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            Value::Array(arr) => {
                let obj = arr
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item))
                    .collect();
                visitor.visit_map(MapDeserializer::new(obj))
            }
            Value::Null => visitor.visit_map(MapDeserializer::new(QsMap::new())),
            Value::String(s) if s.is_empty() => {
                visitor.visit_map(MapDeserializer::new(QsMap::new()))
            }
            other => Err(Error::type_mismatch("map", &describe(&other))),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::String(variant) => visitor.visit_enum(EnumDeserializer {
                variant,
                value: None,
            }),
            Value::Object(obj) if obj.len() == 1 => {
                let Some((variant, value)) = obj.into_iter().next() else {
                    return Err(Error::custom("empty enum object"));
                };
                visitor.visit_enum(EnumDeserializer {
                    variant,
                    value: Some(value),
                })
            }
            other => Err(Error::type_mismatch(
                "enum variant name or single-key object",
                &describe(&other),
            )),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        i128 u128
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = ValueDeserializer;

    fn into_deserializer(self) -> ValueDeserializer {
        ValueDeserializer::new(self)
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: <QsMap as IntoIterator>::IntoIter,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: QsMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None | Some(Value::Null) => Ok(()),
            Some(Value::String(s)) if s.is_empty() => Ok(()),
            Some(other) => Err(Error::type_mismatch("unit variant", &describe(&other))),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::type_mismatch("newtype variant", "unit variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(value) => de::Deserializer::deserialize_seq(ValueDeserializer::new(value), visitor),
            None => Err(Error::type_mismatch("tuple variant", "unit variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(value) => de::Deserializer::deserialize_map(ValueDeserializer::new(value), visitor),
            None => Err(Error::type_mismatch("struct variant", "unit variant")),
        }
    }
}

pub(crate) fn from_value<T>(value: Value) -> Result<T>
where
    T: de::DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qs;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Deserialize, Debug, PartialEq)]
    enum Shape {
        Empty,
        Circle(u32),
        Point(i32, i32),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn test_numbers_from_strings() {
        assert_eq!(from_value::<u32>(qs!("12")).unwrap(), 12);
        assert_eq!(from_value::<i64>(qs!(" -3 ")).unwrap(), -3);
        assert_eq!(from_value::<f64>(qs!("2.5")).unwrap(), 2.5);
        assert_eq!(from_value::<u8>(qs!(7)).unwrap(), 7);
        assert!(from_value::<u8>(qs!(300)).is_err());
        assert!(from_value::<i32>(qs!(1.5)).is_err());
    }

    #[test]
    fn test_integer_mismatch_message() {
        let err = from_value::<u32>(qs!("first")).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert!(err.to_string().contains("string \"first\""));
    }

    #[test]
    fn test_booleans() {
        assert!(from_value::<bool>(qs!("true")).unwrap());
        assert!(from_value::<bool>(qs!("on")).unwrap());
        assert!(from_value::<bool>(qs!(1)).unwrap());
        assert!(!from_value::<bool>(qs!("0")).unwrap());
        assert!(!from_value::<bool>(qs!(false)).unwrap());
        assert!(from_value::<bool>(qs!("yes")).is_err());
    }

    #[test]
    fn test_strings_from_scalars() {
        assert_eq!(from_value::<String>(qs!(42)).unwrap(), "42");
        assert_eq!(from_value::<String>(qs!(true)).unwrap(), "true");
        assert_eq!(from_value::<String>(Value::Bytes(b"hi".to_vec())).unwrap(), "hi");
        assert!(from_value::<String>(qs!({"a": 1})).is_err());
    }

    #[test]
    fn test_options() {
        assert_eq!(from_value::<Option<u32>>(qs!("")).unwrap(), None);
        assert_eq!(from_value::<Option<u32>>(Value::Null).unwrap(), None);
        assert_eq!(from_value::<Option<u32>>(qs!("4")).unwrap(), Some(4));
    }

    #[test]
    fn test_sequences() {
        assert_eq!(from_value::<Vec<u32>>(qs!([1, "2"])).unwrap(), vec![1, 2]);
        assert_eq!(from_value::<Vec<String>>(qs!("solo")).unwrap(), vec!["solo"]);
        assert_eq!(
            from_value::<Vec<String>>(qs!({"2": "c", "10": "d", "0": "a"})).unwrap(),
            vec!["a", "c", "d"]
        );
        assert!(from_value::<Vec<String>>(qs!({"0": "a", "b": "c"})).is_err());
        assert!(from_value::<Vec<u32>>(Value::Null).unwrap().is_empty());
        assert_eq!(from_value::<(u8, String)>(qs!([1, "x"])).unwrap(), (1, "x".to_string()));
    }

    #[test]
    fn test_maps() {
        let map: BTreeMap<String, u32> = from_value(qs!({"a": 1, "b": "2"})).unwrap();
        assert_eq!(map.get("b"), Some(&2));

        let map: BTreeMap<u32, String> = from_value(qs!(["x", "y"])).unwrap();
        assert_eq!(map.get(&1).map(String::as_str), Some("y"));
    }

    #[test]
    fn test_enums() {
        assert_eq!(from_value::<Shape>(qs!("Empty")).unwrap(), Shape::Empty);
        assert_eq!(from_value::<Shape>(qs!({"Circle": "3"})).unwrap(), Shape::Circle(3));
        assert_eq!(
            from_value::<Shape>(qs!({"Point": ["1", "-2"]})).unwrap(),
            Shape::Point(1, -2)
        );
        assert_eq!(
            from_value::<Shape>(qs!({"Rect": {"w": 4, "h": "5"}})).unwrap(),
            Shape::Rect { w: 4, h: 5 }
        );
        assert!(from_value::<Shape>(qs!({"Circle": 1, "Rect": 2})).is_err());
        assert!(from_value::<Shape>(qs!("Circle")).is_err());
    }

    #[test]
    fn test_value_passes_through() {
        let value = qs!({"a": [1, {"b": "c"}], "d": null});
        assert_eq!(from_value::<Value>(value.clone()).unwrap(), value);
    }
}

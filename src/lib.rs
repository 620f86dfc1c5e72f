//! # nested_qs
//!
//! Nested query strings for Rust: bracket-keyed `application/x-www-form-urlencoded`
//! data in both directions.
//!
//! ## What is a nested query string?
//!
//! Form libraries and web frameworks encode structured data in flat
//! query strings by putting the path into the key:
//!
//! ```text
//! filter[status]=open&filter[tags][0]=bug&filter[tags][1]=ui&page=2
//! ```
//!
//! This crate turns such strings into a [`Value`] tree and back, with
//! limits on nesting depth, array size and pair count so untrusted input
//! stays cheap to process.
//!
//! ## Key Features
//!
//! - **Both directions**: [`stringify`] flattens, [`parse`] rebuilds
//! - **Bounded parsing**: `depth`, `array_limit` and `parameter_limit` in [`QsOptions`]
//! - **Fail-open decoding**: malformed escapes keep their raw text, nothing panics
//! - **Serde Compatible**: typed structs via [`to_string`] and [`from_str`]
//! - **Ordered**: object keys keep insertion order
//!
//! ## Quick Start
//!
//! ```rust
//! use nested_qs::{parse, qs, stringify};
//!
//! let value = parse("a[b]=1&a[c][0]=x&a[c][1]=y");
//! assert_eq!(value, qs!({"a": {"b": 1, "c": ["x", "y"]}}));
//!
//! let text = stringify(&qs!({"a": {"b": "c"}}));
//! assert_eq!(text, "a%5Bb%5D=c");
//! assert_eq!(parse(&text), qs!({"a": {"b": "c"}}));
//! ```
//!
//! ### Typed data
//!
//! ```rust
//! use nested_qs::{from_str, to_string};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Filter {
//!     status: String,
//!     tags: Vec<String>,
//!     page: u32,
//! }
//!
//! let filter = Filter {
//!     status: "open".to_string(),
//!     tags: vec!["bug".to_string(), "ui".to_string()],
//!     page: 2,
//! };
//!
//! let text = to_string(&filter).unwrap();
//! let back: Filter = from_str(&text).unwrap();
//! assert_eq!(filter, back);
//! ```
//!
//! ### Options
//!
//! ```rust
//! use nested_qs::{parse_with_options, qs, Delimiter, QsOptions};
//!
//! let options = QsOptions::new()
//!     .with_delimiter(Delimiter::literal(";"))
//!     .with_depth(1);
//! let value = parse_with_options("a[b][c]=d;e=f", &options);
//! assert_eq!(value, qs!({"a": {"b": {"[c]": "d"}}, "e": "f"}));
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Parsing and stringifying never fail; only the typed layer returns errors
//! - Names of built-in object members (`__proto__`, `constructor`, ...) are
//!   dropped from parsed keys
//!
//! ## Format Reference
//!
//! The accepted grammar and coercions are documented in [`format`].
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - parse and stringify round trip
//! - **`macro.rs`** - building values with the `qs!` macro
//! - **`nested_keys.rs`** - bracket keys, depth folding and array limits
//! - **`dynamic_values.rs`** - inspecting parsed values
//! - **`custom_options.rs`** - delimiters and limits
//!
//! Run any example with: `cargo run --example <name>`

pub mod builder;
pub mod codec;
pub mod compact;
pub mod de;
pub mod error;
pub mod format;
pub mod key_path;
pub mod macros;
pub mod map;
pub mod merge;
pub mod node;
pub mod options;
pub mod parse;
pub mod ser;
pub mod value;
pub mod walker;

pub use de::ValueDeserializer;
pub use error::{Error, Result};
pub use map::QsMap;
pub use options::{Delimiter, QsOptions};
pub use ser::ValueSerializer;
pub use value::{Number, Value};

use serde::{de::DeserializeOwned, Serialize};
use std::io;

/// Flattens `value` into a query string.
///
/// Each scalar leaf becomes one `key=value` pair with a fully bracketed,
/// percent-encoded key. A scalar at the top level has no keys and yields
/// the empty string.
///
/// # Examples
///
/// ```rust
/// use nested_qs::{qs, stringify};
///
/// assert_eq!(stringify(&qs!({"a": "b", "c": [1, 2]})), "a=b&c%5B0%5D=1&c%5B1%5D=2");
/// assert_eq!(stringify(&qs!({"a": {"b": null}})), "a%5Bb%5D=");
/// assert_eq!(stringify(&qs!("plain")), "");
/// ```
#[must_use]
pub fn stringify(value: &Value) -> String {
    stringify_with_options(value, &QsOptions::default())
}

/// Flattens `value` into a query string joined with the configured delimiter.
///
/// # Examples
///
/// ```rust
/// use nested_qs::{qs, stringify_with_options, Delimiter, QsOptions};
///
/// let options = QsOptions::new().with_delimiter(Delimiter::literal(";"));
/// assert_eq!(stringify_with_options(&qs!({"a": 1, "b": 2}), &options), "a=1;b=2");
/// ```
#[must_use]
pub fn stringify_with_options(value: &Value, options: &QsOptions) -> String {
    walker::pairs(value).join(options.delimiter.as_str())
}

/// Parses a query string with the default options.
///
/// # Examples
///
/// ```rust
/// use nested_qs::{parse, qs};
///
/// assert_eq!(parse("a[0]=b&a[1]=c"), qs!({"a": ["b", "c"]}));
/// assert_eq!(parse("a=1&a=2"), qs!({"a": [1, 2]}));
/// assert_eq!(parse(""), qs!({}));
/// ```
#[must_use]
pub fn parse(input: &str) -> Value {
    parse::parse_str(input, &QsOptions::default())
}

/// Parses a query string with custom options.
///
/// # Examples
///
/// ```rust
/// use nested_qs::{parse_with_options, qs, QsOptions};
///
/// let options = QsOptions::new().with_parameter_limit(2);
/// assert_eq!(parse_with_options("a=1&b=2&c=3", &options), qs!({"a": 1, "b": 2}));
/// ```
#[must_use]
pub fn parse_with_options(input: &str, options: &QsOptions) -> Value {
    parse::parse_str(input, options)
}

/// Expands an already structured value, such as a framework's raw
/// key/value map, through the key-path grammar.
///
/// # Examples
///
/// ```rust
/// use nested_qs::{parse_value, qs};
///
/// let raw = qs!({"user[name]": "Alice", "user[roles][0]": "admin"});
/// assert_eq!(parse_value(raw), qs!({"user": {"name": "Alice", "roles": ["admin"]}}));
/// ```
#[must_use]
pub fn parse_value(input: Value) -> Value {
    parse::parse_structured(input, &QsOptions::default())
}

/// Expands an already structured value with custom options.
#[must_use]
pub fn parse_value_with_options(input: Value, options: &QsOptions) -> Value {
    parse::parse_structured(input, options)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use nested_qs::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented, such as a map with
/// non-scalar keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    ser::to_value(value)
}

/// Serialize any `T: Serialize` to a query string.
///
/// # Examples
///
/// ```rust
/// use nested_qs::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x=1&y=2");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidTopLevel`] if `T` does not serialize to a
/// struct, map or sequence.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &QsOptions::default())
}

/// Serialize any `T: Serialize` to a query string with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or the top level is a scalar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &QsOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    if !value.is_container() {
        return Err(Error::invalid_top_level(value.kind()));
    }
    Ok(stringify_with_options(&value, options))
}

/// Serialize any `T: Serialize` as a query string into a writer.
///
/// # Examples
///
/// ```rust
/// use nested_qs::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x=1&y=2");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Errors
///
/// Returns an error if the value's shape does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    de::from_value(value)
}

/// Deserialize an instance of type `T` from a query string.
///
/// # Examples
///
/// ```rust
/// use nested_qs::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x=1&y=2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the parsed structure cannot be deserialized to `T`.
/// Parsing itself never fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(input: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(input, &QsOptions::default())
}

/// Deserialize an instance of type `T` from a query string parsed with
/// custom options.
///
/// # Errors
///
/// Returns an error if the parsed structure cannot be deserialized to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(input: &str, options: &QsOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(parse_with_options(input, options))
}

/// Deserialize an instance of type `T` from an I/O stream holding a query string.
///
/// # Examples
///
/// ```rust
/// use nested_qs::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x=1&y=2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not UTF-8, or the data
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qs;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        home: Point,
    }

    fn alice() -> User {
        User {
            id: 123,
            name: "Alice Smith".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            home: Point { x: -4, y: 9 },
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        assert_eq!(text, "x=1&y=2");
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = alice();
        let text = to_string(&user).unwrap();
        assert!(text.contains("name=Alice%20Smith"));
        assert!(text.contains("home%5Bx%5D=-4"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_custom_delimiter_round_trip() {
        let options = QsOptions::new().with_delimiter(Delimiter::literal(";"));
        let text = to_string_with_options(&alice(), &options).unwrap();
        assert!(!text.contains('&'));
        let user_back: User = from_str_with_options(&text, &options).unwrap();
        assert_eq!(user_back, alice());
    }

    #[test]
    fn test_top_level_scalar_rejected() {
        assert!(matches!(to_string(&42), Err(Error::InvalidTopLevel(_))));
        assert!(matches!(to_string("text"), Err(Error::InvalidTopLevel(_))));
        assert_eq!(to_string(&vec!["a", "b"]).unwrap(), "0=a&1=b");
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(value.get("x"), Some(&Value::Number(Number::Integer(1))));
        assert_eq!(value.get("y"), Some(&Value::Number(Number::Integer(2))));
    }

    #[test]
    fn test_parse_value_matches_parse() {
        let raw = qs!({"a[b]": 1, "a[c]": 2});
        assert_eq!(parse_value(raw), parse("a[b]=1&a[c]=2"));
    }

    #[test]
    fn test_writer_and_reader() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &alice()).unwrap();
        let user_back: User = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(user_back, alice());
    }
}

//! The parse pipeline: split, decode, expand, merge, compact.
//!
//! ```text
//! "a[b]=1&a[c]=2"
//!   -> pairs      [("a[b]", 1), ("a[c]", 2)]
//!   -> skeletons  {a: {b: 1}}, {a: {c: 2}}
//!   -> merged     {a: {b: 1, c: 2}}
//!   -> compacted  sparse arrays closed up
//! ```

use crate::builder::build;
use crate::codec::{decode_key, decode_primitive};
use crate::compact::compact;
use crate::key_path::KeyPath;
use crate::merge::merge;
use crate::node::Node;
use crate::{QsMap, QsOptions, Value};
use indexmap::IndexMap;

/// Splits `input` into decoded, grouped pairs.
///
/// At most `parameter_limit` parts are read. A key seen more than once
/// collects its values into an array in encounter order. A part without
/// `=` sets its key to the empty string.
///
/// # Examples
///
/// ```rust
/// use nested_qs::parse::split_pairs;
/// use nested_qs::{qs, QsOptions};
///
/// let pairs = split_pairs("a=x&b&a=y", &QsOptions::default());
/// assert_eq!(pairs.get("a"), Some(&qs!(["x", "y"])));
/// assert_eq!(pairs.get("b"), Some(&qs!("")));
/// ```
pub fn split_pairs(input: &str, options: &QsOptions) -> QsMap {
    let parts = options.delimiter.split(input, options.parameter_limit);
    if let Some(limit) = options.parameter_limit {
        if parts.len() == limit {
            log::debug!("read {} pairs, any further pairs are ignored", limit);
        }
    }

    let mut pairs = QsMap::new();
    for part in parts {
        match split_at_equals(part) {
            None => {
                pairs.insert(decode_key(part), Value::String(String::new()));
            }
            Some((raw_key, raw_value)) => {
                let key = decode_key(raw_key);
                let value = decode_primitive(raw_value);
                match pairs.get_mut(&key) {
                    Some(Value::Array(values)) => values.push(value),
                    Some(existing) => {
                        let first = std::mem::take(existing);
                        *existing = Value::Array(vec![first, value]);
                    }
                    None => {
                        pairs.insert(key, value);
                    }
                }
            }
        }
    }
    pairs
}

/// Finds the key/value boundary: right after the first `]=` when there is
/// one (so `=` inside brackets stays in the key), else the first `=`.
fn split_at_equals(part: &str) -> Option<(&str, &str)> {
    let pos = match part.find("]=") {
        Some(bracket) => bracket + 1,
        None => part.find('=')?,
    };
    Some((&part[..pos], &part[pos + 1..]))
}

/// Expands every grouped pair and folds the skeletons into one structure.
pub fn expand_pairs(pairs: QsMap, options: &QsOptions) -> Value {
    let mut tree = Node::Object(IndexMap::new());
    for (key, value) in pairs {
        let Some(path) = KeyPath::parse(&key, options.depth) else {
            continue;
        };
        merge(&mut tree, build(path.segments(), value, options));
    }
    let mut result = tree.into_value();
    compact(&mut result);
    result
}

/// Parses a query string with the given options.
pub fn parse_str(input: &str, options: &QsOptions) -> Value {
    if input.is_empty() {
        return Value::Object(QsMap::new());
    }
    expand_pairs(split_pairs(input, options), options)
}

/// Re-expands an already structured value.
///
/// Object keys go through the key-path grammar like decoded keys would
/// (values are kept as given), strings are parsed as query strings, and
/// array indices act as keys. Other values yield an empty object.
pub fn parse_structured(input: Value, options: &QsOptions) -> Value {
    match input {
        Value::String(text) => parse_str(&text, options),
        Value::Object(map) => expand_pairs(map, options),
        Value::Array(items) => {
            let map = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect();
            expand_pairs(map, options)
        }
        _ => Value::Object(QsMap::new()),
    }
}

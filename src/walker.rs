//! Flattens a nested value into `key=value` pairs.
//!
//! The walk is depth-first: arrays contribute `prefix[index]`, objects
//! contribute `prefix[key]` in insertion order, and every scalar ends one
//! branch with a single pair. There is no depth limit on this side.

use crate::codec::{encode_component, encode_primitive};
use crate::key_path::child_key;
use crate::Value;

/// Appends the pairs for `value` under `prefix` to `out`.
///
/// Empty arrays and objects contribute no pairs at all.
///
/// # Examples
///
/// ```rust
/// use nested_qs::walker::flatten;
/// use nested_qs::qs;
///
/// let mut pairs = Vec::new();
/// flatten(&qs!({"b": [1, 2]}), "a", &mut pairs);
/// assert_eq!(pairs, vec!["a%5Bb%5D%5B0%5D=1", "a%5Bb%5D%5B1%5D=2"]);
/// ```
pub fn flatten(value: &Value, prefix: &str, out: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(item, &child_key(prefix, &index.to_string()), out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map.iter() {
                flatten(item, &child_key(prefix, key), out);
            }
        }
        scalar => {
            let mut pair = encode_component(prefix).into_owned();
            pair.push('=');
            pair.push_str(&encode_primitive(scalar));
            out.push(pair);
        }
    }
}

/// Flattens every top-level entry of `value` into pairs.
///
/// Object keys and array indices name the top-level entries; a scalar at
/// the top level has no keys and yields no pairs.
pub fn pairs(value: &Value) -> Vec<String> {
    let mut out = Vec::new();
    match value {
        Value::Object(map) => {
            for (key, item) in map.iter() {
                flatten(item, key, &mut out);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(item, &index.to_string(), &mut out);
            }
        }
        scalar => {
            log::debug!("top-level {} has no keys to stringify", scalar.kind());
        }
    }
    out
}

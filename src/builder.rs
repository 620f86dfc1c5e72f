//! Expands one key path into a minimal nested skeleton around its value.
//!
//! `a[b][1]=x` becomes `{a: {b: [1 => "x"]}}`: one leaf, wrapped in one
//! container per segment. Array positions stay sparse (see
//! [`Node`]), and the merge engine later folds the skeletons of all keys
//! together.

use crate::key_path::strip_brackets;
use crate::node::Node;
use crate::{QsOptions, Value};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Builds the skeleton for `segments` with `value` as its single leaf.
///
/// For each head segment:
/// - `[]` wraps the rest in a one-element array;
/// - a bracketed non-negative integer no greater than `array_limit` places
///   the rest at that position of a sparse array;
/// - anything else becomes a single-key object, brackets stripped.
///
/// # Examples
///
/// ```rust
/// use nested_qs::builder::build;
/// use nested_qs::{qs, QsOptions, Value};
///
/// let options = QsOptions::default();
/// let segments = vec!["a".to_string(), "[1]".to_string()];
/// let skeleton = build(&segments, Value::from("x"), &options);
/// assert_eq!(skeleton.into_value(), qs!({"a": ["x"]}));
/// ```
pub fn build(segments: &[String], value: Value, options: &QsOptions) -> Node {
    let (head, rest) = match segments.split_first() {
        Some(split) => split,
        None => return Node::from(value),
    };

    if head == "[]" {
        return Node::Array(BTreeMap::from([(0, build(rest, value, options))]));
    }

    let candidate = strip_brackets(head);
    let bracketed = candidate.len() != head.len();

    if bracketed {
        if let Some(index) = array_index(candidate, options.array_limit) {
            return Node::Array(BTreeMap::from([(index, build(rest, value, options))]));
        }
    }

    let mut entries = IndexMap::with_capacity(1);
    entries.insert(candidate.to_string(), build(rest, value, options));
    Node::Object(entries)
}

/// Parses `candidate` as an array position within `limit`.
fn array_index(candidate: &str, limit: usize) -> Option<usize> {
    if candidate.is_empty() || !candidate.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match candidate.parse::<usize>() {
        Ok(index) if index <= limit => Some(index),
        _ => {
            log::trace!(
                "index {} is above the array limit {}, using an object key",
                candidate,
                limit
            );
            None
        }
    }
}

//! Working tree for the parse pipeline.
//!
//! Bracketed indices can be as large as `array_limit` allows, so arrays are
//! kept sparse while skeletons are built and merged: a [`Node::Array`]
//! stores only the positions that were actually written. Converting back
//! with [`Node::into_value`] closes the gaps, so memory follows the number
//! of pairs read rather than the size of any index.
//!
//! ```rust
//! use nested_qs::node::Node;
//! use nested_qs::Value;
//! use std::collections::BTreeMap;
//!
//! let node = Node::Array(BTreeMap::from([(usize::MAX, Node::from(Value::from("x")))]));
//! assert_eq!(node.into_value(), Value::Array(vec![Value::from("x")]));
//! ```

use crate::{QsMap, Value};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// A parsed structure whose arrays are sparse.
///
/// `Leaf` holds scalars (and `Null`); containers always use the other two
/// variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Value),
    Array(BTreeMap<usize, Node>),
    Object(IndexMap<String, Node>),
}

impl Node {
    /// Returns `true` for `Array` and `Object`.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Array(_) | Node::Object(_))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Leaf(Value::Null))
    }

    /// Converts to a [`Value`], keeping the order of array positions and
    /// dropping the gaps between them.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Node::Leaf(value) => value,
            Node::Array(slots) => {
                Value::Array(slots.into_values().map(Node::into_value).collect())
            }
            Node::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, node)| (key, node.into_value()))
                    .collect::<QsMap>(),
            ),
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::Leaf(Value::Null)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Node::Array(
                items
                    .into_iter()
                    .map(Node::from)
                    .enumerate()
                    .collect(),
            ),
            Value::Object(map) => Node::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Node::from(value)))
                    .collect(),
            ),
            scalar => Node::Leaf(scalar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qs;

    #[test]
    fn test_value_conversion_keeps_shape() {
        let value = qs!({"a": [1, {"b": null}], "c": "d"});
        assert_eq!(Node::from(value.clone()).into_value(), value);
    }

    #[test]
    fn test_gaps_close_in_position_order() {
        let node = Node::Array(BTreeMap::from([
            (40, Node::from(Value::from("c"))),
            (3, Node::from(Value::from("a"))),
            (17, Node::from(Value::from("b"))),
        ]));
        assert_eq!(node.into_value(), qs!(["a", "b", "c"]));
    }

    #[test]
    fn test_leaf_predicates() {
        assert!(Node::default().is_null());
        assert!(!Node::from(Value::from(0)).is_container());
        assert!(Node::from(qs!([])).is_container());
        assert!(Node::from(qs!({})).is_container());
    }
}

//! Final clean-up pass over a merged result.
//!
//! Arrays lose their `Null` elements while the remaining elements keep
//! their order, and each container is visited once. Parsed input has its
//! sparse positions closed up already (see [`Node`](crate::node::Node)),
//! so the nulls removed here come from structured input such as
//! `parse_value(qs!({"a": [null, "x"]}))`.
//!
//! Containers are tracked by identity. An owned `Value` tree cannot reach
//! the same container twice, so the guard never fires on real input; it
//! keeps the first-visit-wins rule explicit for the walk.

use crate::Value;
use std::collections::HashSet;

/// Compacts `value` in place.
///
/// # Examples
///
/// ```rust
/// use nested_qs::compact::compact;
/// use nested_qs::qs;
///
/// let mut value = qs!({"a": [null, null, "x"], "b": {"c": [null, 1]}});
/// compact(&mut value);
/// assert_eq!(value, qs!({"a": ["x"], "b": {"c": [1]}}));
/// ```
pub fn compact(value: &mut Value) {
    Compactor::default().visit(value);
}

/// Tracks which containers have been visited during one compaction.
///
/// Containers are identified by address. A container reached a second time
/// is left as it is instead of being walked again, so the first visit wins.
#[derive(Default)]
struct Compactor {
    seen: HashSet<usize>,
}

impl Compactor {
    fn visit(&mut self, value: &mut Value) {
        if !value.is_container() {
            return;
        }
        let identity = value as *const Value as usize;
        if !self.seen.insert(identity) {
            log::trace!("container already compacted, skipping");
            return;
        }

        match value {
            Value::Array(items) => {
                items.retain(|item| !item.is_null());
                for item in items.iter_mut() {
                    self.visit(item);
                }
            }
            Value::Object(map) => {
                for item in map.values_mut() {
                    self.visit(item);
                }
            }
            _ => {}
        }
    }
}

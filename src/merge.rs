//! Deep merge of parsed skeletons into the accumulated result.
//!
//! Each decoded key produces a skeleton with one leaf (see
//! [`builder`](crate::builder)); folding them together with [`merge`]
//! rebuilds the full structure. The target is mutated in place and the
//! source is consumed, so the two can never alias.

use crate::node::Node;
use crate::Value;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::mem;

/// Merges `source` into `target`.
///
/// - A `Null` source changes nothing.
/// - An array source merges position by position; `Null` slots are skipped,
///   container slots in the target are merged recursively, anything else is
///   overwritten. An object target takes the positions as string keys.
/// - An object source first turns an array target into an object keyed by
///   index (holes dropped), then assigns or recursively merges each key.
///   Scalar values overwrite.
/// - A scalar source is appended to an array target, ignored by an object
///   target and overwrites a scalar target.
/// - A scalar target keeps its value when the source is a container; only a
///   `Null` target takes the container.
///
/// # Examples
///
/// ```rust
/// use nested_qs::merge::merge;
/// use nested_qs::node::Node;
/// use nested_qs::qs;
///
/// let mut target = Node::from(qs!({"a": {"b": 1}}));
/// merge(&mut target, Node::from(qs!({"a": {"c": 2}})));
/// assert_eq!(target.into_value(), qs!({"a": {"b": 1, "c": 2}}));
/// ```
pub fn merge(target: &mut Node, source: Node) {
    match source {
        Node::Leaf(Value::Null) => {}
        Node::Leaf(value) if value.is_container() => merge(target, Node::from(value)),
        Node::Array(items) => merge_positions(target, items),
        Node::Object(entries) => merge_entries(target, entries),
        Node::Leaf(scalar) => match target {
            Node::Array(slots) => append(slots, Node::Leaf(scalar)),
            Node::Object(_) => {
                log::trace!("ignoring scalar {} merged into an object", scalar);
            }
            Node::Leaf(_) => *target = Node::Leaf(scalar),
        },
    }
}

fn merge_positions(target: &mut Node, items: BTreeMap<usize, Node>) {
    match target {
        Node::Array(slots) => {
            for (index, item) in items {
                if item.is_null() {
                    continue;
                }
                match slots.get_mut(&index) {
                    Some(slot) => merge_slot(slot, item),
                    None => {
                        slots.insert(index, item);
                    }
                }
            }
        }
        Node::Object(map) => {
            for (index, item) in items {
                if item.is_null() {
                    continue;
                }
                let key = index.to_string();
                match map.get_mut(&key) {
                    Some(slot) => merge_slot(slot, item),
                    None => {
                        map.insert(key, item);
                    }
                }
            }
        }
        Node::Leaf(Value::Null) => *target = Node::Array(items),
        Node::Leaf(scalar) => {
            log::trace!("keeping scalar {} over an indexed value", scalar);
        }
    }
}

/// Merges into a container slot, overwrites anything else.
fn merge_slot(slot: &mut Node, item: Node) {
    if slot.is_container() {
        merge(slot, item);
    } else {
        *slot = item;
    }
}

/// Places `item` after the last occupied position.
fn append(slots: &mut BTreeMap<usize, Node>, item: Node) {
    let next = match slots.last_key_value() {
        Some((last, _)) => last.checked_add(1),
        None => Some(0),
    };
    match next {
        Some(index) => {
            slots.insert(index, item);
        }
        None => log::debug!("no position left after index {}, value dropped", usize::MAX),
    }
}

fn merge_entries(target: &mut Node, entries: IndexMap<String, Node>) {
    match target {
        Node::Array(slots) => {
            let mut map = array_to_object(mem::take(slots));
            assign_entries(&mut map, entries);
            *target = Node::Object(map);
        }
        Node::Object(map) => assign_entries(map, entries),
        Node::Leaf(Value::Null) => *target = Node::Object(entries),
        Node::Leaf(scalar) => {
            log::trace!("keeping scalar {} over a keyed value", scalar);
        }
    }
}

fn assign_entries(map: &mut IndexMap<String, Node>, entries: IndexMap<String, Node>) {
    for (key, value) in entries {
        if value.is_container() {
            match map.get_mut(&key) {
                Some(slot) if !slot.is_null() => merge(slot, value),
                _ => {
                    map.insert(key, value);
                }
            }
        } else {
            map.insert(key, value);
        }
    }
}

/// Re-keys an array by index, skipping holes.
fn array_to_object(slots: BTreeMap<usize, Node>) -> IndexMap<String, Node> {
    slots
        .into_iter()
        .filter(|(_, item)| !item.is_null())
        .map(|(index, item)| (index.to_string(), item))
        .collect()
}

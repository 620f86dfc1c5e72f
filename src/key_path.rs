//! The bracket key-path grammar shared by both directions.
//!
//! A flat key such as `user[address][0]` names a position inside a nested
//! structure. Stringify builds those keys one bracket level at a time with
//! [`child_key`]; parse splits them back into segments with
//! [`KeyPath::parse`], honouring the configured depth.
//!
//! Parsed segments keep their brackets (`"user"`, `"[address]"`, `"[0]"`),
//! which is how the builder tells a bracketed index apart from a bare key.

use regex::Regex;
use std::sync::OnceLock;

/// Key names that would shadow built-in object members in a browser or
/// Node.js consumer of the same query string. Keys using them are dropped.
pub const RESERVED_KEYS: &[&str] = &[
    "__proto__",
    "__defineGetter__",
    "__defineSetter__",
    "__lookupGetter__",
    "__lookupSetter__",
    "constructor",
    "hasOwnProperty",
    "isPrototypeOf",
    "propertyIsEnumerable",
    "toLocaleString",
    "toString",
    "valueOf",
];

fn parent_pattern() -> &'static Regex {
    static PARENT: OnceLock<Regex> = OnceLock::new();
    PARENT.get_or_init(|| Regex::new(r"^[^\[\]]*").expect("parent pattern is valid"))
}

fn child_pattern() -> &'static Regex {
    static CHILD: OnceLock<Regex> = OnceLock::new();
    CHILD.get_or_init(|| Regex::new(r"\[[^\[\]]*\]").expect("child pattern is valid"))
}

/// Returns `true` if `name` is one of the [`RESERVED_KEYS`].
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

/// Appends one bracketed level to a key: `prefix[key]`.
///
/// # Examples
///
/// ```rust
/// use nested_qs::key_path::child_key;
///
/// assert_eq!(child_key("a", "b"), "a[b]");
/// assert_eq!(child_key(&child_key("a", "b"), "0"), "a[b][0]");
/// ```
#[must_use]
pub fn child_key(prefix: &str, key: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + key.len() + 2);
    out.push_str(prefix);
    out.push('[');
    out.push_str(key);
    out.push(']');
    out
}

/// Removes one layer of surrounding brackets, if present.
pub(crate) fn strip_brackets(segment: &str) -> &str {
    segment
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(segment)
}

/// An ordered list of key segments parsed from bracket notation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Splits a decoded key into its segments.
    ///
    /// The parent (text before the first bracket) comes first when it is
    /// non-empty, followed by up to `depth` bracketed children. If more
    /// bracket groups follow, the rest of the key from the next group on
    /// becomes a single extra segment, wrapped in one more bracket pair so
    /// the builder reads it as a literal key.
    ///
    /// Returns `None` when no segment can be read (an empty key, or one
    /// like `[`) or when any consumed segment is a [reserved](RESERVED_KEYS)
    /// name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nested_qs::key_path::KeyPath;
    ///
    /// let path = KeyPath::parse("a[b][c][d]", 2).unwrap();
    /// assert_eq!(path.segments(), ["a", "[b]", "[c]", "[[d]]"]);
    ///
    /// assert!(KeyPath::parse("", 5).is_none());
    /// assert!(KeyPath::parse("a[__proto__]", 5).is_none());
    /// ```
    #[must_use]
    pub fn parse(key: &str, depth: usize) -> Option<KeyPath> {
        if key.is_empty() {
            return None;
        }

        let mut segments = Vec::new();

        let parent = parent_pattern().find(key).map_or("", |m| m.as_str());
        if is_reserved(parent) {
            log::debug!("dropping key {:?}: reserved name {:?}", key, parent);
            return None;
        }
        if !parent.is_empty() {
            segments.push(parent.to_string());
        }

        let mut consumed = 0;
        for child in child_pattern().find_iter(key) {
            if consumed == depth {
                log::debug!(
                    "key {:?} exceeds depth {}, keeping {:?} as one segment",
                    key,
                    depth,
                    &key[child.start()..]
                );
                segments.push(format!("[{}]", &key[child.start()..]));
                break;
            }

            let name = strip_brackets(child.as_str());
            if is_reserved(name) {
                log::debug!("dropping key {:?}: reserved name {:?}", key, name);
                return None;
            }
            segments.push(child.as_str().to_string());
            consumed += 1;
        }

        if segments.is_empty() {
            return None;
        }
        Some(KeyPath { segments })
    }

    /// The parsed segments, child segments still bracketed.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Consumes the path, returning its segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<String> {
        self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(key: &str, depth: usize) -> Vec<String> {
        KeyPath::parse(key, depth).unwrap().into_segments()
    }

    #[test]
    fn test_plain_key() {
        assert_eq!(segments("a", 5), vec!["a"]);
        assert_eq!(segments("a.b", 5), vec!["a.b"]);
    }

    #[test]
    fn test_bracketed_children() {
        assert_eq!(segments("a[b][0]", 5), vec!["a", "[b]", "[0]"]);
        assert_eq!(segments("a[]", 5), vec!["a", "[]"]);
        assert_eq!(segments("[a]", 5), vec!["[a]"]);
    }

    #[test]
    fn test_depth_folds_remainder() {
        assert_eq!(
            segments("a[b][c][d][e][f]", 2),
            vec!["a", "[b]", "[c]", "[[d][e][f]]"]
        );
        assert_eq!(segments("a[b]", 0), vec!["a", "[[b]]"]);
        assert_eq!(segments("a[b][c]", 2), vec!["a", "[b]", "[c]"]);
    }

    #[test]
    fn test_text_between_groups_is_skipped() {
        assert_eq!(segments("a[b]c[d]", 5), vec!["a", "[b]", "[d]"]);
        assert_eq!(segments("a[b]tail", 5), vec!["a", "[b]"]);
    }

    #[test]
    fn test_unbalanced_brackets() {
        assert_eq!(segments("a[b", 5), vec!["a"]);
        assert!(KeyPath::parse("[", 5).is_none());
        assert!(KeyPath::parse("[]x", 5).is_some());
    }

    #[test]
    fn test_reserved_names_drop_the_key() {
        assert!(KeyPath::parse("__proto__", 5).is_none());
        assert!(KeyPath::parse("constructor[prototype]", 5).is_none());
        assert!(KeyPath::parse("a[hasOwnProperty]", 5).is_none());
        // beyond depth the name is only part of a literal key
        assert!(KeyPath::parse("a[b][toString]", 1).is_some());
    }

    #[test]
    fn test_child_key() {
        assert_eq!(child_key("", "a"), "[a]");
        assert_eq!(child_key("list", "12"), "list[12]");
    }

    #[test]
    fn test_strip_brackets() {
        assert_eq!(strip_brackets("[a]"), "a");
        assert_eq!(strip_brackets("[[a]]"), "[a]");
        assert_eq!(strip_brackets("a"), "a");
        assert_eq!(strip_brackets("[a"), "[a");
    }
}

//! Configuration options for parsing and stringifying query strings.
//!
//! - [`QsOptions`]: main configuration struct
//! - [`Delimiter`]: the pair separator, either a literal string or a regex
//!
//! All limits are soft: exceeding them changes how a key is interpreted
//! (deep brackets fold into a literal key, large indices become object keys,
//! surplus pairs are ignored) and never produces an error.
//!
//! ## Examples
//!
//! ```rust
//! use nested_qs::{parse_with_options, QsOptions, Delimiter};
//!
//! let options = QsOptions::new()
//!     .with_delimiter(Delimiter::literal(";"))
//!     .with_depth(1);
//!
//! let value = parse_with_options("a[b][c]=1;d=2", &options);
//! assert!(value.get("a").is_some());
//! assert!(value.get("d").is_some());
//! ```

use regex::Regex;
use std::fmt;

/// Separator between `key=value` pairs.
///
/// # Examples
///
/// ```rust
/// use nested_qs::Delimiter;
///
/// assert_eq!(Delimiter::default().as_str(), "&");
/// assert_eq!(Delimiter::literal(";").as_str(), ";");
///
/// let pattern = Delimiter::pattern(r"[;,]").unwrap();
/// assert_eq!(pattern.as_str(), "&");
/// ```
#[derive(Clone, Debug)]
pub enum Delimiter {
    /// Split and join on an exact string.
    Literal(String),
    /// Split on every match of a regular expression.
    ///
    /// Patterns cannot be used to join, so stringifying falls back to `&`.
    Pattern(Regex),
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Literal(String::from("&"))
    }
}

impl Delimiter {
    /// Creates a literal delimiter.
    #[must_use]
    pub fn literal(delimiter: impl Into<String>) -> Self {
        Delimiter::Literal(delimiter.into())
    }

    /// Compiles a regex delimiter.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for an invalid pattern.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Delimiter::Pattern)
    }

    /// Returns the string used to join pairs when stringifying.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Delimiter::Literal(s) => s,
            Delimiter::Pattern(_) => "&",
        }
    }

    /// Splits `input` into at most `limit` parts (`None` for no limit).
    ///
    /// An empty literal splits between every character.
    pub(crate) fn split<'a>(&self, input: &'a str, limit: Option<usize>) -> Vec<&'a str> {
        let limit = limit.unwrap_or(usize::MAX);
        match self {
            Delimiter::Literal(sep) if sep.is_empty() => input
                .char_indices()
                .map(|(i, ch)| &input[i..i + ch.len_utf8()])
                .take(limit)
                .collect(),
            Delimiter::Literal(sep) => input.split(sep.as_str()).take(limit).collect(),
            Delimiter::Pattern(re) => re.split(input).take(limit).collect(),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Literal(s) => write!(f, "{:?}", s),
            Delimiter::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

/// Configuration for [`parse_with_options`](crate::parse_with_options) and
/// [`stringify_with_options`](crate::stringify_with_options).
///
/// Only `delimiter` applies when stringifying; stringify never truncates.
///
/// # Examples
///
/// ```rust
/// use nested_qs::QsOptions;
///
/// let options = QsOptions::new();
/// assert_eq!(options.depth, 5);
/// assert_eq!(options.array_limit, 20);
/// assert_eq!(options.parameter_limit, Some(1000));
///
/// let options = QsOptions::new()
///     .with_array_limit(100)
///     .unlimited_parameters();
/// assert_eq!(options.parameter_limit, None);
/// ```
#[derive(Clone, Debug)]
pub struct QsOptions {
    pub delimiter: Delimiter,
    /// Maximum number of child bracket segments expanded into nesting.
    pub depth: usize,
    /// Highest bracketed index still treated as an array position.
    pub array_limit: usize,
    /// Maximum number of pairs read from a string; `None` disables the limit.
    pub parameter_limit: Option<usize>,
}

impl Default for QsOptions {
    fn default() -> Self {
        QsOptions {
            delimiter: Delimiter::default(),
            depth: 5,
            array_limit: 20,
            parameter_limit: Some(1000),
        }
    }
}

impl QsOptions {
    /// Creates default options (`&` delimiter, depth 5, array limit 20, 1000 parameters).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pair delimiter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nested_qs::{QsOptions, Delimiter};
    ///
    /// let options = QsOptions::new().with_delimiter(Delimiter::literal(";"));
    /// assert_eq!(options.delimiter.as_str(), ";");
    /// ```
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets how many child bracket segments are expanded before the rest of
    /// the key is kept as one literal segment.
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the highest index that still produces an array.
    ///
    /// Sparse arrays are allocated up to this index, so keep it modest.
    #[must_use]
    pub fn with_array_limit(mut self, array_limit: usize) -> Self {
        self.array_limit = array_limit;
        self
    }

    /// Sets the maximum number of pairs parsed from a string.
    #[must_use]
    pub fn with_parameter_limit(mut self, parameter_limit: usize) -> Self {
        self.parameter_limit = Some(parameter_limit);
        self
    }

    /// Removes the parameter limit.
    #[must_use]
    pub fn unlimited_parameters(mut self) -> Self {
        self.parameter_limit = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_split_respects_limit() {
        let delimiter = Delimiter::default();
        assert_eq!(delimiter.split("a=1&b=2&c=3", Some(2)), vec!["a=1", "b=2"]);
        assert_eq!(
            delimiter.split("a=1&b=2&c=3", None),
            vec!["a=1", "b=2", "c=3"]
        );
        assert!(delimiter.split("a=1", Some(0)).is_empty());
    }

    #[test]
    fn test_pattern_split() {
        let delimiter = Delimiter::pattern(r"[;,]\s*").unwrap();
        assert_eq!(delimiter.split("a=1; b=2,c=3", None), vec!["a=1", "b=2", "c=3"]);
        assert_eq!(delimiter.as_str(), "&");
    }

    #[test]
    fn test_empty_literal_splits_characters() {
        let delimiter = Delimiter::literal("");
        assert_eq!(delimiter.split("ab", None), vec!["a", "b"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Delimiter::literal(";").to_string(), "\";\"");
        assert_eq!(Delimiter::pattern("[;&]").unwrap().to_string(), "/[;&]/");
    }
}

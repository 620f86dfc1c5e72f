//! Error types for the serde bridge and I/O helpers.
//!
//! The query string core itself never fails: [`parse`](crate::parse) and
//! [`stringify`](crate::stringify) degrade gracefully on malformed input
//! (raw tokens are kept, limits truncate, reserved keys are dropped).
//! Errors only surface when converting between typed Rust values and the
//! dynamic [`Value`](crate::Value) model, or when reading and writing.
//!
//! ## Error Categories
//!
//! - **Type Mismatches**: a parsed value cannot become the requested Rust type
//! - **Unsupported Types**: a Rust value has no query string representation
//! - **Invalid Top Level**: query strings need a keyed (or indexed) top level
//! - **I/O Errors**: reader/writer failures
//!
//! ## Examples
//!
//! ```rust
//! use nested_qs::{from_str, Error};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug)]
//! struct Page { number: u32 }
//!
//! let result: Result<Page, Error> = from_str("number=first");
//! assert!(result.is_err());
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the typed conversion layer.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Type mismatch during deserialization
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// The top-level value has no keys to emit pairs for
    #[error("Invalid top-level value: query strings require a map, struct or sequence, found {0}")]
    InvalidTopLevel(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a type mismatch error when deserialization fails due to incompatible types.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nested_qs::Error;
    ///
    /// let err = Error::type_mismatch("integer", "string \"abc\"");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error for values with no query string form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an error for a top-level value that cannot be flattened into pairs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nested_qs::Error;
    ///
    /// let err = Error::invalid_top_level("number");
    /// assert!(err.to_string().contains("found number"));
    /// ```
    pub fn invalid_top_level(found: &str) -> Self {
        Error::InvalidTopLevel(found.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nested_qs::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Encoding and decoding of individual keys and scalar values.
//!
//! Stringify coerces every scalar to text and percent-encodes it as a URL
//! component. Parse reverses that with the form convention (`+` is a space)
//! and then opportunistically turns numeric-looking text into a
//! [`Number`]. Decoding never fails: a token with a malformed escape is
//! returned exactly as it appeared in the input.

use crate::{Number, Value};
use chrono::SecondsFormat;
use std::borrow::Cow;

/// Coerces a scalar to the text written into a query string.
///
/// Containers have no scalar text; they render as an empty string here and
/// are expanded by the walker instead.
pub fn primitive_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Bytes(bytes) => String::from_utf8_lossy(bytes),
        Value::Date(dt) => Cow::Owned(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Value::Array(_) | Value::Object(_) => Cow::Borrowed(""),
    }
}

/// Escapes that browsers leave as literal characters in a URL component.
const UNESCAPED_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encodes text as a URL component.
///
/// Everything except ASCII alphanumerics and `-_.!~*'()` is escaped, the
/// same set a browser's `encodeURIComponent` keeps.
///
/// # Examples
///
/// ```rust
/// use nested_qs::codec::encode_component;
///
/// assert_eq!(encode_component("a b&c"), "a%20b%26c");
/// assert_eq!(encode_component("key[0]"), "key%5B0%5D");
/// assert_eq!(encode_component("safe-_.~!*'()"), "safe-_.~!*'()");
/// ```
pub fn encode_component(text: &str) -> Cow<'_, str> {
    let encoded = urlencoding::encode(text);
    if !encoded.contains("%2") {
        return encoded;
    }
    // every '%' in the output starts an escape, so whole escapes match
    let kept = UNESCAPED_MARKS
        .iter()
        .fold(encoded.into_owned(), |text, (escape, mark)| text.replace(escape, mark));
    Cow::Owned(kept)
}

/// Coerces a scalar to text and percent-encodes it.
pub fn encode_primitive(value: &Value) -> String {
    encode_component(&primitive_text(value)).into_owned()
}

/// Decodes a raw token: `+` becomes a space, then percent escapes are resolved.
///
/// Returns `None` when the token holds a malformed escape or the escapes do
/// not form valid UTF-8.
fn decode_component(token: &str) -> Option<String> {
    let spaced = token.replace('+', " ");
    if !has_well_formed_escapes(&spaced) {
        return None;
    }
    urlencoding::decode(&spaced).ok().map(Cow::into_owned)
}

fn has_well_formed_escapes(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b'%' {
            let well_formed = bytes
                .get(pos + 1..pos + 3)
                .map_or(false, |hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !well_formed {
                return false;
            }
            pos += 3;
        } else {
            pos += 1;
        }
    }
    true
}

/// Decodes a value token, coercing numeric literals to [`Number`]s.
///
/// # Examples
///
/// ```rust
/// use nested_qs::codec::decode_primitive;
/// use nested_qs::{Number, Value};
///
/// assert_eq!(decode_primitive("hello+world"), Value::from("hello world"));
/// assert_eq!(decode_primitive("%C3%A9t%C3%A9"), Value::from("été"));
/// assert_eq!(decode_primitive("42"), Value::Number(Number::Integer(42)));
/// // malformed escapes keep the raw token
/// assert_eq!(decode_primitive("100%+off"), Value::from("100%+off"));
/// ```
pub fn decode_primitive(token: &str) -> Value {
    match decode_component(token) {
        Some(decoded) => match Number::parse_literal(&decoded) {
            Some(number) => Value::Number(number),
            None => Value::String(decoded),
        },
        None => {
            log::trace!("keeping undecodable token {:?} as-is", token);
            Value::String(token.to_string())
        }
    }
}

/// Decodes a key token.
///
/// Keys go through the same numeric coercion as values, and a numeric key
/// is then written back as that number's canonical text.
///
/// # Examples
///
/// ```rust
/// use nested_qs::codec::decode_key;
///
/// assert_eq!(decode_key("user%5Bname%5D"), "user[name]");
/// assert_eq!(decode_key("007"), "7");
/// assert_eq!(decode_key("1e3"), "1000");
/// ```
pub fn decode_key(token: &str) -> String {
    match decode_primitive(token) {
        Value::Number(number) => number.to_string(),
        Value::String(s) => s,
        other => primitive_text(&other).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use test_log::test;

    #[test]
    fn test_primitive_text() {
        assert_eq!(primitive_text(&Value::Null), "");
        assert_eq!(primitive_text(&Value::Bool(true)), "true");
        assert_eq!(primitive_text(&Value::from(1.5)), "1.5");
        assert_eq!(primitive_text(&Value::Bytes(b"bin".to_vec())), "bin");

        let date = DateTime::parse_from_rfc3339("2013-05-06T07:08:09.123Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            primitive_text(&Value::Date(date)),
            "2013-05-06T07:08:09.123Z"
        );
    }

    #[test]
    fn test_encode_primitive() {
        assert_eq!(encode_primitive(&Value::from("a&b=c")), "a%26b%3Dc");
        assert_eq!(encode_primitive(&Value::from("ü")), "%C3%BC");
        assert_eq!(encode_primitive(&Value::Null), "");
        assert_eq!(encode_primitive(&Value::from(-3)), "-3");
    }

    #[test]
    fn test_encode_keeps_browser_marks() {
        assert_eq!(encode_component("(a)!*'"), "(a)!*'");
        assert_eq!(encode_component("50%!"), "50%25!");
        assert_eq!(encode_component("%21"), "%2521");
        assert_eq!(decode_primitive(&encode_component("it's (50%)!")), Value::from("it's (50%)!"));
    }

    #[test]
    fn test_decode_plus_before_percent() {
        // an encoded plus survives as a literal plus
        assert_eq!(decode_primitive("1%2B1"), Value::from("1+1"));
        assert_eq!(decode_primitive("a+b"), Value::from("a b"));
    }

    #[test]
    fn test_decode_fails_open() {
        assert_eq!(decode_primitive("%"), Value::from("%"));
        assert_eq!(decode_primitive("%zz"), Value::from("%zz"));
        assert_eq!(decode_primitive("a+%4"), Value::from("a+%4"));
        // lone continuation byte is not UTF-8
        assert_eq!(decode_primitive("%80"), Value::from("%80"));
    }

    #[test]
    fn test_decode_numeric_coercion() {
        assert_eq!(decode_primitive("0"), Value::Number(Number::Integer(0)));
        assert_eq!(decode_primitive("-1.25"), Value::Number(Number::Float(-1.25)));
        assert_eq!(decode_primitive("+5"), Value::Number(Number::Integer(5)));
        assert_eq!(decode_primitive("1e2"), Value::Number(Number::Integer(100)));
        assert_eq!(decode_primitive(""), Value::from(""));
        assert_eq!(decode_primitive("12abc"), Value::from("12abc"));
    }

    #[test]
    fn test_decode_key() {
        assert_eq!(decode_key("a"), "a");
        assert_eq!(decode_key("a%5B%5D"), "a[]");
        assert_eq!(decode_key("01"), "1");
        assert_eq!(decode_key("1.50"), "1.5");
        assert_eq!(decode_key("%zz"), "%zz");
    }
}

/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Object keys must be string literals. Any other expression goes through
/// [`to_value`](crate::to_value) and becomes `Null` if it cannot be
/// serialized.
///
/// ```rust
/// use nested_qs::{qs, stringify};
///
/// let value = qs!({"a": {"b": [1, "two"]}, "c": null});
/// assert_eq!(stringify(&value), "a%5Bb%5D%5B0%5D=1&a%5Bb%5D%5B1%5D=two&c=");
/// ```
#[macro_export]
macro_rules! qs {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::qs!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::QsMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::QsMap::new();
        $(
            object.insert($key.to_string(), $crate::qs!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Number, QsMap, Value};

    #[test]
    fn test_qs_macro_primitives() {
        assert_eq!(qs!(null), Value::Null);
        assert_eq!(qs!(true), Value::Bool(true));
        assert_eq!(qs!(42), Value::Number(Number::Integer(42)));
        assert_eq!(qs!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(qs!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_qs_macro_nesting() {
        let value = qs!({"a": [1, {"b": null}], "c": {}});

        let mut inner = QsMap::new();
        inner.insert("b".to_string(), Value::Null);
        let mut expected = QsMap::new();
        expected.insert(
            "a".to_string(),
            Value::Array(vec![Value::from(1), Value::Object(inner)]),
        );
        expected.insert("c".to_string(), Value::Object(QsMap::new()));
        assert_eq!(value, Value::Object(expected));
    }

    #[test]
    fn test_qs_macro_expressions() {
        let page = 3u32;
        assert_eq!(qs!(page), Value::from(3));
        assert_eq!(qs!((-2)), Value::from(-2));
        assert_eq!(qs!({"tags": (vec!["x", "y"])}), qs!({"tags": ["x", "y"]}));
    }
}

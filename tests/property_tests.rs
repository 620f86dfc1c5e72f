//! Property-based tests for the round-trip guarantees.
//!
//! Generated strings always start with a letter so they never read as
//! numeric literals, and generated keys are plain lowercase words, which
//! keeps them clear of bracket syntax and reserved names.

use nested_qs::{from_str, parse, stringify, to_string, QsMap, Value};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Wrapper<T> {
    v: T,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Profile {
    id: u32,
    name: String,
    score: i64,
    verified: bool,
    tags: Vec<String>,
    nickname: Option<String>,
}

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 &=%+#?/\\[\\]éü-]{0,12}"
        .prop_filter("reads as a number", |s| s.trim() != "Infinity")
}

fn key() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        word().prop_map(Value::from),
        (-1_000_000i64..1_000_000).prop_map(Value::from),
        any::<bool>().prop_map(|b| Value::from(if b { "true" } else { "false" })),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..6).prop_map(Value::Array),
            prop::collection::btree_map(key(), inner, 1..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<QsMap>())),
        ]
    })
}

fn document() -> impl Strategy<Value = Value> {
    prop::collection::btree_map(key(), tree(), 1..5)
        .prop_map(|entries| Value::Object(entries.into_iter().collect::<QsMap>()))
}

proptest! {
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&Wrapper { v: n }), "roundtrip failed");
    }

    #[test]
    fn prop_u32(n in any::<u32>()) {
        prop_assert!(roundtrip(&Wrapper { v: n }), "roundtrip failed");
    }

    #[test]
    fn prop_safe_i64(n in -(1i64 << 53)..(1i64 << 53)) {
        prop_assert!(roundtrip(&Wrapper { v: n }), "roundtrip failed");
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&Wrapper { v: b }), "roundtrip failed");
    }

    #[test]
    fn prop_finite_f64(f in -1.0e12f64..1.0e12) {
        prop_assert!(roundtrip(&Wrapper { v: f }), "roundtrip failed");
    }

    #[test]
    fn prop_string(s in word()) {
        prop_assert!(roundtrip(&Wrapper { v: s }), "roundtrip failed");
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 1..40)) {
        prop_assert!(roundtrip(&Wrapper { v }), "roundtrip failed");
    }

    #[test]
    fn prop_profile(
        id in any::<u32>(),
        name in word(),
        score in -(1i64 << 53)..(1i64 << 53),
        verified in any::<bool>(),
        tags in prop::collection::vec(word(), 1..8),
        nickname in proptest::option::of(word()),
    ) {
        let profile = Profile { id, name, score, verified, tags, nickname };
        prop_assert!(roundtrip(&profile));
    }

    #[test]
    fn prop_value_round_trip(doc in document()) {
        let text = stringify(&doc);
        prop_assert_eq!(parse(&text), doc);
    }

    #[test]
    fn prop_parse_never_panics(input in "[a-z0-9=&%\\[\\]+.]{0,64}") {
        let value = parse(&input);
        prop_assert!(value.is_object());
    }

    #[test]
    fn prop_parse_is_stable(doc in document()) {
        let once = parse(&stringify(&doc));
        let twice = parse(&stringify(&once));
        prop_assert_eq!(once, twice);
    }
}

//! Round-trip property: `parse(emit(v)) == v` for the block subset. Strings
//! are always emitted double-quoted, so arbitrary text (including text that
//! looks numeric) survives; NaN is excluded.

use databind_core::Value;
use databind_yaml::{YamlDecoder, YamlEncoder};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<u64>().prop_map(Value::UInt),
        any::<f64>()
            .prop_filter("finite floats only", |f| f.is_finite())
            .prop_map(Value::Float),
        ".*".prop_map(Value::Str),
    ]
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z]{1,8}", ".{0,10}"]
}

fn dedup_keys(pairs: Vec<(String, Value)>) -> Vec<(String, Value)> {
    let mut entries: Vec<(String, Value)> = Vec::with_capacity(pairs.len());
    for (k, v) in pairs {
        if !entries.iter().any(|(existing, _)| *existing == k) {
            entries.push((k, v));
        }
    }
    entries
}

fn tree() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Seq),
            prop::collection::vec((key(), inner), 0..5)
                .prop_map(|pairs| Value::Map(dedup_keys(pairs))),
        ]
    })
}

proptest! {
    #[test]
    fn emit_then_parse_is_identity(value in tree()) {
        let text = YamlEncoder::new().encode(&value);
        let parsed = YamlDecoder::new().decode(&text).unwrap();
        prop_assert_eq!(parsed.tag, None);
        prop_assert_eq!(parsed.root, value);
    }

    #[test]
    fn tagged_emit_preserves_tag_and_body(value in tree()) {
        let text = YamlEncoder::new().encode_tagged("variant", &value);
        let parsed = YamlDecoder::new().decode(&text).unwrap();
        prop_assert_eq!(parsed.tag.as_deref(), Some("variant"));
        prop_assert_eq!(parsed.root, value);
    }
}

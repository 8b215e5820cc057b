use databind_core::{ParseReason, Value};
use databind_yaml::{YamlDecoder, YamlEncoder};

fn obj(fields: &[(&str, Value)]) -> Value {
    Value::Map(
        fields
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect(),
    )
}

fn parse(text: &str) -> Value {
    YamlDecoder::new().decode(text).unwrap().root
}

#[test]
fn emit_block_mapping() {
    let product = obj(&[
        ("title", Value::from("product title")),
        ("description", Value::from("product description")),
        ("price", Value::Int(10)),
    ]);
    assert_eq!(
        YamlEncoder::new().encode(&product),
        "---\n\
         title: \"product title\"\n\
         description: \"product description\"\n\
         price: 10\n"
    );
}

#[test]
fn emit_nested_mapping_indents_by_two() {
    let person = obj(&[
        ("firstName", Value::from("Pera")),
        ("address", obj(&[("line1", Value::from("Apt. 123"))])),
    ]);
    assert_eq!(
        YamlEncoder::new().encode(&person),
        "---\nfirstName: \"Pera\"\naddress:\n  line1: \"Apt. 123\"\n"
    );
}

#[test]
fn emit_tagged_document_carries_tag_in_header() {
    let body = obj(&[
        ("name", Value::from("name")),
        ("childOneProperty", Value::from("childOneProperty")),
    ]);
    assert_eq!(
        YamlEncoder::new().encode_tagged("childOne", &body),
        "--- !<childOne>\nname: \"name\"\nchildOneProperty: \"childOneProperty\"\n"
    );
}

#[test]
fn emit_sequences_and_empties() {
    let value = obj(&[
        ("tags", Value::Seq(vec![Value::from("a"), Value::Int(2)])),
        ("none", Value::Null),
        ("empty", Value::Map(vec![])),
        ("items", Value::Seq(vec![])),
    ]);
    assert_eq!(
        YamlEncoder::new().encode(&value),
        "---\ntags:\n  - \"a\"\n  - 2\nnone: null\nempty: {}\nitems: []\n"
    );
}

#[test]
fn emit_sequence_of_mappings_inlines_first_entry() {
    let value = Value::Seq(vec![
        obj(&[("type", Value::from("childOne")), ("name", Value::from("n"))]),
        obj(&[("type", Value::from("childTwo"))]),
    ]);
    assert_eq!(
        YamlEncoder::new().encode(&value),
        "---\n- type: \"childOne\"\n  name: \"n\"\n- type: \"childTwo\"\n"
    );
}

#[test]
fn emit_quotes_non_plain_keys() {
    let value = obj(&[("a key", Value::Int(1))]);
    assert_eq!(YamlEncoder::new().encode(&value), "---\n\"a key\": 1\n");
}

#[test]
fn parse_block_mapping_with_quoted_scalars() {
    let doc = "---\n\
               title: \"product title\"\n\
               description: \"product description\"\n\
               price: 10\n";
    assert_eq!(
        parse(doc),
        obj(&[
            ("title", Value::from("product title")),
            ("description", Value::from("product description")),
            ("price", Value::Int(10)),
        ])
    );
}

#[test]
fn parse_plain_scalars_are_typed() {
    let doc = "---\n\
               firstName: Pera\n\
               age: 20\n\
               ratio: 1.5\n\
               flag: true\n\
               nothing: null\n\
               street: 321 Main Street\n";
    let tree = parse(doc);
    assert_eq!(tree.get("firstName"), Some(&Value::Str("Pera".into())));
    assert_eq!(tree.get("age"), Some(&Value::Int(20)));
    assert_eq!(tree.get("ratio"), Some(&Value::Float(1.5)));
    assert_eq!(tree.get("flag"), Some(&Value::Bool(true)));
    assert_eq!(tree.get("nothing"), Some(&Value::Null));
    // digit-leading text stays a string
    assert_eq!(tree.get("street"), Some(&Value::Str("321 Main Street".into())));
}

#[test]
fn parse_nested_mapping() {
    let doc = "---\n\
               firstName: Pera\n\
               lastName: Peric\n\
               age: 20\n\
               address:\n\
               \x20 line1: Apt. 123\n\
               \x20 line2: 321 Main Street\n\
               \x20 city: New York\n";
    let tree = parse(doc);
    let address = tree.get("address").unwrap();
    assert_eq!(address.get("line1").and_then(Value::as_str), Some("Apt. 123"));
    assert_eq!(address.get("city").and_then(Value::as_str), Some("New York"));
}

#[test]
fn parse_sequence_of_mappings() {
    let doc = "---\n\
               - type: childOne\n\
               \x20 name: name\n\
               - type: childTwo\n\
               \x20 name: other\n";
    let tree = parse(doc);
    let items = tree.items().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].get("type").and_then(Value::as_str), Some("childOne"));
    assert_eq!(items[1].get("name").and_then(Value::as_str), Some("other"));
}

#[test]
fn parse_header_tag() {
    let doc = "--- !<childOne>\nname: \"n\"\n";
    let parsed = YamlDecoder::new().decode(doc).unwrap();
    assert_eq!(parsed.tag.as_deref(), Some("childOne"));
    assert_eq!(parsed.root.get("name").and_then(Value::as_str), Some("n"));

    // untagged documents have no tag
    assert_eq!(YamlDecoder::new().decode("---\na: 1\n").unwrap().tag, None);
}

#[test]
fn parse_skips_comments_and_blank_lines() {
    let doc = "---\n# header comment\n\na: 1\n\n# tail\nb: 2\n";
    assert_eq!(parse(doc), obj(&[("a", Value::Int(1)), ("b", Value::Int(2))]));
}

#[test]
fn parse_document_without_start_line() {
    assert_eq!(parse("a: 1\n"), obj(&[("a", Value::Int(1))]));
}

#[test]
fn parse_scalar_document() {
    assert_eq!(parse("---\n10\n"), Value::Int(10));
    assert_eq!(parse("---\n\"x\"\n"), Value::Str("x".into()));
}

#[test]
fn bad_indentation_is_rejected() {
    // the deeper line has no owning entry
    let doc = "---\na: 1\n    b: 2\n";
    let err = YamlDecoder::new().decode(doc).unwrap_err();
    assert_eq!(err.reason, ParseReason::BadIndent);

    // tabs are not indentation
    let doc = "---\n\ta: 1\n";
    let err = YamlDecoder::new().decode(doc).unwrap_err();
    assert_eq!(err.reason, ParseReason::BadIndent);
}

#[test]
fn malformed_lines_are_rejected() {
    let err = YamlDecoder::new().decode("---\njust a scalar\nb: 2\n").unwrap_err();
    assert_eq!(err.reason, ParseReason::UnexpectedCharacter);

    // dash entry inside a mapping block
    let err = YamlDecoder::new().decode("---\na: 1\n- 2\n").unwrap_err();
    assert_eq!(err.reason, ParseReason::UnexpectedCharacter);
}

#[test]
fn duplicate_keys_last_occurrence_wins() {
    let tree = parse("---\na: 1\nb: 2\na: 3\n");
    let entries = tree.entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], ("a".to_string(), Value::Int(3)));
}

//! Round-trip tests: records are encoded, then decoded back.

use std::io;

use proptest::prelude::*;
use serde_json::{Map, Value, json};

use interrupt::{
    Encoder, InterruptError,
    cause::{Cause, ForeignError},
    config::EncoderConfig,
    context::{Context, ErrorValue},
    frame::Frame,
    node::{DiagnosticNode, Node},
    qualified::Qualified,
    record::DiagnosticRecord,
};

fn encoder() -> Encoder {
    Encoder::new(EncoderConfig::new(false, 32))
}

fn round_trip(record: &DiagnosticRecord) -> DiagnosticNode {
    let blob = encoder().encode(record);
    match interrupt::decode(&blob) {
        Ok(Some(Node::Diagnostic(node))) => node,
        other => panic!("Expected diagnostic for:\n{blob}\ngot {other:?}"),
    }
}

fn record(qualifier: &str, label: &str) -> DiagnosticRecord {
    DiagnosticRecord::new(Qualified::new(qualifier, label).expect("Invalid identifier"))
}

fn identifier() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.]{1,16}"
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,12}".prop_map(Value::from),
        "(cause:|stack:|\\{|\n){1,3}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn json_map() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec(("[a-zA-Z_]{1,8}", json_value()), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}

fn plain_text() -> impl Strategy<Value = String> {
    "[a-z][a-z ]{0,10}[a-z]"
}

fn brace_text() -> impl Strategy<Value = String> {
    "(\\{|\\}|\n|[a-z\" :,1]){1,24}"
}

proptest! {
    #[test]
    fn test_identifier_round_trip(qualifier in identifier(), label in identifier()) {
        let node = round_trip(&record(&qualifier, &label));
        prop_assert_eq!(node.qualifier(), qualifier.as_str());
        prop_assert_eq!(node.name(), label.as_str());
    }

    #[test]
    fn test_context_fidelity(context in json_map()) {
        let expected = (!context.is_empty()).then(|| Value::Object(context.clone()));
        let node = round_trip(&record("q", "l").with_context_map(Context::from(context)));
        prop_assert_eq!(node.context(), expected.as_ref());
    }

    #[test]
    fn test_cause_ordering(
        causes in prop::collection::vec((plain_text(), prop::option::of(json_map())), 0..6)
    ) {
        let mut record = record("q", "l");
        for (text, context) in &causes {
            record = match context {
                Some(context) => record.with_cause_context(text.as_str(), Context::from(context.clone())),
                None => record.with_cause(text.as_str()),
            };
        }

        let node = round_trip(&record);
        prop_assert_eq!(node.causes().len(), causes.len());
        prop_assert_eq!(node.contexts().len(), causes.len());
        for (index, (text, context)) in causes.iter().enumerate() {
            prop_assert_eq!(node.causes()[index].as_text(), Some(text.as_str()));
            let expected = context.clone().map(Value::Object);
            prop_assert_eq!(&node.contexts()[index], &expected);
        }
    }

    #[test]
    fn test_decode_is_pure(context in json_map(), text in plain_text()) {
        let record = record("q", "l").with_context_map(Context::from(context)).with_cause(text.as_str());
        let blob = encoder().encode(&record);
        let first = interrupt::decode(&blob).expect("Failed to decode");
        let second = interrupt::decode(&blob).expect("Failed to decode");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_encoded_text_causes_always_decode(text in brace_text()) {
        let blob = encoder().encode(&record("q", "l").with_cause(text.as_str()));
        let node = interrupt::decode(&blob);
        prop_assert!(matches!(node, Ok(Some(Node::Diagnostic(_)))), "{blob}\n{node:?}");
    }
}

#[test]
fn test_end_to_end_example() {
    let foo = io::Error::new(io::ErrorKind::NotFound, "foo");
    let record = record("bigeasy.example", "bar")
        .with_context("statusCode", 404)
        .with_cause_context(Cause::error(&foo), Context::new().with("url", "http://x"));

    let node = round_trip(&record);
    assert_eq!(node.context().expect("Missing context")["statusCode"], 404);
    assert_eq!(node.causes().len(), 1);
    assert_eq!(
        node.contexts()[0].as_ref().expect("Missing sub-context")["url"],
        "http://x"
    );

    let cause = node.causes()[0].as_foreign().expect("Expected foreign cause");
    assert_eq!(cause.type_name(), "Error");
    assert_eq!(cause.message(), "foo");
    assert_eq!(cause.stack().len(), 1);
    assert!(cause.stack()[0].file().expect("Missing file").ends_with("round_trip.rs"));
}

#[test]
fn test_nested_depth_two() {
    let leaf = record("inner.leaf", "deepest").with_cause("root cause");
    let middle = record("inner", "middle")
        .with_context("attempt", 3)
        .with_cause_context(leaf, Context::new().with("step", "connect"));
    let top = record("outer", "top").with_cause(middle);

    let node = round_trip(&top);
    assert_eq!(node.depth(), 3);

    let middle = node.causes()[0].as_diagnostic().expect("Expected nested diagnostic");
    assert_eq!(middle.qualifier(), "inner");
    assert_eq!(middle.context(), Some(&json!({"attempt": 3})));
    assert_eq!(middle.contexts(), &[Some(json!({"step": "connect"}))]);

    let leaf = middle.causes()[0].as_diagnostic().expect("Expected nested diagnostic");
    assert_eq!(leaf.name(), "deepest");
    assert_eq!(leaf.causes(), &[Node::Text("root cause".to_string())]);
}

#[test]
fn test_interrupt_cause_round_trip() {
    let inner = encoder().raise(record("inner", "raised").with_context("k", "v"));
    let node = round_trip(&record("outer", "top").with_cause(inner));

    let inner = node.causes()[0].as_diagnostic().expect("Expected nested diagnostic");
    assert_eq!(inner.name(), "raised");
    assert_eq!(inner.context(), Some(&json!({"k": "v"})));
}

#[test]
fn test_foreign_cause_with_frames() {
    let foreign = ForeignError::new("TypeError", "x is not a function").with_frames(vec![
        Frame::at("src/load.js", 3, 11).with_function("load"),
        Frame::at("src/main.js", 9, 1),
    ]);
    let node = round_trip(&record("q", "l").with_cause(foreign));

    let cause = node.causes()[0].as_foreign().expect("Expected foreign cause");
    assert_eq!(cause.type_name(), "TypeError");
    assert_eq!(cause.message(), "x is not a function");
    assert_eq!(cause.stack()[0].function_name(), Some("load"));
    assert_eq!(cause.stack()[1], Frame::at("src/main.js", 9, 1));
}

#[test]
fn test_foreign_cause_without_frames_is_text() {
    let foreign = ForeignError::new("TypeError", "no frames");
    let node = round_trip(&record("q", "l").with_cause(foreign));
    assert_eq!(node.causes()[0].as_text(), Some("TypeError: no frames"));
}

#[test]
fn test_value_causes_round_trip_as_text() {
    let node = round_trip(
        &record("q", "l")
            .with_cause(Cause::value(json!([1, 2])))
            .with_cause(Cause::value(json!({"a": 1})))
            .with_cause("multi\n\nline"),
    );
    let causes: Vec<_> = node.causes().iter().map(Node::as_text).collect();
    assert_eq!(causes, [Some("[1,2]"), Some("{\"a\":1}"), Some("multi\n\nline")]);
}

#[test]
fn test_unbalanced_brace_cause_is_text() {
    let node = round_trip(&record("q", "l").with_cause("{").with_cause("{\n\"a\":"));
    assert_eq!(node.causes(), &[Node::Text("{".to_string()), Node::Text("{\n\"a\":".to_string())]);
    assert_eq!(node.contexts(), &[None::<Value>, None]);
}

#[test]
fn test_object_line_cause_splits_into_sub_context() {
    let node = round_trip(&record("q", "l").with_cause("{\n\"a\": 1\n}\ntail"));
    assert_eq!(node.causes()[0].as_text(), Some("tail"));
    assert_eq!(node.contexts(), &[Some(json!({"a": 1}))]);
}

#[test]
fn test_frames_round_trip() {
    let frames = vec![
        Frame::at("src/server.rs", 42, 13).with_function("handler"),
        Frame::at("src/main.rs", 7, 1),
        Frame::new(None, None, None, Some("<anonymous>".to_string())),
    ];
    let node = round_trip(&record("q", "l").with_frames(frames.clone()));
    assert_eq!(node.stack(), frames.as_slice());
}

#[test]
fn test_error_context_value() {
    let error = ErrorValue::new(record("inner", "ctx").with_context("k", 1))
        .with_fields(Context::new().with("retry", true));
    let node = round_trip(&record("q", "l").with_error_context("failure", error));

    let failure = &node.context().expect("Missing context")["failure"];
    assert_eq!(failure["retry"], true);

    let stack = failure["stack"].as_str().expect("Expected stack text");
    let inner = interrupt::decode(stack)
        .expect("Failed to decode")
        .expect("Not composite");
    let inner = inner.as_diagnostic().expect("Expected diagnostic");
    assert_eq!(inner.qualifier(), "inner");
    assert_eq!(inner.context(), Some(&json!({"k": 1})));
}

#[test]
fn test_malformed_context_keeps_source() {
    let blob = encoder()
        .encode(&record("q", "l").with_context("k", "v"))
        .replace("\"v\"", "v");

    match interrupt::decode(&blob) {
        Err(InterruptError::Decode { err, src }) => {
            assert_eq!(src, blob);
            assert!(!err.diagnostics().is_empty());
        }
        other => panic!("Expected decode error, got {other:?}"),
    }
}

#[test]
fn test_decode_empty_is_none() {
    assert!(interrupt::decode("").expect("Failed to decode").is_none());
}

#[test]
fn test_nested_raw_leaf() {
    let node = interrupt::decode_nested("unlikely string").expect("Failed to decode");
    assert_eq!(node.as_text(), Some("unlikely string"));
}

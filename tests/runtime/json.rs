//! JSON global tests

use super::{at, call, elements, func, get, num, numbers, text};
use jsrt::intrinsics::{key, proto_key};
use jsrt::{ErrorKind, JsError, JsValue, json_global};

fn stringify(args: &[JsValue]) -> Result<JsValue, JsError> {
    json_global().call_method("stringify", args)
}

fn parse(source: &str) -> Result<JsValue, JsError> {
    json_global().call_method("parse", &[text(source)])
}

#[test]
fn test_parse_object_preserves_order() {
    let Ok(value) = parse(r#"{"b": 1, "a": [true, "x", null], "c": {"d": 2.5}}"#) else {
        panic!("parse failed");
    };
    let keys: Vec<_> = value
        .properties()
        .map(|s| s.borrow().keys().cloned().collect())
        .unwrap_or_default();
    assert_eq!(keys, vec![text("b"), text("a"), text("c")]);

    let list = get(&value, "a");
    assert_eq!(elements(&list), vec![JsValue::Boolean(true), text("x"), JsValue::Undefined]);
    assert_eq!(get(&get(&value, "c"), "d"), num(2.5));
}

#[test]
fn test_parsed_array_has_methods() {
    let Ok(list) = parse("[3, 1, 2]") else {
        panic!("parse failed");
    };
    assert_eq!(at(&list, 0), num(3.0));
    assert_eq!(call(&list, "join", &[text("|")]), text("3|1|2"));
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse("{oops").err().map(|e| e.kind()), Some(ErrorKind::Syntax));
    let err = json_global().call_method("parse", &[num(1.0)]).err().map(|e| e.kind());
    assert_eq!(err, Some(ErrorKind::WrongReceiverType));
}

#[test]
fn test_stringify_object() {
    let obj = JsValue::new_object([
        (key("name"), text("jsrt")),
        (key("tags"), JsValue::new_array([text("a"), JsValue::Undefined])),
        (key("skip"), JsValue::Undefined),
        (key("call"), func(|_| JsValue::Undefined)),
        (num(1.0), text("numeric key")),
        (key("nan"), num(f64::NAN)),
        (key("buf"), JsValue::new_byte_buffer(vec![1u8])),
    ]);
    let result = stringify(&[obj]).ok();
    assert_eq!(
        result,
        Some(text(r#"{"name":"jsrt","tags":["a",null],"nan":null,"buf":{}}"#))
    );
}

#[test]
fn test_stringify_skips_proto_and_reads_accessors() {
    let parent = JsValue::new_object([(key("inherited"), num(1.0))]);
    let obj = JsValue::new_object([(proto_key(), parent)]);
    let getter = JsValue::new_function(|_, _| Ok(num(7.0)));
    assert!(obj.define_accessor(key("computed"), getter, JsValue::Undefined).is_ok());
    assert_eq!(stringify(&[obj]).ok(), Some(text(r#"{"computed":7}"#)));
}

#[test]
fn test_stringify_numbers() {
    assert_eq!(stringify(&[num(3.0)]).ok(), Some(text("3")));
    assert_eq!(stringify(&[num(-1.25)]).ok(), Some(text("-1.25")));
    assert_eq!(stringify(&[num(f64::INFINITY)]).ok(), Some(text("null")));
    assert_eq!(stringify(&[JsValue::Undefined]).ok(), Some(JsValue::Undefined));
}

#[test]
fn test_stringify_indent() {
    let value = JsValue::new_object([(key("a"), numbers(&[1.0]))]);
    let spaced = stringify(&[value.clone(), JsValue::Undefined, num(2.0)]).ok();
    assert_eq!(spaced, Some(text("{\n  \"a\": [\n    1\n  ]\n}")));

    let tabbed = stringify(&[value, JsValue::Undefined, text("\t")]).ok();
    assert_eq!(tabbed, Some(text("{\n\t\"a\": [\n\t\t1\n\t]\n}")));
}

#[test]
fn test_stringify_circular() {
    let obj = JsValue::new_object(Vec::new());
    assert!(obj.set(&text("me"), obj.clone()).is_ok());
    let err = stringify(&[obj]).err().map(|e| e.kind());
    assert_eq!(err, Some(ErrorKind::InvalidArgument));
}

#[test]
fn test_stringify_shared_but_acyclic() {
    let shared = numbers(&[1.0]);
    let obj = JsValue::new_object([(key("x"), shared.clone()), (key("y"), shared)]);
    assert_eq!(stringify(&[obj]).ok(), Some(text(r#"{"x":[1],"y":[1]}"#)));
}

#[test]
fn test_round_trip_document() {
    let source = r#"{"list":[1,"two",false],"nested":{"deep":[[]]}}"#;
    let Ok(value) = parse(source) else {
        panic!("parse failed");
    };
    assert_eq!(stringify(&[value]).ok(), Some(text(source)));
}

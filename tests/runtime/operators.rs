//! Operator tests

use super::{num, numbers, text};
use jsrt::{ErrorKind, JsValue, ops};

#[test]
fn test_add() {
    assert_eq!(ops::add(&num(1.0), &num(2.0)), num(3.0));
    assert_eq!(ops::add(&text("a"), &num(1.0)), text("a1"));
    assert_eq!(ops::add(&num(1.0), &text("a")), text("1a"));
    assert_eq!(ops::add(&JsValue::Boolean(true), &num(1.0)), num(2.0));
    assert_eq!(ops::add(&text("x"), &numbers(&[1.0, 2.0])), text("x1,2"));
}

#[test]
fn test_arithmetic() {
    assert_eq!(ops::sub(&num(5.0), &text("2")), num(3.0));
    assert_eq!(ops::mul(&num(4.0), &num(2.5)), num(10.0));
    assert_eq!(ops::rem(&num(-7.0), &num(3.0)), num(-1.0));
    assert!(ops::sub(&JsValue::Undefined, &num(1.0)).to_number().is_nan());
}

#[test]
fn test_relational() {
    assert!(ops::less_than(&num(1.0), &num(2.0)));
    assert!(ops::less_equal(&num(2.0), &num(2.0)));
    assert!(ops::greater_than(&text("b"), &text("a")));
    assert!(ops::greater_equal(&text("10"), &num(9.0)));
    assert!(!ops::less_than(&num(f64::NAN), &num(1.0)));
    assert!(!ops::greater_equal(&num(f64::NAN), &num(f64::NAN)));
}

#[test]
fn test_logical_returns_operands() {
    assert_eq!(ops::and(&num(0.0), &text("x")), num(0.0));
    assert_eq!(ops::and(&num(1.0), &text("x")), text("x"));
    assert_eq!(ops::or(&text(""), &text("fallback")), text("fallback"));
    assert_eq!(ops::or(&text("set"), &text("fallback")), text("set"));
    assert_eq!(ops::not(&JsValue::Undefined), JsValue::Boolean(true));
}

#[test]
fn test_increment_decrement() {
    let mut counter = num(1.0);
    assert!(ops::increment(&mut counter).is_ok());
    assert!(ops::increment(&mut counter).is_ok());
    assert!(ops::decrement(&mut counter).is_ok());
    assert_eq!(counter, num(2.0));

    let mut label = text("1");
    let err = ops::increment(&mut label).err().map(|e| e.kind());
    assert_eq!(err, Some(ErrorKind::WrongReceiverType));
    assert_eq!(label, text("1"));
}

#[test]
fn test_concat() {
    let joined = ops::concat(&[text("n="), num(1.5), JsValue::Boolean(false)]);
    assert_eq!(joined, "n=1.5false");
}

#[test]
fn test_equality() {
    assert!(num(1.0).loose_equals(&text("1")));
    assert!(!num(1.0).strict_equals(&text("1")));
    assert!(!JsValue::Undefined.loose_equals(&num(0.0)));
    let arr = numbers(&[]);
    assert!(arr.loose_equals(&arr.clone()));
    assert!(!arr.loose_equals(&numbers(&[])));
}

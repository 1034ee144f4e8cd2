//! ByteBuffer tests

use super::{at, get, num, text};
use jsrt::{ErrorKind, JsValue};

fn bytes(value: &JsValue) -> Vec<u8> {
    value.as_byte_buffer().map(|b| b.to_vec()).unwrap_or_default()
}

#[test]
fn test_indexed_read() {
    let buf = JsValue::new_byte_buffer(vec![1u8, 2, 255]);
    assert_eq!(at(&buf, 0), num(1.0));
    assert_eq!(at(&buf, 2), num(255.0));
}

#[test]
fn test_write_clamps_to_low_byte() {
    let buf = JsValue::new_byte_buffer(vec![0u8; 4]);
    assert!(buf.set(&num(0.0), num(300.0)).is_ok());
    assert!(buf.set(&num(1.0), num(256.0)).is_ok());
    assert!(buf.set(&num(2.0), text("65")).is_ok());
    assert!(buf.set(&num(3.0), num(-2.0)).is_ok());
    assert_eq!(bytes(&buf), vec![44, 0, 65, 254]);
}

#[test]
fn test_out_of_bounds_read() {
    let buf = JsValue::new_byte_buffer(vec![0u8; 2]);
    let err = buf.get(&num(2.0)).err().map(|e| e.kind());
    assert_eq!(err, Some(ErrorKind::IndexOutOfBounds));
}

#[test]
fn test_byte_length() {
    let buf = JsValue::new_byte_buffer(vec![9u8; 3]);
    assert_eq!(get(&buf, "byteLength"), num(3.0));

    assert!(buf.set(&text("byteLength"), num(1.0)).is_ok());
    assert_eq!(bytes(&buf), vec![9]);

    // Non-numeric lengths are ignored
    assert!(buf.set(&text("byteLength"), text("big")).is_ok());
    assert_eq!(get(&buf, "byteLength"), num(1.0));
}

#[test]
fn test_named_properties_vivify() {
    let buf = JsValue::new_byte_buffer(Vec::new());
    assert!(buf.set(&text("tag"), text("raw")).is_ok());
    assert_eq!(get(&buf, "tag"), text("raw"));
}

#[test]
fn test_iterates_bytes() {
    let buf = JsValue::new_byte_buffer(vec![5u8, 6]);
    let collected = buf.iter().and_then(|it| it.collect::<Result<Vec<_>, _>>());
    assert_eq!(collected.ok(), Some(vec![num(5.0), num(6.0)]));
}

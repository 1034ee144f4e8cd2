//! Per-thread well-known values.
//!
//! The runtime is single-threaded and `Rc`-based, so the reserved iterator
//! key and the interned key strings live in thread-locals rather than in a
//! global.

use crate::prelude::*;
use crate::string_dict::StringDict;
use crate::value::{JsString, JsValue};

thread_local! {
    static STRINGS: RefCell<StringDict> = RefCell::new(StringDict::with_common_strings());

    // A fresh object: it can only ever equal itself under key matching.
    static ITERATOR_KEY: JsValue = JsValue::new_object(Vec::new());
}

/// Intern a property name.
///
/// Interned strings live as long as the thread, so this is meant for the
/// fixed set of names the runtime and its embedder spell out in code.
/// Names that arrive at runtime go through [`name_key`].
pub fn intern(s: &str) -> JsString {
    STRINGS.with(|dict| dict.borrow_mut().get_or_insert(s))
}

/// Interned string key as a value
pub fn key(s: &str) -> JsValue {
    JsValue::String(intern(s))
}

/// String key for a caller-supplied name. Reuses the interned string when
/// the name is already known and never adds to the dictionary.
pub fn name_key(s: &str) -> JsValue {
    let known = STRINGS.with(|dict| dict.borrow().get(s));
    JsValue::String(known.unwrap_or_else(|| JsString::from(s)))
}

/// Number of interned strings on this thread
pub fn interned_count() -> usize {
    STRINGS.with(|dict| dict.borrow().len())
}

/// The reserved key under which iterables expose their iterator factory
pub fn iterator_key() -> JsValue {
    ITERATOR_KEY.with(JsValue::clone)
}

/// The reserved prototype-link key
pub fn proto_key() -> JsValue {
    key("__proto__")
}

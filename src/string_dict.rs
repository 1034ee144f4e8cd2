//! String dictionary for deduplicating property-name strings.
//!
//! Well-known keys (`length`, `next`, `__proto__`, method names) are looked up
//! on every property access; interning them means every method table and
//! iterator record shares one `Rc<str>` per name.

use crate::prelude::FxHashMap;
use crate::value::{CheapClone, JsString};

/// A dictionary for deduplicating JsString instances.
///
/// Strings inserted into the dictionary are stored once and subsequent
/// requests for the same string return a cheap clone of the existing instance.
pub struct StringDict {
    /// Using Box<str> as key to avoid double-indirection through Rc.
    strings: FxHashMap<Box<str>, JsString>,
}

impl StringDict {
    pub fn new() -> Self {
        Self {
            strings: FxHashMap::default(),
        }
    }

    /// Create a dictionary pre-populated with the runtime's well-known keys.
    pub fn with_common_strings() -> Self {
        let mut dict = Self::new();
        for s in COMMON_STRINGS {
            dict.get_or_insert(s);
        }
        dict
    }

    /// Get an existing string or insert a new one.
    pub fn get_or_insert(&mut self, s: &str) -> JsString {
        if let Some(existing) = self.strings.get(s) {
            return existing.cheap_clone();
        }
        let js_str = JsString::from(s);
        self.strings.insert(s.into(), js_str.cheap_clone());
        js_str
    }

    /// Get an existing string without inserting.
    pub fn get(&self, s: &str) -> Option<JsString> {
        self.strings.get(s).map(|s| s.cheap_clone())
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringDict {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys the runtime itself reads and writes.
const COMMON_STRINGS: &[&str] = &[
    // Reserved and computed properties
    "__proto__",
    "prototype",
    "constructor",
    "length",
    "byteLength",
    // Iterator protocol
    "next",
    "value",
    "done",
    // Array methods
    "push",
    "map",
    "filter",
    "reduce",
    "join",
    // JSON
    "parse",
    "stringify",
];

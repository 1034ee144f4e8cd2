//! JavaScript value representation
//!
//! The core JsValue type plus the coercion and equality rules every other
//! part of the runtime relies on.

use crate::error::JsResult;
use crate::object::{JsArray, JsByteBuffer, JsFunction, JsObject};
use crate::prelude::*;

/// Trait for types that have cheap (O(1), reference-counted) clones.
///
/// This trait makes it explicit when a clone is cheap (just incrementing a reference count)
/// vs when it might be expensive (copying data). Types implementing this trait should have
/// O(1) clone operations, typically because they use `Rc` or similar reference counting.
///
/// # Examples
/// - `JsArray` / `JsObject` (Rc handles) - cheap clone, aliases the same backing data
/// - `JsString` (Rc<str>) - cheap clone
pub trait CheapClone: Clone {
    /// Create a cheap (reference-counted) clone of this value.
    ///
    /// This is semantically identical to `clone()` but makes it explicit that
    /// the operation is O(1) and only increments a reference count.
    fn cheap_clone(&self) -> Self {
        self.clone()
    }
}

// Implement CheapClone for Rc-based types (Rc<RefCell<T>> is covered by this)
impl<T: ?Sized> CheapClone for Rc<T> {}

/// A JavaScript value
///
/// Primitives are copied. The four boxed variants are shared handles:
/// cloning a value clones the handle, and a mutation through one clone is
/// visible through every other.
#[derive(Clone, Default)]
pub enum JsValue {
    #[default]
    Undefined,
    Boolean(bool),
    Number(f64),
    String(JsString),
    Array(JsArray),
    ByteBuffer(JsByteBuffer),
    Object(JsObject),
    Function(JsFunction),
}

// Cloning a JsValue never copies backing data
impl CheapClone for JsValue {}

/// The variant tag of a [`JsValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Boolean,
    Number,
    String,
    Array,
    ByteBuffer,
    Object,
    Function,
}

impl JsValue {
    /// Create an Object from `(key, value)` pairs, in order
    pub fn new_object(pairs: impl IntoIterator<Item = (JsValue, JsValue)>) -> Self {
        JsValue::Object(JsObject::from_pairs(pairs))
    }

    pub fn new_array(values: impl IntoIterator<Item = JsValue>) -> Self {
        JsValue::Array(JsArray::new(values.into_iter().collect()))
    }

    pub fn new_byte_buffer(bytes: impl Into<Vec<u8>>) -> Self {
        JsValue::ByteBuffer(JsByteBuffer::new(bytes.into()))
    }

    /// Wrap a native callable as a Function value
    pub fn new_function<F>(func: F) -> Self
    where
        F: Fn(&JsValue, &[JsValue]) -> JsResult<JsValue> + 'static,
    {
        JsValue::Function(JsFunction::new(func))
    }

    pub fn undefined() -> Self {
        JsValue::Undefined
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            JsValue::Undefined => ValueKind::Undefined,
            JsValue::Boolean(_) => ValueKind::Boolean,
            JsValue::Number(_) => ValueKind::Number,
            JsValue::String(_) => ValueKind::String,
            JsValue::Array(_) => ValueKind::Array,
            JsValue::ByteBuffer(_) => ValueKind::ByteBuffer,
            JsValue::Object(_) => ValueKind::Object,
            JsValue::Function(_) => ValueKind::Function,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, JsValue::Undefined)
    }

    /// Check if this value is a shared handle rather than a primitive
    pub fn is_boxed(&self) -> bool {
        matches!(
            self,
            JsValue::Array(_) | JsValue::ByteBuffer(_) | JsValue::Object(_) | JsValue::Function(_)
        )
    }

    /// Check if this value is callable (a function)
    pub fn is_callable(&self) -> bool {
        matches!(self, JsValue::Function(_))
    }

    /// Check if this is a string value
    pub fn is_string(&self) -> bool {
        matches!(self, JsValue::String(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            JsValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&JsArray> {
        match self {
            JsValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_byte_buffer(&self) -> Option<&JsByteBuffer> {
        match self {
            JsValue::ByteBuffer(buf) => Some(buf),
            _ => None,
        }
    }

    /// Get the typeof result for this value
    pub fn type_of(&self) -> &'static str {
        match self {
            JsValue::Undefined => "undefined",
            JsValue::Boolean(_) => "boolean",
            JsValue::Number(_) => "number",
            JsValue::String(_) => "string",
            JsValue::Array(_) | JsValue::ByteBuffer(_) | JsValue::Object(_) => "object",
            JsValue::Function(_) => "function",
        }
    }

    /// Address of the shared backing data, for identity checks.
    pub fn boxed_id(&self) -> Option<usize> {
        match self {
            JsValue::Array(arr) => Some(arr.id()),
            JsValue::ByteBuffer(buf) => Some(buf.id()),
            JsValue::Object(obj) => Some(obj.id()),
            JsValue::Function(func) => Some(func.id()),
            _ => None,
        }
    }

    /// Convert to boolean (ToBoolean)
    pub fn to_boolean(&self) -> bool {
        match self {
            JsValue::Undefined => false,
            JsValue::Boolean(b) => *b,
            JsValue::Number(n) => *n != 0.0 && !n.is_nan(),
            JsValue::String(s) => !s.is_empty(),
            JsValue::Array(_) | JsValue::ByteBuffer(_) | JsValue::Object(_) => true,
            JsValue::Function(_) => true,
        }
    }

    /// Convert to number (ToNumber)
    pub fn to_number(&self) -> f64 {
        match self {
            JsValue::Undefined => f64::NAN,
            JsValue::Boolean(true) => 1.0,
            JsValue::Boolean(false) => 0.0,
            JsValue::Number(n) => *n,
            JsValue::String(s) => {
                let trimmed = s.as_str().trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
            // Would need ToPrimitive then ToNumber
            JsValue::Array(_) | JsValue::ByteBuffer(_) | JsValue::Object(_) => f64::NAN,
            JsValue::Function(_) => f64::NAN,
        }
    }

    /// Convert to an unsigned 32-bit integer (ToUint32)
    pub fn to_u32(&self) -> u32 {
        let n = self.to_number();
        if !n.is_finite() {
            return 0;
        }
        math::rem_euclid(math::trunc(n), 4_294_967_296.0) as u32
    }

    /// Convert to string (ToString)
    pub fn to_js_string(&self) -> JsString {
        match self {
            JsValue::Undefined => JsString::from("undefined"),
            JsValue::Boolean(true) => JsString::from("true"),
            JsValue::Boolean(false) => JsString::from("false"),
            JsValue::Number(n) => JsString::from(number_to_string(*n)),
            JsValue::String(s) => s.cheap_clone(),
            JsValue::Array(arr) => JsString::from(arr.join(",")),
            JsValue::ByteBuffer(_) => JsString::from("[object ArrayBuffer]"),
            JsValue::Object(_) => JsString::from("[object Object]"),
            JsValue::Function(_) => JsString::from("function () { [native code] }"),
        }
    }

    /// Strict equality (===)
    pub fn strict_equals(&self, other: &JsValue) -> bool {
        match (self, other) {
            (JsValue::Undefined, JsValue::Undefined) => true,
            (JsValue::Boolean(a), JsValue::Boolean(b)) => a == b,
            // NaN !== NaN falls out of IEEE comparison
            (JsValue::Number(a), JsValue::Number(b)) => a == b,
            (JsValue::String(a), JsValue::String(b)) => a == b,
            (JsValue::Array(a), JsValue::Array(b)) => a.ptr_eq(b),
            (JsValue::ByteBuffer(a), JsValue::ByteBuffer(b)) => a.ptr_eq(b),
            (JsValue::Object(a), JsValue::Object(b)) => a.ptr_eq(b),
            (JsValue::Function(a), JsValue::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Loose equality (==), as used for property keys and predicates.
    ///
    /// The left operand decides the comparison: a Number compares against
    /// the other side's ToNumber, a String against its ToString, a Boolean
    /// against its ToBoolean. Undefined equals only Undefined, on either
    /// side, and boxed values compare by identity.
    pub fn loose_equals(&self, other: &JsValue) -> bool {
        if self.is_undefined() || other.is_undefined() {
            return self.is_undefined() && other.is_undefined();
        }
        match self {
            JsValue::Number(n) => *n == other.to_number(),
            JsValue::String(s) => match other {
                JsValue::String(o) => s == o,
                _ => *s == other.to_js_string(),
            },
            JsValue::Boolean(b) => *b == other.to_boolean(),
            _ => self.strict_equals(other),
        }
    }
}

/// Render a number the way scripts see it
fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl fmt::Debug for JsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsValue::Undefined => write!(f, "undefined"),
            JsValue::Boolean(b) => write!(f, "{}", b),
            JsValue::Number(n) => write!(f, "{}", n),
            JsValue::String(s) => write!(f, "\"{}\"", s.as_ref()),
            JsValue::Array(arr) => write!(f, "Array({})", arr.len()),
            JsValue::ByteBuffer(buf) => write!(f, "ArrayBuffer({})", buf.len()),
            JsValue::Object(_) => write!(f, "{{...}}"),
            JsValue::Function(_) => write!(f, "[Function]"),
        }
    }
}

impl PartialEq for JsValue {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

// Conversions from Rust types

impl From<bool> for JsValue {
    fn from(b: bool) -> Self {
        JsValue::Boolean(b)
    }
}

impl From<f64> for JsValue {
    fn from(n: f64) -> Self {
        JsValue::Number(n)
    }
}

impl From<i32> for JsValue {
    fn from(n: i32) -> Self {
        JsValue::Number(n as f64)
    }
}

impl From<u32> for JsValue {
    fn from(n: u32) -> Self {
        JsValue::Number(n as f64)
    }
}

impl From<usize> for JsValue {
    fn from(n: usize) -> Self {
        JsValue::Number(n as f64)
    }
}

impl From<&str> for JsValue {
    fn from(s: &str) -> Self {
        JsValue::String(JsString::from(s))
    }
}

impl From<String> for JsValue {
    fn from(s: String) -> Self {
        JsValue::String(JsString::from(s))
    }
}

impl From<JsString> for JsValue {
    fn from(s: JsString) -> Self {
        JsValue::String(s)
    }
}

impl From<Vec<JsValue>> for JsValue {
    fn from(values: Vec<JsValue>) -> Self {
        JsValue::Array(JsArray::new(values))
    }
}

impl From<JsArray> for JsValue {
    fn from(arr: JsArray) -> Self {
        JsValue::Array(arr)
    }
}

impl From<JsByteBuffer> for JsValue {
    fn from(buf: JsByteBuffer) -> Self {
        JsValue::ByteBuffer(buf)
    }
}

impl From<JsObject> for JsValue {
    fn from(obj: JsObject) -> Self {
        JsValue::Object(obj)
    }
}

impl From<JsFunction> for JsValue {
    fn from(func: JsFunction) -> Self {
        JsValue::Function(func)
    }
}

/// Reference-counted string for efficient string handling
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct JsString(Rc<str>);

// JsString wraps Rc<str>, so clone is cheap (just reference count increment)
impl CheapClone for JsString {}

impl JsString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<str> for JsString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for JsString {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for JsString {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for JsString {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl From<&str> for JsString {
    fn from(s: &str) -> Self {
        JsString(s.into())
    }
}

impl From<String> for JsString {
    fn from(s: String) -> Self {
        JsString(s.into())
    }
}

impl fmt::Debug for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

impl fmt::Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add<&str> for JsString {
    type Output = JsString;

    fn add(self, other: &str) -> JsString {
        let mut s = String::from(&*self.0);
        s.push_str(other);
        JsString::from(s)
    }
}

impl std::ops::Add<&JsString> for JsString {
    type Output = JsString;

    fn add(self, other: &JsString) -> JsString {
        let mut s = String::from(&*self.0);
        s.push_str(&other.0);
        JsString::from(s)
    }
}

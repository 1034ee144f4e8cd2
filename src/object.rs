//! Boxed value handles.
//!
//! Each handle is an `Rc` around the variant's backing data. Cloning a handle
//! aliases the same data; the data lives as long as its longest holder.
//! There is no cycle collection, so reference cycles (including cyclic
//! `__proto__` links) are never reclaimed.

use crate::builtins;
use crate::error::JsResult;
use crate::prelude::*;
use crate::property::PropertyStore;
use crate::value::{CheapClone, JsValue};

thread_local! {
    // Arrays whose `join` is in progress on this thread
    static JOINING: RefCell<IndexSet<usize>> = RefCell::new(index_set_new());
}

/// Native callable signature: `(this, args) -> value`
pub type NativeFn = Rc<dyn Fn(&JsValue, &[JsValue]) -> JsResult<JsValue>>;

/// Backing data of a generic object
#[derive(Debug, Default)]
pub struct ObjectData {
    properties: RefCell<PropertyStore>,
}

/// Reference to a generic object
#[derive(Clone, Default)]
pub struct JsObject(Rc<ObjectData>);

impl CheapClone for JsObject {}

impl JsObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (JsValue, JsValue)>) -> Self {
        JsObject(Rc::new(ObjectData {
            properties: RefCell::new(pairs.into_iter().collect()),
        }))
    }

    pub fn properties(&self) -> &RefCell<PropertyStore> {
        &self.0.properties
    }

    /// Get the object's unique ID
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    /// Check if two handles point to the same object
    pub fn ptr_eq(&self, other: &JsObject) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Backing data of an array: elements plus the installed method table
pub struct ArrayData {
    elements: Rc<RefCell<Vec<JsValue>>>,
    properties: RefCell<PropertyStore>,
}

/// Reference to an array
#[derive(Clone)]
pub struct JsArray(Rc<ArrayData>);

impl CheapClone for JsArray {}

impl JsArray {
    pub fn new(values: Vec<JsValue>) -> Self {
        let elements = Rc::new(RefCell::new(values));
        let properties = builtins::array::instance_properties(&elements);
        JsArray(Rc::new(ArrayData {
            elements,
            properties: RefCell::new(properties),
        }))
    }

    pub fn len(&self) -> usize {
        self.0.elements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.elements.borrow().is_empty()
    }

    /// Element at `index`, if in range
    pub fn get(&self, index: usize) -> Option<JsValue> {
        self.0.elements.borrow().get(index).cloned()
    }

    pub fn push(&self, value: JsValue) {
        self.0.elements.borrow_mut().push(value);
    }

    /// Resize, padding with `undefined` or truncating
    pub fn resize(&self, len: usize) {
        self.0.elements.borrow_mut().resize(len, JsValue::Undefined);
    }

    pub fn elements(&self) -> Ref<'_, Vec<JsValue>> {
        self.0.elements.borrow()
    }

    /// Snapshot of the current elements
    pub fn to_vec(&self) -> Vec<JsValue> {
        self.0.elements.borrow().clone()
    }

    pub(crate) fn element_cell(&self) -> &Rc<RefCell<Vec<JsValue>>> {
        &self.0.elements
    }

    /// Concatenate the elements' string forms with `separator`.
    ///
    /// An array reached again while it is already being joined renders as
    /// the empty string.
    pub fn join(&self, separator: &str) -> String {
        let id = self.id();
        if !JOINING.with(|active| active.borrow_mut().insert(id)) {
            return String::new();
        }
        let parts: Vec<String> = self
            .to_vec()
            .iter()
            .map(|elem| elem.to_js_string().to_string())
            .collect();
        JOINING.with(|active| active.borrow_mut().pop());
        parts.join(separator)
    }

    pub fn properties(&self) -> &RefCell<PropertyStore> {
        &self.0.properties
    }

    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub fn ptr_eq(&self, other: &JsArray) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Backing data of a byte buffer
pub struct BufferData {
    bytes: Rc<RefCell<Vec<u8>>>,
    properties: RefCell<PropertyStore>,
}

/// Reference to a growable byte buffer
#[derive(Clone)]
pub struct JsByteBuffer(Rc<BufferData>);

impl CheapClone for JsByteBuffer {}

impl JsByteBuffer {
    pub fn new(bytes: Vec<u8>) -> Self {
        let bytes = Rc::new(RefCell::new(bytes));
        let properties = builtins::buffer::instance_properties(&bytes);
        JsByteBuffer(Rc::new(BufferData {
            bytes,
            properties: RefCell::new(properties),
        }))
    }

    pub fn len(&self) -> usize {
        self.0.bytes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.bytes.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.bytes.borrow().get(index).copied()
    }

    /// Store a byte; out-of-range writes are dropped
    pub fn set(&self, index: usize, byte: u8) {
        if let Some(slot) = self.0.bytes.borrow_mut().get_mut(index) {
            *slot = byte;
        }
    }

    pub fn resize(&self, len: usize) {
        self.0.bytes.borrow_mut().resize(len, 0);
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.bytes.borrow().clone()
    }

    pub fn properties(&self) -> &RefCell<PropertyStore> {
        &self.0.properties
    }

    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub fn ptr_eq(&self, other: &JsByteBuffer) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Backing data of a function: an object plus its native callable
pub struct FunctionData {
    object: ObjectData,
    native: NativeFn,
}

/// Reference to a callable object
#[derive(Clone)]
pub struct JsFunction(Rc<FunctionData>);

impl CheapClone for JsFunction {}

impl JsFunction {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&JsValue, &[JsValue]) -> JsResult<JsValue> + 'static,
    {
        Self::from_native(Rc::new(func))
    }

    pub fn from_native(native: NativeFn) -> Self {
        JsFunction(Rc::new(FunctionData {
            object: ObjectData::default(),
            native,
        }))
    }

    /// Invoke the native callable
    pub fn call(&self, this: &JsValue, args: &[JsValue]) -> JsResult<JsValue> {
        (self.0.native)(this, args)
    }

    pub fn properties(&self) -> &RefCell<PropertyStore> {
        &self.0.object.properties
    }

    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub fn ptr_eq(&self, other: &JsFunction) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for JsArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements().iter()).finish()
    }
}

impl fmt::Debug for JsByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("JsByteBuffer").field(&self.to_vec()).finish()
    }
}

impl fmt::Debug for JsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsObject").field("id", &self.id()).finish()
    }
}

impl fmt::Debug for JsFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsFunction").field("id", &self.id()).finish()
    }
}

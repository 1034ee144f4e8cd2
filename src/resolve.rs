//! Property resolution
//!
//! Reads walk the own store first, then follow `__proto__` one hop at a
//! time. Every lookup hands back a [`Property`] whose getter has already
//! run against the original receiver, and whose setter knows where a write
//! belongs:
//!
//! - an accessor keeps its own setter
//! - an Array element writes its slot
//! - anything else writes into the own store of the value the lookup
//!   started from, so assigning an inherited or unset key creates an own
//!   property there
//!
//! No store borrow is held while a getter or setter runs, so accessors may
//! freely read and grow the store they live in.
//!
//! There is no cycle guard on `__proto__`. A cyclic chain recurses until the
//! stack runs out.

use crate::builtins::{array, buffer};
use crate::error::{JsError, JsResult};
use crate::intrinsics::{iterator_key, key, name_key, proto_key};
use crate::iterator::JsIterator;
use crate::prelude::*;
use crate::property::{Property, PropertyStore, Setter};
use crate::value::JsValue;

impl JsValue {
    /// The own property store of a boxed value
    pub fn properties(&self) -> Option<&RefCell<PropertyStore>> {
        match self {
            JsValue::Array(arr) => Some(arr.properties()),
            JsValue::ByteBuffer(buf) => Some(buf.properties()),
            JsValue::Object(obj) => Some(obj.properties()),
            JsValue::Function(func) => Some(func.properties()),
            JsValue::Undefined | JsValue::Boolean(_) | JsValue::Number(_) | JsValue::String(_) => {
                None
            }
        }
    }

    /// Resolve `key` on this value or its prototype chain.
    ///
    /// Returns `Ok(None)` when nothing along the chain has the key. Reading
    /// anything from `undefined` fails with WrongReceiverType; other
    /// primitives have no properties.
    pub fn get_own_property(&self, key: &JsValue, receiver: &JsValue) -> JsResult<Option<Property>> {
        let Some(prop) = self.lookup(key, receiver)? else {
            return Ok(None);
        };
        if prop.has_setter() {
            Ok(Some(prop))
        } else {
            Ok(Some(prop.with_setter(self.store_writer(key))))
        }
    }

    /// Resolve `key`, falling back to an empty property that creates an own
    /// entry when assigned. Reading the fallback does not touch the store.
    pub fn get_property(&self, key: &JsValue, receiver: &JsValue) -> JsResult<Property> {
        match self.get_own_property(key, receiver)? {
            Some(prop) => Ok(prop),
            None => Ok(Property::data(JsValue::Undefined).with_setter(self.store_writer(key))),
        }
    }

    /// Read `key` with this value as receiver
    pub fn get(&self, key: &JsValue) -> JsResult<JsValue> {
        self.get_property(key, self).map(Property::into_value)
    }

    /// Read a string-named property. The name is not interned.
    pub fn get_named(&self, name: &str) -> JsResult<JsValue> {
        self.get(&name_key(name))
    }

    /// Assign through whatever property `key` resolves to
    pub fn set(&self, key: &JsValue, value: JsValue) -> JsResult<()> {
        self.get_property(key, self)?.assign(self, value)?;
        Ok(())
    }

    /// Write straight into the own store, bypassing accessors.
    ///
    /// Numeric keys on an Array land in the store, not in the elements.
    pub fn insert_property(&self, key: JsValue, value: JsValue) -> JsResult<()> {
        self.define_property(key, Property::data(value))
    }

    /// Install a property (data or accessor) into the own store
    pub fn define_property(&self, key: JsValue, prop: Property) -> JsResult<()> {
        let store = self.own_store("define a property on")?;
        store.borrow_mut().insert(key, prop);
        Ok(())
    }

    /// Install an accessor built from script getter and setter functions
    pub fn define_accessor(&self, key: JsValue, getter: JsValue, setter: JsValue) -> JsResult<()> {
        self.define_property(key, Property::with_getter_setter(getter, setter))
    }

    /// Invoke this value as a function
    pub fn call(&self, this: &JsValue, args: &[JsValue]) -> JsResult<JsValue> {
        match self {
            JsValue::Function(func) => func.call(this, args),
            other => Err(JsError::not_callable(other.to_js_string().to_string())),
        }
    }

    /// Read `name` and call it with this value as receiver
    pub fn call_method(&self, name: &str, args: &[JsValue]) -> JsResult<JsValue> {
        match self.get_named(name)? {
            JsValue::Function(method) => method.call(self, args),
            _ => Err(JsError::not_callable(name)),
        }
    }

    /// Call this function as a constructor.
    ///
    /// The fresh object inherits from the function's `prototype` (when that
    /// is boxed) and records the function as its `constructor`.
    pub fn construct(&self, args: &[JsValue]) -> JsResult<JsValue> {
        let JsValue::Function(func) = self else {
            return Err(JsError::not_callable(self.to_js_string().to_string()));
        };
        let instance = JsValue::new_object(Vec::new());
        let prototype = self.get_named("prototype")?;
        if prototype.is_boxed() {
            instance.insert_property(proto_key(), prototype)?;
        }
        instance.insert_property(key("constructor"), self.clone())?;
        func.call(&instance, args)?;
        Ok(instance)
    }

    /// Obtain an iterator over this value through its iterator entry
    pub fn iter(&self) -> JsResult<JsIterator> {
        let factory = self.get(&iterator_key())?;
        if !factory.is_callable() {
            return Err(JsError::not_callable(format!(
                "{} is not iterable, its iterator entry",
                self.type_of()
            )));
        }
        let target = factory.call(self, &[])?;
        Ok(JsIterator::with_receiver(target.clone(), target))
    }

    fn own_store(&self, action: &str) -> JsResult<&RefCell<PropertyStore>> {
        self.properties().ok_or_else(|| {
            JsError::wrong_receiver(format!("cannot {action} {}", self.type_of()))
        })
    }

    fn lookup(&self, key: &JsValue, receiver: &JsValue) -> JsResult<Option<Property>> {
        match (self, key) {
            (JsValue::Undefined, _) => Err(JsError::wrong_receiver(format!(
                "cannot read properties of undefined (reading '{}')",
                key.to_js_string()
            ))),
            (JsValue::Boolean(_) | JsValue::Number(_) | JsValue::String(_), _) => Ok(None),
            (JsValue::Array(arr), JsValue::Number(index)) => {
                array::element_property(arr, *index).map(Some)
            }
            (JsValue::ByteBuffer(buf), JsValue::Number(index)) => {
                buffer::byte_property(buf, *index)?.materialize(receiver).map(Some)
            }
            _ => self.lookup_store(key, receiver),
        }
    }

    fn lookup_store(&self, key: &JsValue, receiver: &JsValue) -> JsResult<Option<Property>> {
        let Some(store) = self.properties() else {
            return Ok(None);
        };

        let own = store.borrow().get(key);
        if let Some(prop) = own {
            return prop.materialize(receiver).map(Some);
        }

        let link = store.borrow().get(&proto_key());
        let Some(link) = link else {
            return Ok(None);
        };
        let proto = link.materialize(self)?.into_value();
        if proto.is_boxed() {
            proto.lookup(key, receiver)
        } else {
            Ok(None)
        }
    }

    /// Setter that records a write in this value's own store
    fn store_writer(&self, key: &JsValue) -> Setter {
        let target = self.clone();
        let key = key.clone();
        Rc::new(move |_receiver, value| {
            if let Some(store) = target.properties() {
                store.borrow_mut().insert_value(key.clone(), value.clone());
            }
            Ok(value)
        })
    }
}

//! Property storage
//!
//! Every boxed value owns a [`PropertyStore`]: an insertion-ordered list of
//! `(key, Property)` pairs. Keys are matched with the language's loose
//! equality rather than hashed, so `1` and `"1"` address the same slot.
//!
//! A [`Property`] is either plain data or an accessor pair. Lookups hand out
//! a `Property` whose getter has already run and whose setter writes back to
//! wherever the assignment belongs, so callers only ever see plain values.

use crate::error::JsResult;
use crate::prelude::*;
use crate::value::JsValue;

/// Computes a property's value; receives the lookup receiver.
pub type Getter = Rc<dyn Fn(&JsValue) -> JsResult<JsValue>>;

/// Intercepts a write; receives the receiver and the assigned value.
pub type Setter = Rc<dyn Fn(&JsValue, JsValue) -> JsResult<JsValue>>;

/// A property value, optionally overlaid with an accessor pair.
#[derive(Clone, Default)]
pub struct Property {
    pub value: JsValue,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl Property {
    pub fn data(value: JsValue) -> Self {
        Self {
            value,
            getter: None,
            setter: None,
        }
    }

    /// Create an accessor property from native closures
    pub fn accessor(getter: Getter, setter: Setter) -> Self {
        Self {
            value: JsValue::Undefined,
            getter: Some(getter),
            setter: Some(setter),
        }
    }

    /// Create an accessor property from script functions.
    ///
    /// A getter that is not a Function reads as `undefined`; a setter that is
    /// not a Function ignores writes.
    pub fn with_getter_setter(getter: JsValue, setter: JsValue) -> Self {
        Self::accessor(
            Rc::new(move |receiver| match &getter {
                JsValue::Function(f) => f.call(receiver, &[]),
                _ => Ok(JsValue::Undefined),
            }),
            Rc::new(move |receiver, value| match &setter {
                JsValue::Function(f) => f.call(receiver, &[value]),
                _ => Ok(JsValue::Undefined),
            }),
        )
    }

    /// Check if this is an accessor property (has getter or setter)
    pub fn is_accessor(&self) -> bool {
        self.getter.is_some() || self.setter.is_some()
    }

    pub fn has_setter(&self) -> bool {
        self.setter.is_some()
    }

    pub fn value(&self) -> &JsValue {
        &self.value
    }

    pub fn into_value(self) -> JsValue {
        self.value
    }

    /// Write through this property.
    ///
    /// Runs the setter when there is one. A detached data property has
    /// nowhere to write, so the value is handed back untouched.
    pub fn assign(&self, receiver: &JsValue, value: JsValue) -> JsResult<JsValue> {
        match &self.setter {
            Some(setter) => setter(receiver, value),
            None => Ok(value),
        }
    }

    /// Run the getter (if any) against `receiver` and store its result.
    pub(crate) fn materialize(mut self, receiver: &JsValue) -> JsResult<Self> {
        if let Some(getter) = &self.getter {
            self.value = getter(receiver)?;
        }
        Ok(self)
    }

    pub(crate) fn with_setter(mut self, setter: Setter) -> Self {
        self.setter = Some(setter);
        self
    }
}

impl From<JsValue> for Property {
    fn from(value: JsValue) -> Self {
        Property::data(value)
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.value)
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .finish()
    }
}

/// Ordered association list of own properties.
///
/// Holds at most one entry per key under loose equality; inserting an
/// existing key overwrites that entry's property in place.
#[derive(Clone, Debug, Default)]
pub struct PropertyStore {
    entries: Vec<(JsValue, Property)>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the earliest entry whose key equals `key`
    pub fn position(&self, key: &JsValue) -> Option<usize> {
        self.entries
            .iter()
            .position(|(stored, _)| stored.loose_equals(key))
    }

    /// Clone of the earliest matching property
    pub fn get(&self, key: &JsValue) -> Option<Property> {
        self.position(key)
            .and_then(|idx| self.entries.get(idx))
            .map(|(_, prop)| prop.clone())
    }

    pub fn contains_key(&self, key: &JsValue) -> bool {
        self.position(key).is_some()
    }

    /// Entry by insertion index. Stable while the store only grows, so
    /// callers that may trigger reentrant inserts walk by index.
    pub fn entry_at(&self, idx: usize) -> Option<(&JsValue, &Property)> {
        self.entries.get(idx).map(|(key, prop)| (key, prop))
    }

    /// Insert or overwrite
    pub fn insert(&mut self, key: JsValue, prop: Property) {
        match self.position(&key) {
            Some(idx) => {
                if let Some((_, slot)) = self.entries.get_mut(idx) {
                    *slot = prop;
                }
            }
            None => self.entries.push((key, prop)),
        }
    }

    pub fn insert_value(&mut self, key: JsValue, value: JsValue) {
        self.insert(key, Property::data(value));
    }

    pub fn keys(&self) -> impl Iterator<Item = &JsValue> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&JsValue, &Property)> {
        self.entries.iter().map(|(key, prop)| (key, prop))
    }
}

impl FromIterator<(JsValue, JsValue)> for PropertyStore {
    fn from_iter<I: IntoIterator<Item = (JsValue, JsValue)>>(iter: I) -> Self {
        let mut store = PropertyStore::new();
        for (key, value) in iter {
            store.insert_value(key, value);
        }
        store
    }
}

//! Array built-in methods
//!
//! The method Functions are created once per thread and shared by every
//! Array; each instance store gets a clone of the table plus its own
//! `length` accessor.

use crate::error::{JsError, JsResult};
use crate::generator::{ElementCursor, Generator};
use crate::intrinsics::{iterator_key, key};
use crate::object::JsArray;
use crate::prelude::*;
use crate::property::{Property, PropertyStore};
use crate::value::JsValue;

use super::{checked_index, requested_length, try_resize};

thread_local! {
    static METHODS: PropertyStore = method_table();
}

fn method_table() -> PropertyStore {
    let mut table = PropertyStore::with_capacity(6);
    table.insert_value(key("push"), JsValue::new_function(array_push));
    table.insert_value(key("map"), JsValue::new_function(array_map));
    table.insert_value(key("filter"), JsValue::new_function(array_filter));
    table.insert_value(key("reduce"), JsValue::new_function(array_reduce));
    table.insert_value(key("join"), JsValue::new_function(array_join));
    table.insert_value(iterator_key(), JsValue::new_function(array_iterator));
    table
}

/// Own store for a new Array over `elements`
pub(crate) fn instance_properties(elements: &Rc<RefCell<Vec<JsValue>>>) -> PropertyStore {
    let mut store = METHODS.with(PropertyStore::clone);
    store.insert(key("length"), length_property(elements));
    store
}

fn length_property(elements: &Rc<RefCell<Vec<JsValue>>>) -> Property {
    let read = Rc::clone(elements);
    let write = Rc::clone(elements);
    Property::accessor(
        Rc::new(move |_| Ok(JsValue::from(read.borrow().len()))),
        Rc::new(move |_, value| {
            // Non-numeric lengths are ignored rather than rejected
            let Some(len) = requested_length(&value) else {
                return Ok(JsValue::Undefined);
            };
            try_resize(&mut write.borrow_mut(), len, JsValue::Undefined)?;
            Ok(value)
        }),
    )
}

/// Element `index` as a property whose setter writes the slot back
pub(crate) fn element_property(arr: &JsArray, index: f64) -> JsResult<Property> {
    let slot = checked_index(index, arr.len())?;
    let value = arr.get(slot).unwrap_or_default();
    let elements = Rc::clone(arr.element_cell());
    Ok(Property::data(value).with_setter(Rc::new(move |_, value| {
        let mut elements = elements.borrow_mut();
        let length = elements.len();
        match elements.get_mut(slot) {
            Some(cell) => {
                *cell = value.clone();
                Ok(value)
            }
            None => Err(JsError::index_out_of_bounds(index, length)),
        }
    })))
}

fn this_array<'a>(this: &'a JsValue, method: &str) -> JsResult<&'a JsArray> {
    this.as_array().ok_or_else(|| {
        JsError::wrong_receiver(format!(
            "Array.prototype.{method} called on {}",
            this.type_of()
        ))
    })
}

fn callback_arg(args: &[JsValue], method: &str) -> JsResult<JsValue> {
    match args.first() {
        Some(callback) if callback.is_callable() => Ok(callback.clone()),
        _ => Err(JsError::not_callable(format!(
            "Array.prototype.{method} callback"
        ))),
    }
}

/// Array.prototype.push - appends every argument in order
pub fn array_push(this: &JsValue, args: &[JsValue]) -> JsResult<JsValue> {
    let arr = this_array(this, "push")?;
    for arg in args {
        arr.push(arg.clone());
    }
    Ok(JsValue::Undefined)
}

/// Array.prototype.map
pub fn array_map(this: &JsValue, args: &[JsValue]) -> JsResult<JsValue> {
    let arr = this_array(this, "map")?;
    let callback = callback_arg(args, "map")?;

    let length = arr.len();
    let mut mapped = Vec::with_capacity(length);
    for index in 0..length {
        // The callback may shrink the array under us
        let Some(elem) = arr.get(index) else { break };
        mapped.push(callback.call(&JsValue::Undefined, &[elem, JsValue::from(index)])?);
    }
    Ok(JsValue::new_array(mapped))
}

/// Array.prototype.filter
pub fn array_filter(this: &JsValue, args: &[JsValue]) -> JsResult<JsValue> {
    let arr = this_array(this, "filter")?;
    let callback = callback_arg(args, "filter")?;

    let mut kept = Vec::new();
    for index in 0..arr.len() {
        let Some(elem) = arr.get(index) else { break };
        let verdict = callback.call(&JsValue::Undefined, &[elem.clone(), JsValue::from(index)])?;
        if verdict.to_boolean() {
            kept.push(elem);
        }
    }
    Ok(JsValue::new_array(kept))
}

/// Array.prototype.reduce
///
/// Without an initial value (or with `undefined`) the first element seeds
/// the accumulator; an empty array then fails with InvalidArgument.
pub fn array_reduce(this: &JsValue, args: &[JsValue]) -> JsResult<JsValue> {
    let arr = this_array(this, "reduce")?;
    let callback = callback_arg(args, "reduce")?;

    let (mut acc, start) = match args.get(1) {
        Some(initial) if !initial.is_undefined() => (initial.clone(), 0),
        _ => match arr.get(0) {
            Some(first) => (first, 1),
            None => {
                return Err(JsError::invalid_argument(
                    "Reduce of empty array with no initial value",
                ));
            }
        },
    };

    for index in start..arr.len() {
        let Some(elem) = arr.get(index) else { break };
        acc = callback.call(&JsValue::Undefined, &[acc, elem, JsValue::from(index)])?;
    }
    Ok(acc)
}

/// Array.prototype.join - separator defaults to the empty string
pub fn array_join(this: &JsValue, args: &[JsValue]) -> JsResult<JsValue> {
    let arr = this_array(this, "join")?;
    let separator = match args.first() {
        Some(JsValue::String(sep)) => sep.as_str(),
        _ => "",
    };
    Ok(JsValue::from(arr.join(separator)))
}

fn array_iterator(this: &JsValue, _args: &[JsValue]) -> JsResult<JsValue> {
    this_array(this, "[iterator]")?;
    let cursor = ElementCursor::new(this.clone());
    Ok(Generator::new(cursor).into_iterator_object())
}

//! ByteBuffer built-ins: `byteLength`, indexed byte access and iteration

use crate::error::{JsError, JsResult};
use crate::generator::{ElementCursor, Generator};
use crate::intrinsics::{iterator_key, key};
use crate::object::JsByteBuffer;
use crate::prelude::*;
use crate::property::{Property, PropertyStore};
use crate::value::JsValue;

use super::{checked_index, requested_length, try_resize};

thread_local! {
    static ITERATOR: JsValue = JsValue::new_function(buffer_iterator);
}

/// Own store for a new ByteBuffer over `bytes`
pub(crate) fn instance_properties(bytes: &Rc<RefCell<Vec<u8>>>) -> PropertyStore {
    let mut store = PropertyStore::with_capacity(2);
    store.insert(key("byteLength"), byte_length_property(bytes));
    store.insert_value(iterator_key(), ITERATOR.with(JsValue::clone));
    store
}

fn byte_length_property(bytes: &Rc<RefCell<Vec<u8>>>) -> Property {
    let read = Rc::clone(bytes);
    let write = Rc::clone(bytes);
    Property::accessor(
        Rc::new(move |_| Ok(JsValue::from(read.borrow().len()))),
        Rc::new(move |_, value| {
            let Some(len) = requested_length(&value) else {
                return Ok(JsValue::Undefined);
            };
            try_resize(&mut write.borrow_mut(), len, 0)?;
            Ok(value)
        }),
    )
}

/// Byte `index` as an accessor: reads the live byte, writes keep the low
/// eight bits of the value's ToUint32.
pub(crate) fn byte_property(buf: &JsByteBuffer, index: f64) -> JsResult<Property> {
    let slot = checked_index(index, buf.len())?;
    let reader = buf.clone();
    let writer = buf.clone();
    Ok(Property::accessor(
        Rc::new(move |_| match reader.get(slot) {
            Some(byte) => Ok(JsValue::Number(f64::from(byte))),
            None => Err(JsError::index_out_of_bounds(index, reader.len())),
        }),
        Rc::new(move |_, value| {
            writer.set(slot, (value.to_u32() & 0xFF) as u8);
            Ok(value)
        }),
    ))
}

fn buffer_iterator(this: &JsValue, _args: &[JsValue]) -> JsResult<JsValue> {
    if this.as_byte_buffer().is_none() {
        return Err(JsError::wrong_receiver(format!(
            "ArrayBuffer iterator called on {}",
            this.type_of()
        )));
    }
    Ok(Generator::new(ElementCursor::new(this.clone())).into_iterator_object())
}

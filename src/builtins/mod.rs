//! Built-in method tables for the container variants, plus the JSON global

pub mod array;
pub mod buffer;
pub mod json;

pub use array::{array_filter, array_join, array_map, array_push, array_reduce};
pub use json::{json_global, json_parse, json_stringify};

use crate::error::{JsError, JsResult};
use crate::prelude::math;
use crate::value::JsValue;

/// Validate a numeric index against a current length.
/// Fractional indices truncate toward zero, so `1.5` addresses slot 1.
pub(crate) fn checked_index(index: f64, length: usize) -> JsResult<usize> {
    let whole = math::trunc(index);
    if whole >= 0.0 && whole < length as f64 {
        Ok(whole as usize)
    } else {
        Err(JsError::index_out_of_bounds(index, length))
    }
}

/// Length requested by a `length`/`byteLength` write.
/// Anything but a non-negative integral Number up to 2^32-1 is rejected.
pub(crate) fn requested_length(value: &JsValue) -> Option<usize> {
    match value {
        JsValue::Number(n) if *n >= 0.0 && math::is_integral(*n) && *n <= f64::from(u32::MAX) => {
            Some(*n as usize)
        }
        _ => None,
    }
}

/// Largest backing store a `length`/`byteLength` write may grow to, in bytes
pub(crate) const MAX_BACKING_BYTES: usize = 1 << 30;

/// Resize `storage` to `len`, padding with `fill`.
/// Growth past [`MAX_BACKING_BYTES`] or a failed allocation is an error and
/// leaves `storage` unchanged.
pub(crate) fn try_resize<T: Clone>(storage: &mut Vec<T>, len: usize, fill: T) -> JsResult<()> {
    if let Some(additional) = len.checked_sub(storage.len()) {
        let too_large = len
            .checked_mul(std::mem::size_of::<T>())
            .is_none_or(|bytes| bytes > MAX_BACKING_BYTES);
        if too_large {
            return Err(JsError::invalid_argument(format!("Invalid length {len}")));
        }
        storage
            .try_reserve_exact(additional)
            .map_err(|e| JsError::invalid_argument(format!("Invalid length {len}: {e}")))?;
    }
    storage.resize(len, fill);
    Ok(())
}

//! Value and object runtime for an embedded JavaScript-like language
//!
//! Provides the tagged [`JsValue`], per-object property stores with
//! prototype delegation and accessors, the built-in Array / ByteBuffer /
//! Object / Function variants, a pull-driven generator and iterator
//! protocol, and an error bridge whose presentation is picked at build time
//! (see [`throw`]).
//!
//! # Example
//!
//! ```
//! use jsrt::{JsValue, intrinsics::key};
//!
//! let parent = JsValue::new_object([(key("greeting"), JsValue::from("hi"))]);
//! let child = JsValue::new_object([(key("__proto__"), parent)]);
//! assert_eq!(child.get_named("greeting").unwrap(), JsValue::from("hi"));
//!
//! let arr = JsValue::new_array([JsValue::from(1), JsValue::from(2)]);
//! arr.call_method("push", &[JsValue::from(3)]).unwrap();
//! let joined = arr.call_method("join", &[JsValue::from("-")]).unwrap();
//! assert_eq!(joined, JsValue::from("1-2-3"));
//! ```

pub mod builtins;
pub mod error;
pub mod generator;
pub mod intrinsics;
pub mod iterator;
pub mod object;
pub mod ops;
pub mod prelude;
pub mod property;
mod resolve;
pub mod string_dict;
pub mod throw;
pub mod value;

pub use builtins::json_global;
pub use error::{ErrorKind, JsError, JsResult};
pub use generator::{
    Coroutine, ElementCursor, Generator, GeneratorState, IterResult, from_fn,
    iterator_from_next_func, new_generator_function,
};
pub use iterator::JsIterator;
pub use object::{JsArray, JsByteBuffer, JsFunction, JsObject, NativeFn};
pub use property::{Getter, Property, PropertyStore, Setter};
pub use throw::{ActiveMode, Completion, ErrorMode, Flagged, FlaggedValue, Unwinding, throw};
pub use value::{CheapClone, JsString, JsValue, ValueKind};

//! Error signalling at the embedding boundary
//!
//! Inside the runtime every fallible operation returns [`JsResult`]. How a
//! failure is presented to the embedder is chosen once per build:
//!
//! - with the `exceptions` feature (the default) failures stay
//!   `Err(JsError)` and propagate with `?`, see [`Unwinding`]
//! - without it, failures become a [`FlaggedValue`] whose `thrown` flag is
//!   set, see [`Flagged`]; every call site checks the flag and returns the
//!   thrown value upward, usually via [`check_thrown!`](crate::check_thrown)
//!
//! Both backends are always compiled; [`ActiveMode`] names the selected one.

use crate::error::{JsError, JsResult};
use crate::object::JsFunction;
use crate::value::JsValue;

/// One error-propagation strategy
pub trait ErrorMode {
    /// What a boundary call hands back
    type Completion;

    /// Present an internal result in this mode
    fn surface(result: JsResult<JsValue>) -> Self::Completion;

    /// Turn a completion back into the internal contract
    fn absorb(completion: Self::Completion) -> JsResult<JsValue>;
}

/// Failures propagate as `Err` up the Rust call stack
#[derive(Debug, Clone, Copy)]
pub struct Unwinding;

impl ErrorMode for Unwinding {
    type Completion = JsResult<JsValue>;

    fn surface(result: JsResult<JsValue>) -> Self::Completion {
        result
    }

    fn absorb(completion: Self::Completion) -> JsResult<JsValue> {
        completion
    }
}

/// Failures are returned in place of a result, marked as thrown
#[derive(Debug, Clone, Copy)]
pub struct Flagged;

/// A value that may represent a propagating error
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlaggedValue {
    pub value: JsValue,
    pub thrown: bool,
}

impl FlaggedValue {
    pub fn normal(value: JsValue) -> Self {
        Self {
            value,
            thrown: false,
        }
    }

    pub fn thrown(value: JsValue) -> Self {
        Self { value, thrown: true }
    }

    /// The payload-less thrown value
    pub fn sentinel() -> Self {
        Self::thrown(JsValue::Undefined)
    }

    pub fn is_thrown(&self) -> bool {
        self.thrown
    }

    pub fn into_result(self) -> JsResult<JsValue> {
        Flagged::absorb(self)
    }
}

impl From<JsResult<JsValue>> for FlaggedValue {
    fn from(result: JsResult<JsValue>) -> Self {
        Flagged::surface(result)
    }
}

impl ErrorMode for Flagged {
    type Completion = FlaggedValue;

    fn surface(result: JsResult<JsValue>) -> Self::Completion {
        match result {
            Ok(value) => FlaggedValue::normal(value),
            Err(err) => FlaggedValue::thrown(err.into_value()),
        }
    }

    fn absorb(completion: Self::Completion) -> JsResult<JsValue> {
        if completion.thrown {
            Err(JsError::thrown(completion.value))
        } else {
            Ok(completion.value)
        }
    }
}

/// The error mode selected for this build
#[cfg(feature = "exceptions")]
pub type ActiveMode = Unwinding;

/// The error mode selected for this build
#[cfg(not(feature = "exceptions"))]
pub type ActiveMode = Flagged;

/// Result type of boundary calls in the active mode
pub type Completion = <ActiveMode as ErrorMode>::Completion;

/// Throw `value` in the active mode
pub fn throw(value: JsValue) -> Completion {
    ActiveMode::surface(Err(JsError::thrown(value)))
}

/// Present an internal result in the active mode
pub fn complete(result: JsResult<JsValue>) -> Completion {
    ActiveMode::surface(result)
}

/// Unwrap a [`FlaggedValue`], returning it from the enclosing function if
/// it is thrown.
#[macro_export]
macro_rules! check_thrown {
    ($completion:expr) => {{
        let completion: $crate::throw::FlaggedValue = $completion;
        if completion.thrown {
            return completion;
        }
        completion.value
    }};
}

impl JsValue {
    /// Call this value as a function, reporting failure in the active mode
    pub fn invoke(&self, this: &JsValue, args: &[JsValue]) -> Completion {
        complete(self.call(this, args))
    }

    /// Call this value, reporting failure as a flagged value
    pub fn invoke_flagged(&self, this: &JsValue, args: &[JsValue]) -> FlaggedValue {
        Flagged::surface(self.call(this, args))
    }
}

impl JsFunction {
    /// Wrap a native written against error mode `M`
    pub fn from_mode<M, F>(func: F) -> Self
    where
        M: ErrorMode + 'static,
        F: Fn(&JsValue, &[JsValue]) -> M::Completion + 'static,
    {
        JsFunction::new(move |this, args| M::absorb(func(this, args)))
    }

    /// Wrap a native that signals failure with a thrown flag
    pub fn from_flagged<F>(func: F) -> Self
    where
        F: Fn(&JsValue, &[JsValue]) -> FlaggedValue + 'static,
    {
        Self::from_mode::<Flagged, F>(func)
    }
}

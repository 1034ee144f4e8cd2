//! Generators
//!
//! A generator wraps a [`Coroutine`] body in an explicit state machine:
//!
//! ```text
//! NotStarted --resume--> SuspendedAtYield --resume--> ... --> Completed
//! ```
//!
//! Each `resume` runs the body up to its next yield point. Finishing or
//! failing moves the generator to `Completed`, after which every `resume`
//! reports `done` without touching the body again. Execution is pull-driven
//! and synchronous: nothing runs between calls.

use crate::error::{JsError, JsResult};
use crate::intrinsics::{iterator_key, key};
use crate::prelude::*;
use crate::value::JsValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    NotStarted,
    SuspendedAtYield,
    Completed,
}

/// A resumable body.
pub trait Coroutine {
    /// Run to the next yield point. `Ok(None)` means the body returned.
    fn resume(&mut self) -> JsResult<Option<JsValue>>;
}

/// A coroutine driven by a closure; each call is one step
pub struct FromFn<F>(F);

pub fn from_fn<F>(step: F) -> FromFn<F>
where
    F: FnMut() -> JsResult<Option<JsValue>>,
{
    FromFn(step)
}

impl<F> Coroutine for FromFn<F>
where
    F: FnMut() -> JsResult<Option<JsValue>>,
{
    fn resume(&mut self) -> JsResult<Option<JsValue>> {
        (self.0)()
    }
}

/// Walks the live elements of an Array, or the bytes of a ByteBuffer.
///
/// Reads each slot at resume time, so pushes made during iteration are
/// picked up and truncation ends it early.
pub struct ElementCursor {
    source: JsValue,
    index: usize,
}

impl ElementCursor {
    pub fn new(source: JsValue) -> Self {
        Self { source, index: 0 }
    }
}

impl Coroutine for ElementCursor {
    fn resume(&mut self) -> JsResult<Option<JsValue>> {
        let item = match &self.source {
            JsValue::Array(arr) => arr.get(self.index),
            JsValue::ByteBuffer(buf) => buf.get(self.index).map(|b| JsValue::Number(f64::from(b))),
            _ => None,
        };
        if item.is_some() {
            self.index += 1;
        }
        Ok(item)
    }
}

/// One `{ value, done }` step of an iteration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IterResult {
    pub value: JsValue,
    pub done: bool,
}

impl IterResult {
    pub fn yielded(value: JsValue) -> Self {
        Self { value, done: false }
    }

    /// The terminal record: `{ value: undefined, done: true }`
    pub fn finished() -> Self {
        Self {
            value: JsValue::Undefined,
            done: true,
        }
    }

    /// Script-visible record object
    pub fn into_object(self) -> JsValue {
        JsValue::new_object([
            (key("value"), self.value),
            (key("done"), JsValue::Boolean(self.done)),
        ])
    }
}

type Start = Box<dyn FnOnce() -> JsResult<Box<dyn Coroutine>>>;

enum Body {
    Pending(Start),
    Running(Box<dyn Coroutine>),
    Gone,
}

pub struct Generator {
    state: GeneratorState,
    body: Body,
}

impl Generator {
    pub fn new<C: Coroutine + 'static>(body: C) -> Self {
        Self {
            state: GeneratorState::NotStarted,
            body: Body::Running(Box::new(body)),
        }
    }

    /// A generator whose body is only built on the first `resume`.
    /// A failing start completes the generator.
    pub fn deferred<F>(start: F) -> Self
    where
        F: FnOnce() -> JsResult<Box<dyn Coroutine>> + 'static,
    {
        Self {
            state: GeneratorState::NotStarted,
            body: Body::Pending(Box::new(start)),
        }
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    pub fn resume(&mut self) -> JsResult<IterResult> {
        if self.state == GeneratorState::Completed {
            return Ok(IterResult::finished());
        }

        if let Body::Pending(_) = self.body {
            if let Body::Pending(start) = std::mem::replace(&mut self.body, Body::Gone) {
                match start() {
                    Ok(body) => self.body = Body::Running(body),
                    Err(err) => return Err(self.fail(err)),
                }
            }
        }

        let step = match &mut self.body {
            Body::Running(body) => body.resume(),
            Body::Pending(_) | Body::Gone => Ok(None),
        };
        match step {
            Ok(Some(value)) => {
                tracing::trace!(from = ?self.state, "generator yielded");
                self.state = GeneratorState::SuspendedAtYield;
                Ok(IterResult::yielded(value))
            }
            Ok(None) => {
                self.complete();
                Ok(IterResult::finished())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Wrap this generator as a script-visible iterator object
    pub fn into_iterator_object(self) -> JsValue {
        let cell = Rc::new(RefCell::new(self));
        let next = JsValue::new_function(move |_this, _args| {
            let mut generator = cell
                .try_borrow_mut()
                .map_err(|_| JsError::wrong_receiver("generator is already running"))?;
            generator.resume().map(IterResult::into_object)
        });
        iterator_from_next_func(next)
    }

    fn complete(&mut self) {
        tracing::trace!(from = ?self.state, "generator completed");
        self.state = GeneratorState::Completed;
        self.body = Body::Gone;
    }

    fn fail(&mut self, err: JsError) -> JsError {
        tracing::trace!(from = ?self.state, error = %err, "generator failed");
        self.complete();
        err
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator").field("state", &self.state).finish()
    }
}

thread_local! {
    static RETURN_THIS: JsValue = JsValue::new_function(|this, _args| Ok(this.clone()));
}

/// Build an iterator object around a `next` Function. Its iterator entry
/// returns the object itself.
pub fn iterator_from_next_func(next: JsValue) -> JsValue {
    JsValue::new_object([
        (key("next"), next),
        (iterator_key(), RETURN_THIS.with(JsValue::clone)),
    ])
}

/// Wrap a body factory as a generator Function.
///
/// Calling the Function captures `this` and the arguments and returns an
/// iterator object; the factory runs on the first `next`.
pub fn new_generator_function<F>(factory: F) -> JsValue
where
    F: Fn(&JsValue, &[JsValue]) -> JsResult<Box<dyn Coroutine>> + 'static,
{
    let factory = Rc::new(factory);
    JsValue::new_function(move |this, args| {
        let factory = Rc::clone(&factory);
        let this = this.clone();
        let args = args.to_vec();
        Ok(Generator::deferred(move || factory(&this, &args)).into_iterator_object())
    })
}

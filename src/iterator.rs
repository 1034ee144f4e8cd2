//! Consumer-side iterator adapter
//!
//! [`JsIterator`] drives any value exposing a `next` method and caches the
//! last `{ value, done }` record it produced. It can be used cursor-style
//! (`current` / `advance` / `state_eq` against an end marker) or as a Rust
//! [`Iterator`].

use crate::error::{JsError, JsResult};
use crate::generator::IterResult;
use crate::value::JsValue;

#[derive(Debug, Clone)]
pub struct JsIterator {
    target: JsValue,
    receiver: Option<JsValue>,
    last: Option<IterResult>,
    /// The cached record was already handed out by `Iterator::next`
    consumed: bool,
    failed: bool,
}

impl JsIterator {
    /// Iterate `target`, calling its `next` without a receiver
    pub fn new(target: JsValue) -> Self {
        Self {
            target,
            receiver: None,
            last: None,
            consumed: false,
            failed: false,
        }
    }

    /// Iterate `target`, calling its `next` with `receiver` as `this`
    pub fn with_receiver(target: JsValue, receiver: JsValue) -> Self {
        Self {
            receiver: Some(receiver),
            ..Self::new(target)
        }
    }

    /// A state that is already done; compares equal to any finished iterator
    pub fn end_marker() -> Self {
        Self {
            last: Some(IterResult::finished()),
            ..Self::new(JsValue::Undefined)
        }
    }

    pub fn target(&self) -> &JsValue {
        &self.target
    }

    /// Call `next` once and cache its record.
    ///
    /// An iterator without a target is permanently done.
    pub fn advance(&mut self) -> JsResult<()> {
        self.consumed = false;
        if self.target.is_undefined() {
            self.last = Some(IterResult::finished());
            return Ok(());
        }

        let next = self.target.get_named("next")?;
        let this = self.receiver.clone().unwrap_or_default();
        let record = next.call(&this, &[])?;
        if !record.is_boxed() {
            return Err(JsError::wrong_receiver(format!(
                "iterator result {} is not an object",
                record.to_js_string()
            )));
        }
        let done = record.get_named("done")?.to_boolean();
        let value = record.get_named("value")?;
        tracing::trace!(done, "iterator advanced");
        self.last = Some(IterResult { value, done });
        Ok(())
    }

    /// The cached record, advancing first if there is none yet
    pub fn record(&mut self) -> JsResult<&IterResult> {
        if self.last.is_none() {
            self.advance()?;
        }
        Ok(&*self.last.get_or_insert_with(IterResult::finished))
    }

    /// Value of the current record
    pub fn current(&mut self) -> JsResult<JsValue> {
        Ok(self.record()?.value.clone())
    }

    pub fn is_done(&mut self) -> JsResult<bool> {
        Ok(self.record()?.done)
    }

    /// Compare two iterator states.
    ///
    /// Both done is equal; one done is not; otherwise the produced values
    /// are compared with loose equality. Either side without a cached
    /// record is advanced first.
    pub fn state_eq(&mut self, other: &mut JsIterator) -> JsResult<bool> {
        let mine = self.record()?.clone();
        let theirs = other.record()?;
        Ok(match (mine.done, theirs.done) {
            (true, true) => true,
            (false, false) => mine.value.loose_equals(&theirs.value),
            _ => false,
        })
    }
}

impl Iterator for JsIterator {
    type Item = JsResult<JsValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if self.last.is_none() || self.consumed {
            if let Err(err) = self.advance() {
                self.failed = true;
                return Some(Err(err));
            }
        }
        match &self.last {
            Some(record) if !record.done => {
                self.consumed = true;
                Some(Ok(record.value.clone()))
            }
            _ => None,
        }
    }
}

//! Iterator and generator protocol tests

use super::{call, get, num, numbers, text};
use jsrt::generator::from_fn;
use jsrt::intrinsics::{iterator_key, key};
use jsrt::{
    Coroutine, ErrorKind, JsError, JsIterator, JsValue, iterator_from_next_func,
    new_generator_function,
};

#[test]
fn test_array_iteration_terminates() {
    let arr = numbers(&[1.0, 2.0, 3.0]);
    let iter = arr.iterator_object();
    let mut states = Vec::new();
    for _ in 0..4 {
        let record = call(&iter, "next", &[]);
        states.push((get(&record, "value"), get(&record, "done")));
    }
    assert_eq!(
        states,
        vec![
            (num(1.0), JsValue::Boolean(false)),
            (num(2.0), JsValue::Boolean(false)),
            (num(3.0), JsValue::Boolean(false)),
            (JsValue::Undefined, JsValue::Boolean(true)),
        ]
    );
}

/// Fetch the iterator object through the reserved iterator entry
trait IteratorEntry {
    fn iterator_object(&self) -> JsValue;
}

impl IteratorEntry for JsValue {
    fn iterator_object(&self) -> JsValue {
        self.get(&iterator_key())
            .and_then(|factory| factory.call(self, &[]))
            .unwrap_or_default()
    }
}

#[test]
fn test_completed_iterator_stays_done() {
    let iter = numbers(&[]).iterator_object();
    for _ in 0..3 {
        let record = call(&iter, "next", &[]);
        assert_eq!(get(&record, "done"), JsValue::Boolean(true));
    }
}

#[test]
fn test_iterator_entry_returns_itself() {
    let iter = numbers(&[1.0]).iterator_object();
    assert!(iter.iterator_object().strict_equals(&iter));
}

#[test]
fn test_rust_iteration() {
    let arr = JsValue::new_array([text("a"), text("b")]);
    let collected = arr.iter().and_then(|it| it.collect::<Result<Vec<_>, _>>()).ok();
    assert_eq!(collected, Some(vec![text("a"), text("b")]));
}

#[test]
fn test_iteration_sees_pushes() {
    let arr = numbers(&[1.0]);
    let Ok(mut iter) = arr.iter() else {
        panic!("array should be iterable");
    };
    assert_eq!(iter.next().and_then(Result::ok), Some(num(1.0)));
    call(&arr, "push", &[num(2.0)]);
    assert_eq!(iter.next().and_then(Result::ok), Some(num(2.0)));
    assert!(iter.next().is_none());
}

#[test]
fn test_cursor_loop_against_end_marker() {
    let arr = numbers(&[1.0, 2.0, 3.0]);
    let Ok(mut it) = arr.iter() else {
        panic!("array should be iterable");
    };
    let mut end = JsIterator::end_marker();
    let mut seen = Vec::new();
    while !it.state_eq(&mut end).unwrap_or(true) {
        seen.push(it.current().unwrap_or_default());
        if it.advance().is_err() {
            break;
        }
    }
    assert_eq!(seen, vec![num(1.0), num(2.0), num(3.0)]);
}

#[test]
fn test_cursor_loop_over_empty() {
    let Ok(mut it) = numbers(&[]).iter() else {
        panic!("array should be iterable");
    };
    let mut end = JsIterator::end_marker();
    assert_eq!(it.state_eq(&mut end).ok(), Some(true));
}

#[test]
fn test_state_equality_compares_values() {
    let mut a = JsIterator::new(numbers(&[5.0]).iterator_object());
    let mut b = JsIterator::new(JsValue::new_array([text("5")]).iterator_object());
    let mut c = JsIterator::new(numbers(&[6.0]).iterator_object());
    assert_eq!(a.state_eq(&mut b).ok(), Some(true));
    assert_eq!(a.state_eq(&mut c).ok(), Some(false));

    let mut end = JsIterator::end_marker();
    assert_eq!(a.state_eq(&mut end).ok(), Some(false));
}

#[test]
fn test_state_equality_undefined_against_false() {
    let mut falsy = JsIterator::new(JsValue::new_array([JsValue::Boolean(false)]).iterator_object());
    let mut missing = JsIterator::new(JsValue::new_array([JsValue::Undefined]).iterator_object());
    assert_eq!(falsy.state_eq(&mut missing).ok(), Some(false));
    assert_eq!(missing.state_eq(&mut falsy).ok(), Some(false));
}

#[test]
fn test_iterator_from_next_func() {
    let remaining = std::rc::Rc::new(std::cell::Cell::new(2u32));
    let next = JsValue::new_function(move |_, _| {
        let n = remaining.get();
        remaining.set(n.saturating_sub(1));
        Ok(JsValue::new_object([
            (key("value"), num(f64::from(n))),
            (key("done"), JsValue::Boolean(n == 0)),
        ]))
    });
    let iter = iterator_from_next_func(next);
    let values = iter.iter().and_then(|it| it.collect::<Result<Vec<_>, _>>()).ok();
    assert_eq!(values, Some(vec![num(2.0), num(1.0)]));
}

#[test]
fn test_next_receives_receiver() {
    let source = JsValue::new_object([(key("label"), text("src"))]);
    let next = JsValue::new_function(|this, _| {
        Ok(JsValue::new_object([
            (key("value"), this.get(&key("label"))?),
            (key("done"), JsValue::Boolean(false)),
        ]))
    });
    let target = iterator_from_next_func(next);
    let mut it = JsIterator::with_receiver(target.clone(), source);
    assert_eq!(it.current().ok(), Some(text("src")));

    let mut unbound = JsIterator::new(target);
    let err = unbound.current().err().map(|e| e.kind());
    assert_eq!(err, Some(ErrorKind::WrongReceiverType));
}

#[test]
fn test_iter_binds_next_to_iterator_object() {
    let next = JsValue::new_function(|this, _| {
        Ok(JsValue::new_object([
            (key("value"), this.get(&key("label"))?),
            (key("done"), JsValue::Boolean(false)),
        ]))
    });
    let cursor = JsValue::new_object([(key("label"), text("cursor")), (key("next"), next)]);
    let iterable = JsValue::new_object([(key("label"), text("iterable"))]);
    let factory = JsValue::new_function(move |_, _| Ok(cursor.clone()));
    assert!(iterable.insert_property(iterator_key(), factory).is_ok());

    let first = iterable.iter().and_then(|mut it| it.current());
    assert_eq!(first.ok(), Some(text("cursor")));
}

#[test]
fn test_non_object_record_fails_and_fuses() {
    let next = JsValue::new_function(|_, _| Ok(num(1.0)));
    let mut it = JsIterator::new(iterator_from_next_func(next));
    assert!(matches!(it.next(), Some(Err(_))));
    assert!(it.next().is_none());
}

fn range(start: f64, end: f64) -> Box<dyn Coroutine> {
    let mut current = start;
    Box::new(from_fn(move || {
        if current >= end {
            return Ok(None);
        }
        current += 1.0;
        Ok(Some(JsValue::Number(current - 1.0)))
    }))
}

#[test]
fn test_generator_function() {
    let gen_fn = new_generator_function(|_this, args| {
        let end = args.first().map(JsValue::to_number).unwrap_or(0.0);
        Ok(range(0.0, end))
    });
    let Ok(iter) = gen_fn.call(&JsValue::Undefined, &[num(3.0)]) else {
        panic!("generator call failed");
    };
    let values = iter.iter().and_then(|it| it.collect::<Result<Vec<_>, _>>()).ok();
    assert_eq!(values, Some(vec![num(0.0), num(1.0), num(2.0)]));
}

#[test]
fn test_generator_body_starts_lazily() {
    let gen_fn = new_generator_function(|_this, _args| Err(JsError::thrown(text("started"))));
    let Ok(iter) = gen_fn.call(&JsValue::Undefined, &[]) else {
        panic!("calling a generator function should not run its body");
    };
    let err = iter.call_method("next", &[]).err().map(JsError::into_value);
    assert_eq!(err, Some(text("started")));

    let after = call(&iter, "next", &[]);
    assert_eq!(get(&after, "done"), JsValue::Boolean(true));
}

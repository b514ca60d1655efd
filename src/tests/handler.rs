use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::{args, Callback, EventError, Handler, IntoHandler};

#[test]
fn zero_argument_closure() {
    let called = Arc::new(AtomicU64::new(0));
    let called_clone = Arc::clone(&called);
    let handler = Handler::from_fn(move || {
        called_clone.fetch_add(1, Ordering::SeqCst);
    });

    handler.call(&args![]);
    assert_eq!(called.load(Ordering::SeqCst), 1);
}

#[test]
fn six_argument_closure() {
    let seen = Arc::new(Mutex::new(String::new()));
    let sink = Arc::clone(&seen);
    let handler = Handler::from_fn(
        move |a: u8, b: u16, c: u32, d: u64, e: char, f: String| {
            *sink.lock().unwrap() = format!("{a}{b}{c}{d}{e}{f}");
        },
    );

    handler.call(&args![1_u8, 2_u16, 3_u32, 4_u64, '5', "6".to_string()]);
    assert_eq!(*seen.lock().unwrap(), "123456");
}

#[test]
fn shared_argument_values_are_cloned() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handler = Handler::from_fn(move |values: Arc<Vec<i32>>| {
        sink.lock().unwrap().push(Arc::strong_count(&values));
    });

    let values = Arc::new(vec![1, 2, 3]);
    handler.call(&args![Arc::clone(&values)]);
    assert_eq!(*seen.lock().unwrap(), vec![3], "Handler should receive a clone of the argument");
}

#[test]
fn raw_handler_sees_every_argument() {
    let count = Arc::new(AtomicU64::new(0));
    let count_clone = Arc::clone(&count);
    let handler = Handler::new(move |args| {
        count_clone.store(args.len() as u64, Ordering::SeqCst);
    });

    handler.call(&args![1, "two", 3.0_f64]);
    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[test]
#[should_panic(expected = "handler expects 2 argument(s), trigger supplied 1")]
fn missing_argument_panics() {
    Handler::from_fn(|_: i32, _: i32| {}).call(&args![1]);
}

#[test]
fn clones_share_identity() {
    let handler = Handler::new(|_| {});
    let clone = handler.clone();
    let other = Handler::new(|_| {});

    assert!(handler.ptr_eq(&clone));
    assert_eq!(handler, clone);
    assert!(!handler.ptr_eq(&other));
    assert_ne!(handler, other);
}

#[test]
fn callback_keeps_identity_through_conversion() {
    let callback: Callback = Arc::new(|_| {});
    let first = Handler::from(Arc::clone(&callback));
    let second = Arc::clone(&callback).into_handler().unwrap();

    assert!(first.ptr_eq(&second));
}

#[test]
fn dynamic_values_convert_when_callable() {
    let handler = Handler::new(|_| {});
    let shared: Arc<dyn Any + Send + Sync> = Arc::new(handler.clone());
    assert_eq!(shared.into_handler(), Ok(handler.clone()));

    let callback: Callback = Arc::new(|_| {});
    let boxed: Box<dyn Any + Send + Sync> = Box::new(callback);
    assert!(boxed.into_handler().is_ok());

    let text: Box<dyn Any + Send + Sync> = Box::new(String::from("what"));
    assert_eq!(text.into_handler(), Err(EventError::InvalidHandler));

    let number: Arc<dyn Any + Send + Sync> = Arc::new(7_i32);
    assert_eq!(number.into_handler(), Err(EventError::InvalidHandler));
}

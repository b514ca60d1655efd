use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::runtime::{Builder, Handle};
use tokio::sync::mpsc;

use crate::{args, AsyncDispatch, EventManager, Handler, ManagerConfig};

fn runtime_manager() -> Arc<EventManager> {
    Arc::new(EventManager::with_config(
        ManagerConfig::default().with_dispatch(AsyncDispatch::Runtime(Handle::current())),
    ))
}

#[tokio::test(flavor = "multi_thread")]
async fn runtime_dispatch_runs_async_handlers() {
    let manager = runtime_manager();
    let called = Arc::new(AtomicU64::new(0));
    let called_clone = Arc::clone(&called);
    manager
        .watch_async(
            "emit",
            Handler::from_fn(move |value: u32| {
                assert_eq!(value, 42);
                called_clone.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();

    for _ in 0..10 {
        manager.trigger("emit", args![42_u32]);
    }
    let waiter = Arc::clone(&manager);
    tokio::task::spawn_blocking(move || waiter.wait()).await.unwrap();

    assert_eq!(called.load(Ordering::SeqCst), 10);
    assert_eq!(manager.pending(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn runtime_dispatch_feeds_async_consumers() {
    let manager = runtime_manager();
    let (tx, mut rx) = mpsc::unbounded_channel();
    manager
        .watch_num_async(
            "reading",
            Handler::from_fn(move |sensor: &'static str, value: f64| {
                tx.send((sensor, value)).unwrap();
            }),
            2,
        )
        .unwrap();

    manager.trigger("reading", args!["thermo", 21.5_f64]);
    manager.trigger("reading", args!["thermo", 22.0_f64]);
    manager.trigger("reading", args!["thermo", 99.0_f64]);
    assert!(!manager.has_event("reading"));

    let mut readings = vec![rx.recv().await.unwrap(), rx.recv().await.unwrap()];
    readings.sort_by(|a, b| a.1.total_cmp(&b.1));
    assert_eq!(readings, vec![("thermo", 21.5), ("thermo", 22.0)]);
}

#[tokio::test(flavor = "multi_thread")]
async fn sync_handlers_still_run_inline() {
    let manager = runtime_manager();
    let called = Arc::new(AtomicU64::new(0));
    let called_clone = Arc::clone(&called);
    manager
        .watch("emit", Handler::new(move |_| {
            called_clone.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

    manager.trigger("emit", args![]);
    assert_eq!(called.load(Ordering::SeqCst), 1);
    assert_eq!(manager.pending(), 0);
}

fn stopped_runtime_manager() -> Arc<EventManager> {
    let runtime = Builder::new_multi_thread().worker_threads(1).build().unwrap();
    let handle = runtime.handle().clone();
    drop(runtime);
    Arc::new(EventManager::with_config(
        ManagerConfig::default().with_dispatch(AsyncDispatch::Runtime(handle)),
    ))
}

#[test]
fn stopped_runtime_moves_handlers_to_threads() {
    let manager = stopped_runtime_manager();
    let called = Arc::new(AtomicU64::new(0));
    let called_clone = Arc::clone(&called);
    manager
        .watch_async("emit", Handler::new(move |_| {
            called_clone.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

    for _ in 0..3 {
        manager.trigger("emit", args![]);
    }
    manager.wait();

    assert_eq!(called.load(Ordering::SeqCst), 3, "Handlers were dropped with the runtime");
    assert_eq!(manager.pending(), 0);
}

#[test]
fn stopped_runtime_fallback_allows_reentrant_handler() {
    let manager = stopped_runtime_manager();
    let called = Arc::new(AtomicU64::new(0));
    let called_clone = Arc::clone(&called);
    manager
        .watch("second", Handler::new(move |_| {
            called_clone.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

    let inner = Arc::clone(&manager);
    manager
        .watch_async("first", Handler::new(move |_| inner.trigger("second", args![])))
        .unwrap();

    manager.trigger("first", args![]);
    manager.wait();
    assert_eq!(called.load(Ordering::SeqCst), 1);
}

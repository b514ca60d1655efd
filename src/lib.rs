//! # Event Watch
//!
//! An in-process event manager: watch named events with handlers, trigger them
//! with arbitrary arguments, and wait for handlers running in the background.
//!
//! - **Handler**: A type-erased callback, built from a typed closure or a raw `Fn(&Args)`.
//! - **Args**: The argument list handed to every handler of a trigger.
//! - **EventManager**: Owns the event table and dispatches triggers.
//! - **Free functions**: `watch`, `trigger`, `wait`, ... on a process-wide default manager.
//!
//! Synchronous handlers run on the triggering thread while the manager's lock is
//! held. Asynchronous handlers run on their own thread (or a Tokio blocking pool,
//! with the `tokio` feature) and are joined by [`EventManager::wait`].
//!
//! ```
//! use std::sync::atomic::{AtomicI32, Ordering};
//! use std::sync::Arc;
//! use event_watch::{args, EventManager, Handler};
//!
//! let manager = EventManager::new();
//! let n = Arc::new(AtomicI32::new(0));
//!
//! let (first, second) = (Arc::clone(&n), Arc::clone(&n));
//! manager.watch("foo", Handler::from_fn(move |d: i32| { first.fetch_add(d, Ordering::SeqCst); })).unwrap();
//! manager.watch("foo", Handler::from_fn(move |d: i32| { second.fetch_add(d + 1, Ordering::SeqCst); })).unwrap();
//!
//! manager.trigger("foo", args![2]);
//! assert_eq!(n.load(Ordering::SeqCst), 5);
//! ```

mod args;
mod config;
mod constants;
mod error;
mod event_manager;
mod global;
mod handler;
mod listener;
mod wait_group;

pub use args::Args;
pub use config::{AsyncDispatch, ManagerConfig};
pub use constants::{Arg, Callback, DEFAULT_THREAD_NAME};
pub use error::EventError;
pub use event_manager::EventManager;
pub use global::{
    clear, default_manager, events, has_event, trigger, unwatch, unwatch_event, wait, watch,
    watch_async, watch_num, watch_num_async, watch_once, watch_once_async,
};
pub use handler::{Callable, Handler, IntoHandler};
pub use listener::Registration;

#[cfg(test)]
mod tests;
